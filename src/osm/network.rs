// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::ev::EncodedEnum;

/// Importance of the most important [route relation](https://wiki.openstreetmap.org/wiki/Relation:route)
/// a way belongs to, as given by its [network](https://wiki.openstreetmap.org/wiki/Key:network) tag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteNetwork {
    /// The way isn't a part of any relevant route.
    #[default]
    Missing,
    International,
    National,
    Regional,
    Local,
    Other,
}

impl EncodedEnum for RouteNetwork {
    const VALUES: &'static [Self] = &[
        Self::Missing,
        Self::International,
        Self::National,
        Self::Regional,
        Self::Local,
        Self::Other,
    ];
}

impl RouteNetwork {
    /// Maps a `network=*` value of a hiking (`iwn`, `nwn`, `rwn`, `lwn`)
    /// or cycling (`icn`, `ncn`, `rcn`, `lcn`) route.
    pub fn from_tag(value: &str) -> Self {
        match value {
            "iwn" | "icn" => Self::International,
            "nwn" | "ncn" => Self::National,
            "rwn" | "rcn" => Self::Regional,
            "lwn" | "lcn" => Self::Local,
            _ => Self::Other,
        }
    }

    /// Picks the more important of two networks. [RouteNetwork::Missing] loses to anything.
    pub fn more_important(self, other: Self) -> Self {
        match (self, other) {
            (Self::Missing, n) | (n, Self::Missing) => n,
            (a, b) if a.rank() <= b.rank() => a,
            (_, b) => b,
        }
    }

    fn rank(self) -> u8 {
        match self {
            Self::International => 0,
            Self::National => 1,
            Self::Regional => 2,
            Self::Local => 3,
            Self::Other => 4,
            Self::Missing => 5,
        }
    }
}

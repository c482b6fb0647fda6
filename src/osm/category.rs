// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Closed set of [highway](https://wiki.openstreetmap.org/wiki/Key:highway) values
/// recognized by [profiles](super::Profile). Other values have no category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Highway {
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    LivingStreet,
    Service,
    Road,
    Track,
    Path,
    Footway,
    Cycleway,
    Bridleway,
    Pedestrian,
    Steps,
    Platform,
    Ford,
}

impl Highway {
    /// Maps a `highway=*` tag value to its category.
    pub fn from_tag(value: &str) -> Option<Self> {
        Some(match value {
            "motorway" => Self::Motorway,
            "motorway_link" => Self::MotorwayLink,
            "trunk" => Self::Trunk,
            "trunk_link" => Self::TrunkLink,
            "primary" => Self::Primary,
            "primary_link" => Self::PrimaryLink,
            "secondary" => Self::Secondary,
            "secondary_link" => Self::SecondaryLink,
            "tertiary" => Self::Tertiary,
            "tertiary_link" => Self::TertiaryLink,
            "unclassified" | "minor" => Self::Unclassified,
            "residential" => Self::Residential,
            "living_street" => Self::LivingStreet,
            "service" => Self::Service,
            "road" => Self::Road,
            "track" => Self::Track,
            "path" => Self::Path,
            "footway" => Self::Footway,
            "cycleway" => Self::Cycleway,
            "bridleway" => Self::Bridleway,
            "pedestrian" => Self::Pedestrian,
            "steps" => Self::Steps,
            "platform" => Self::Platform,
            "ford" => Self::Ford,
            _ => return None,
        })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Motorway => "motorway",
            Self::MotorwayLink => "motorway_link",
            Self::Trunk => "trunk",
            Self::TrunkLink => "trunk_link",
            Self::Primary => "primary",
            Self::PrimaryLink => "primary_link",
            Self::Secondary => "secondary",
            Self::SecondaryLink => "secondary_link",
            Self::Tertiary => "tertiary",
            Self::TertiaryLink => "tertiary_link",
            Self::Unclassified => "unclassified",
            Self::Residential => "residential",
            Self::LivingStreet => "living_street",
            Self::Service => "service",
            Self::Road => "road",
            Self::Track => "track",
            Self::Path => "path",
            Self::Footway => "footway",
            Self::Cycleway => "cycleway",
            Self::Bridleway => "bridleway",
            Self::Pedestrian => "pedestrian",
            Self::Steps => "steps",
            Self::Platform => "platform",
            Self::Ford => "ford",
        }
    }
}

impl std::fmt::Display for Highway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

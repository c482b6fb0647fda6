// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Bit-packed routing edge attributes from [OpenStreetMap](https://www.openstreetmap.org/) tags.
//!
//! The crate has two halves. [ev] packs many independent boolean and quantized decimal
//! values (optionally stored separately per direction) into fixed-width edge records.
//! [osm] interprets way and node tags for a travel mode, as described by a
//! [profile](crate::osm::Profile), into access, speed and priority values stored there.
//! Wayflags supports access tags (including `*:conditional` date ranges),
//! one-way streets, directional access tags, barriers and fords.
//!
//! # Example
//!
//! ```
//! use wayflags::ev::Registry;
//! use wayflags::osm::{Options, Tags, WayParser, FOOT_PROFILE};
//! use wayflags::Graph;
//!
//! let mut registry = Registry::new();
//! FOOT_PROFILE.register(&mut registry)?;
//! registry.build()?;
//!
//! let parser = WayParser::new(&registry, &FOOT_PROFILE, Options::default())?;
//! let access = parser.access().access_enc().clone();
//!
//! let mut g = Graph::new(&registry)?;
//! let tags = Tags::from_iter([
//!     ("highway".to_string(), "footway".to_string()),
//!     ("oneway".to_string(), "yes".to_string()),
//! ]);
//! let edge = g.add_edge(1, 2);
//! parser.handle_way_tags(g.get_flags_mut(edge), &tags);
//!
//! assert!(g.neighbors(1, &access).contains(&2));
//! assert!(g.neighbors(2, &access).is_empty());
//! # Ok::<(), wayflags::ev::ConfigError>(())
//! ```

/// Builds a [Tags](crate::osm::Tags) map from `"key": value` pairs.
#[cfg(test)]
macro_rules! tags {
    {} => { $crate::osm::Tags::default() };
    {$( $k:literal : $v:expr ),+ $(,)?} => {
        $crate::osm::Tags::from_iter([ $( ($k.to_string(), $v.to_string()) ),+ ])
    };
}

#[cfg(test)]
macro_rules! assert_almost_eq {
    ($a:expr, $b:expr) => {
        assert!(
            (($a - $b).abs() < 1e-6),
            "assertion failed: {} ≈ {}",
            $a,
            $b
        )
    };
}

pub mod ev;
mod graph;
pub mod osm;

pub use graph::{EdgeMut, EdgeRef, Graph};

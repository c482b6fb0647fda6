// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Interpretation of [OpenStreetMap](https://www.openstreetmap.org/) tags
//! into edge attributes, customizable via [profiles](Profile).

mod access;
mod barrier;
mod category;
mod conditional;
mod network;
mod options;
mod parser;
mod priority;
mod profile;
mod speed;
mod tags;

pub use access::{AccessParser, WayAccess};
pub use category::Highway;
pub use conditional::ConditionalInspector;
pub use network::RouteNetwork;
pub use options::{Options, OptionsError};
pub use parser::WayParser;
pub use priority::{PriorityCode, PriorityParser};
pub use profile::{
    Auxiliary, Category, Mode, PriorityRules, Profile, SpeedEffect, SpeedModifier,
    BICYCLE_PROFILE, CAR_PROFILE, FOOT_PROFILE, MEAN_WALKING_SPEED, SLOW_WALKING_SPEED,
};
pub use speed::SpeedParser;
pub use tags::Tags;

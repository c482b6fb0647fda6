// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::ev::{ConfigError, EncodedValue, Registry};

use super::category::Highway;
use super::network::RouteNetwork;
use super::priority::PriorityCode;
use super::tags::{Tags, TagsExt};
use super::Options;

/// Travel mode of a [Profile].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Pedestrians, which adds the following logic:
    /// - `oneway` tags are ignored - only `oneway:foot` tags are considered, except on:
    ///    - `highway=footway`,
    ///    - `highway=path`,
    ///    - `highway=steps`,
    ///    - `highway=platform`
    ///    - `public_transport=platform`,
    ///    - `railway=platform`;
    /// - motorways and roundabouts are not implicitly one-way;
    /// - ways with a [sidewalk](https://wiki.openstreetmap.org/wiki/Key:sidewalk) are always accessible.
    Foot,
    Bicycle,
    Car,
}

/// Describes how to convert OSM tags into edge attributes for a single travel mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile<'a> {
    /// Name of the profile, used as the prefix of its [encoded values](Profile::register),
    /// e.g. `foot` gives `foot_access`, `foot_average_speed` and `foot_priority`.
    pub name: &'a str,

    pub mode: Mode,

    /// Array of OSM [access tags](https://wiki.openstreetmap.org/wiki/Key:access#Land-based_transportation)
    /// (in order from least to most specific) to consider when checking for prohibitions.
    ///
    /// The most specific present tag decides. The same hierarchy is used for
    /// `<key>:conditional`, `<key>:forward`, `<key>:backward` and `oneway:<key>` tags.
    pub access: &'a [&'a str],

    /// Access values which explicitly allow the mode, e.g. "yes" or "designated".
    pub intended: &'a [&'a str],

    /// Access values which prohibit the mode, e.g. "no". "private" is added
    /// to this list if [Options::block_private] is set.
    pub restricted: &'a [&'a str],

    /// Baseline table for ways with a `highway=*` tag.
    /// Categories absent from this table are not accessible.
    pub categories: &'a [Category],

    /// Ways without a `highway=*` tag which are still accessible, like platforms or piers.
    pub auxiliary: &'a [Auxiliary<'a>],

    /// Degrading speed adjustments, see [SpeedModifier].
    pub speed_modifiers: &'a [SpeedModifier<'a>],

    /// Bit width of the average speed encoded value.
    pub speed_bits: u8,

    /// Quantization step of the average speed encoded value, in km/h.
    pub speed_factor: f64,

    /// Speed which is never exceeded, in km/h.
    pub max_speed: f64,

    /// Speed of ferries with no duration information, in km/h.
    pub ferry_speed: f64,

    /// Replace the baseline speed by a fraction of the
    /// [maxspeed](https://wiki.openstreetmap.org/wiki/Key:maxspeed) tag.
    pub use_maxspeed: bool,

    /// [sac_scale](https://wiki.openstreetmap.org/wiki/Key:sac_scale) values of accessible ways.
    /// [None] allows any hiking difficulty.
    pub allowed_sac_scale: Option<&'a [&'a str]>,

    /// Force no routing over [motorroad=yes](https://wiki.openstreetmap.org/wiki/Key:motorroad) ways.
    pub disallow_motorroad: bool,

    /// Values of the `barrier=*` node tag which block the mode,
    /// unless overridden by access tags. Other barriers are passable by default.
    pub absolute_barriers: &'a [&'a str],

    /// Priority tables. [None] disables the priority encoded value.
    pub priority: Option<&'a PriorityRules<'a>>,
}

/// Baseline access and speed of ways with a specific `highway=*` tag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Category {
    pub highway: Highway,

    /// If false, the way is only accessible through explicit access tags
    /// (or a sidewalk, on foot).
    pub access: bool,

    /// Baseline speed, in km/h.
    pub speed: f64,
}

/// Accessible ways without a `highway=*` tag, matched on an exact key and value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Auxiliary<'a> {
    pub key: &'a str,
    pub value: &'a str,
    pub speed: f64,
}

/// Adjustment applied to a baseline speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpeedEffect {
    /// Speed is capped to the given value, in km/h.
    Cap(f64),

    /// Speed is multiplied by the given factor.
    Factor(f64),
}

impl SpeedEffect {
    pub fn apply(self, speed: f64) -> f64 {
        match self {
            Self::Cap(cap) => speed.min(cap),
            Self::Factor(factor) => speed * factor,
        }
    }
}

/// Speed adjustment for ways with a specific tag.
///
/// Modifiers are applied in table order. If multiple modifiers with the same
/// key match a way, only the last one applies. Modifiers with different keys stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedModifier<'a> {
    pub key: &'a str,

    /// Value of [SpeedModifier::key] which triggers the modifier.
    /// [None] matches any value.
    pub value: Option<&'a str>,

    pub effect: SpeedEffect,
}

impl<'a> SpeedModifier<'a> {
    pub fn matches(&self, tags: &Tags) -> bool {
        match (self.value, tags.tag(self.key)) {
            (_, None) => false,
            (None, Some(_)) => true,
            (Some(expected), Some(actual)) => expected == actual,
        }
    }
}

/// Describes how ways are preferred by a [Profile].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityRules<'a> {
    /// Baseline levels of highway categories. Absent categories are [PriorityCode::Unchanged].
    pub levels: &'a [(Highway, PriorityCode)],

    /// Ways with a maxspeed not exceeding this value (in km/h) are preferred.
    pub slow_maxspeed: f64,

    /// Ways with a maxspeed exceeding this value (in km/h) are avoided.
    pub fast_maxspeed: f64,

    /// Level of ways designated for the profile's own mode.
    pub designated: PriorityCode,

    /// Access keys of other modes. Ways designated (or official) for those modes
    /// are shared and get the [PriorityRules::shared] level.
    pub shared_with: &'a [&'a str],

    pub shared: PriorityCode,

    /// Tag describing infrastructure running alongside the way for this mode,
    /// e.g. [sidewalk](https://wiki.openstreetmap.org/wiki/Key:sidewalk) on foot.
    pub side_path: Option<&'a str>,

    /// `route=*` values of relations whose [RouteNetwork] is recorded for member ways.
    pub routes: &'a [&'a str],

    /// Minimum levels of ways belonging to routes of the given networks.
    pub networks: &'a [(RouteNetwork, PriorityCode)],
}

impl<'a> PriorityRules<'a> {
    pub fn level(&self, highway: Highway) -> PriorityCode {
        self.levels
            .iter()
            .find_map(|&(h, level)| if h == highway { Some(level) } else { None })
            .unwrap_or(PriorityCode::Unchanged)
    }

    /// Returns the level of ways on a route of the given network, if it has one.
    pub fn network_level(&self, network: RouteNetwork) -> Option<PriorityCode> {
        self.networks
            .iter()
            .find_map(|&(n, level)| if n == network { Some(level) } else { None })
    }
}

impl<'a> Profile<'a> {
    /// Finds a profile by its name (or travel mode name).
    pub fn by_name(name: &str) -> Option<&'static Profile<'static>> {
        match name {
            "foot" => Some(&FOOT_PROFILE),
            "bike" | "bicycle" => Some(&BICYCLE_PROFILE),
            "car" | "motorcar" => Some(&CAR_PROFILE),
            _ => None,
        }
    }

    pub fn access_value_name(&self) -> String {
        format!("{}_access", self.name)
    }

    pub fn speed_value_name(&self) -> String {
        format!("{}_average_speed", self.name)
    }

    pub fn priority_value_name(&self) -> String {
        format!("{}_priority", self.name)
    }

    pub fn network_value_name(&self) -> String {
        format!("{}_network", self.name)
    }

    /// Adds the encoded values used by this profile to the registry:
    /// a directional access boolean, a shared average speed and
    /// (if the profile has [priority rules](Profile::priority)) a shared priority
    /// and a shared [RouteNetwork].
    pub fn register(&self, registry: &mut Registry) -> Result<(), ConfigError> {
        registry
            .add(EncodedValue::boolean(self.access_value_name(), true))?
            .add(EncodedValue::decimal(
                self.speed_value_name(),
                self.speed_bits,
                self.speed_factor,
                false,
            ))?;

        if self.priority.is_some() {
            registry.add(EncodedValue::decimal(
                self.priority_value_name(),
                PriorityCode::BITS,
                PriorityCode::FACTOR,
                false,
            ))?
            .add(EncodedValue::enumeration::<RouteNetwork, _>(
                self.network_value_name(),
                false,
            ))?;
        }
        Ok(())
    }

    /// Returns the [Category] of a way with a `highway=*` tag present in [Profile::categories].
    pub fn category(&self, tags: &Tags) -> Option<&Category> {
        let highway = tags.tag("highway").and_then(Highway::from_tag)?;
        self.categories.iter().find(|c| c.highway == highway)
    }

    /// Returns the first matching [Auxiliary] entry.
    pub fn auxiliary(&self, tags: &Tags) -> Option<&Auxiliary<'a>> {
        self.auxiliary.iter().find(|a| tags.has_tag(a.key, a.value))
    }

    /// Returns the value of the most specific present [access tag](Profile::access).
    pub fn access_value<'t>(&self, tags: &'t Tags) -> Option<&'t str> {
        self.access.iter().rev().find_map(|&key| tags.tag(key))
    }

    /// Returns the value of the most specific present mode tag, skipping the generic "access".
    pub fn mode_value<'t>(&self, tags: &'t Tags) -> Option<&'t str> {
        self.access
            .iter()
            .rev()
            .filter(|&&key| key != "access")
            .find_map(|&key| tags.tag(key))
    }

    /// Checks if any of the `;`-separated access values is restrictive.
    pub fn is_restricted(&self, value: &str, options: Options) -> bool {
        value.split(';').map(str::trim).any(|v| {
            self.restricted.contains(&v) || (options.block_private && v == "private")
        })
    }

    /// Checks if any of the `;`-separated access values explicitly allows the mode.
    pub fn is_intended(&self, value: &str) -> bool {
        value
            .split(';')
            .map(str::trim)
            .any(|v| self.intended.contains(&v))
    }

    /// Returns the (forward, backward) traversability of a way according to its one-way tags.
    ///
    /// Motorways, motorway links and roundabouts are implicitly one-way for vehicles.
    /// An explicit one-way tag relevant to the mode always wins.
    pub fn way_direction(&self, tags: &Tags) -> (bool, bool) {
        let implied = !self.apply_foot_exceptions()
            && (tags.has_tag_in("highway", &["motorway", "motorway_link"])
                || tags.has_tag_in("junction", &["roundabout", "circular"]));

        match self.oneway_value(tags) {
            Some("yes" | "true" | "1") => (true, false),
            Some("-1" | "reverse") => (false, true),
            Some("no") => (true, true),
            _ => (true, !implied),
        }
    }

    /// Returns the one-way value relevant to the mode.
    ///
    /// Vehicles use the most specific `oneway:<key>` tag of the [access hierarchy](Profile::access)
    /// and then plain `oneway`. Pedestrians use `oneway:foot`, and plain `oneway` only on
    /// ways meant for walking.
    fn oneway_value<'t>(&self, tags: &'t Tags) -> Option<&'t str> {
        if self.apply_foot_exceptions() {
            return match tags.tag("oneway:foot") {
                Some(value) => Some(value),
                None if Self::oneway_applies_on_foot(tags) => tags.tag("oneway"),
                None => None,
            };
        }

        self.access
            .iter()
            .rev()
            .filter(|&&key| key != "access")
            .find_map(|&key| tags.tag(&format!("oneway:{key}")))
            .or_else(|| tags.tag("oneway"))
    }

    /// Footways, paths, steps and platforms carry one-way tags aimed at pedestrians.
    fn oneway_applies_on_foot(tags: &Tags) -> bool {
        tags.has_tag_in("highway", &["footway", "path", "steps", "platform"])
            || tags.has_tag("public_transport", "platform")
            || tags.has_tag("railway", "platform")
    }

    pub(crate) fn apply_foot_exceptions(&self) -> bool {
        self.mode == Mode::Foot
    }
}

const FOOT_INTENDED: &[&str] = &["yes", "designated", "official", "permissive"];

const VEHICLE_INTENDED: &[&str] = &["yes", "designated", "official", "permissive", "destination"];

const RESTRICTED: &[&str] = &["no", "restricted", "military", "emergency"];

const VEHICLE_RESTRICTED: &[&str] = &[
    "no",
    "restricted",
    "military",
    "emergency",
    "agricultural",
    "forestry",
];

const PLATFORMS_AND_PIERS: &[Auxiliary] = &[
    Auxiliary {
        key: "railway",
        value: "platform",
        speed: 5.0,
    },
    Auxiliary {
        key: "public_transport",
        value: "platform",
        speed: 5.0,
    },
    Auxiliary {
        key: "man_made",
        value: "pier",
        speed: 5.0,
    },
];

/// Average walking speed, in km/h.
pub const MEAN_WALKING_SPEED: f64 = 5.0;

/// Walking speed on difficult terrain, in km/h.
pub const SLOW_WALKING_SPEED: f64 = 2.0;

const fn walk(highway: Highway) -> Category {
    Category {
        highway,
        access: true,
        speed: MEAN_WALKING_SPEED,
    }
}

const ROUTE_NETWORK_LEVELS: &[(RouteNetwork, PriorityCode)] = &[
    (RouteNetwork::International, PriorityCode::Best),
    (RouteNetwork::National, PriorityCode::Best),
    (RouteNetwork::Regional, PriorityCode::VeryNice),
    (RouteNetwork::Local, PriorityCode::Prefer),
];

const FOOT_PRIORITY: PriorityRules = PriorityRules {
    levels: &[
        (Highway::Motorway, PriorityCode::VeryBad),
        (Highway::MotorwayLink, PriorityCode::VeryBad),
        (Highway::Trunk, PriorityCode::VeryBad),
        (Highway::TrunkLink, PriorityCode::VeryBad),
        (Highway::Primary, PriorityCode::Avoid),
        (Highway::PrimaryLink, PriorityCode::Avoid),
        (Highway::Secondary, PriorityCode::Avoid),
        (Highway::SecondaryLink, PriorityCode::Avoid),
        (Highway::Tertiary, PriorityCode::Avoid),
        (Highway::TertiaryLink, PriorityCode::Avoid),
        (Highway::Footway, PriorityCode::Prefer),
        (Highway::Path, PriorityCode::Prefer),
        (Highway::Steps, PriorityCode::Prefer),
        (Highway::Pedestrian, PriorityCode::Prefer),
        (Highway::LivingStreet, PriorityCode::Prefer),
        (Highway::Track, PriorityCode::Prefer),
        (Highway::Residential, PriorityCode::Prefer),
        (Highway::Service, PriorityCode::Prefer),
        (Highway::Platform, PriorityCode::Prefer),
    ],
    slow_maxspeed: 20.0,
    fast_maxspeed: 50.0,
    designated: PriorityCode::Prefer,
    shared_with: &["bicycle"],
    shared: PriorityCode::SlightAvoid,
    side_path: Some("sidewalk"),
    routes: &["hiking", "foot"],
    networks: ROUTE_NETWORK_LEVELS,
};

/// Routing [Profile] for walking, with preferences for quieter roads
/// and with appropriate [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
pub const FOOT_PROFILE: Profile = Profile {
    name: "foot",
    mode: Mode::Foot,
    access: &["access", "foot"],
    intended: FOOT_INTENDED,
    restricted: RESTRICTED,
    categories: &[
        Category {
            highway: Highway::Motorway,
            access: false,
            speed: MEAN_WALKING_SPEED,
        },
        Category {
            highway: Highway::MotorwayLink,
            access: false,
            speed: MEAN_WALKING_SPEED,
        },
        walk(Highway::Trunk),
        walk(Highway::TrunkLink),
        walk(Highway::Primary),
        walk(Highway::PrimaryLink),
        walk(Highway::Secondary),
        walk(Highway::SecondaryLink),
        walk(Highway::Tertiary),
        walk(Highway::TertiaryLink),
        walk(Highway::Unclassified),
        walk(Highway::Residential),
        walk(Highway::LivingStreet),
        walk(Highway::Service),
        walk(Highway::Road),
        walk(Highway::Track),
        walk(Highway::Path),
        walk(Highway::Footway),
        walk(Highway::Cycleway),
        walk(Highway::Bridleway),
        walk(Highway::Pedestrian),
        walk(Highway::Platform),
        walk(Highway::Ford),
        Category {
            highway: Highway::Steps,
            access: true,
            speed: 3.0,
        },
    ],
    auxiliary: PLATFORMS_AND_PIERS,
    speed_modifiers: &[
        SpeedModifier {
            key: "sac_scale",
            value: None,
            effect: SpeedEffect::Cap(SLOW_WALKING_SPEED),
        },
        SpeedModifier {
            key: "sac_scale",
            value: Some("hiking"),
            effect: SpeedEffect::Cap(MEAN_WALKING_SPEED),
        },
    ],
    speed_bits: 4,
    speed_factor: 1.0,
    max_speed: 15.0,
    ferry_speed: 15.0,
    use_maxspeed: false,
    allowed_sac_scale: Some(&[
        "hiking",
        "mountain_hiking",
        "demanding_mountain_hiking",
        "alpine_hiking",
    ]),
    disallow_motorroad: true,
    absolute_barriers: &["fence", "wall", "city_wall", "hedge", "retaining_wall"],
    priority: Some(&FOOT_PRIORITY),
};

const fn ride(highway: Highway, speed: f64) -> Category {
    Category {
        highway,
        access: true,
        speed,
    }
}

const BICYCLE_PRIORITY: PriorityRules = PriorityRules {
    levels: &[
        (Highway::Trunk, PriorityCode::VeryBad),
        (Highway::TrunkLink, PriorityCode::VeryBad),
        (Highway::Primary, PriorityCode::Avoid),
        (Highway::PrimaryLink, PriorityCode::Avoid),
        (Highway::Secondary, PriorityCode::SlightAvoid),
        (Highway::SecondaryLink, PriorityCode::SlightAvoid),
        (Highway::Steps, PriorityCode::Bad),
        (Highway::Footway, PriorityCode::SlightAvoid),
        (Highway::Pedestrian, PriorityCode::SlightAvoid),
        (Highway::Platform, PriorityCode::SlightAvoid),
        (Highway::Cycleway, PriorityCode::Prefer),
        (Highway::Residential, PriorityCode::SlightPrefer),
        (Highway::LivingStreet, PriorityCode::SlightPrefer),
        (Highway::Service, PriorityCode::SlightPrefer),
    ],
    slow_maxspeed: 30.0,
    fast_maxspeed: 50.0,
    designated: PriorityCode::VeryNice,
    shared_with: &["foot"],
    shared: PriorityCode::SlightAvoid,
    side_path: None,
    routes: &["bicycle"],
    networks: ROUTE_NETWORK_LEVELS,
};

/// Routing [Profile] for bicycles, preferring cycleways and quiet roads
/// and slowing down on rough surfaces.
pub const BICYCLE_PROFILE: Profile = Profile {
    name: "bike",
    mode: Mode::Bicycle,
    access: &["access", "vehicle", "bicycle"],
    intended: FOOT_INTENDED,
    restricted: RESTRICTED,
    categories: &[
        ride(Highway::Trunk, 18.0),
        ride(Highway::TrunkLink, 18.0),
        ride(Highway::Primary, 18.0),
        ride(Highway::PrimaryLink, 18.0),
        ride(Highway::Secondary, 18.0),
        ride(Highway::SecondaryLink, 18.0),
        ride(Highway::Tertiary, 18.0),
        ride(Highway::TertiaryLink, 18.0),
        ride(Highway::Unclassified, 16.0),
        ride(Highway::Residential, 18.0),
        ride(Highway::LivingStreet, 6.0),
        ride(Highway::Service, 12.0),
        ride(Highway::Road, 12.0),
        ride(Highway::Track, 12.0),
        ride(Highway::Cycleway, 18.0),
        ride(Highway::Path, 10.0),
        ride(Highway::Footway, 6.0),
        ride(Highway::Pedestrian, 6.0),
        ride(Highway::Platform, 6.0),
        ride(Highway::Bridleway, 4.0),
        ride(Highway::Steps, 2.0),
        ride(Highway::Ford, 4.0),
    ],
    auxiliary: &[Auxiliary {
        key: "man_made",
        value: "pier",
        speed: 6.0,
    }],
    speed_modifiers: &[
        SpeedModifier {
            key: "surface",
            value: Some("unpaved"),
            effect: SpeedEffect::Cap(14.0),
        },
        SpeedModifier {
            key: "surface",
            value: Some("gravel"),
            effect: SpeedEffect::Cap(12.0),
        },
        SpeedModifier {
            key: "surface",
            value: Some("ground"),
            effect: SpeedEffect::Cap(12.0),
        },
        SpeedModifier {
            key: "surface",
            value: Some("dirt"),
            effect: SpeedEffect::Cap(10.0),
        },
        SpeedModifier {
            key: "surface",
            value: Some("sand"),
            effect: SpeedEffect::Cap(6.0),
        },
        SpeedModifier {
            key: "tracktype",
            value: Some("grade3"),
            effect: SpeedEffect::Cap(12.0),
        },
        SpeedModifier {
            key: "tracktype",
            value: Some("grade4"),
            effect: SpeedEffect::Cap(10.0),
        },
        SpeedModifier {
            key: "tracktype",
            value: Some("grade5"),
            effect: SpeedEffect::Cap(6.0),
        },
        SpeedModifier {
            key: "sac_scale",
            value: None,
            effect: SpeedEffect::Cap(4.0),
        },
        SpeedModifier {
            key: "smoothness",
            value: Some("bad"),
            effect: SpeedEffect::Factor(0.7),
        },
        SpeedModifier {
            key: "smoothness",
            value: Some("very_bad"),
            effect: SpeedEffect::Factor(0.5),
        },
    ],
    speed_bits: 4,
    speed_factor: 2.0,
    max_speed: 30.0,
    ferry_speed: 15.0,
    use_maxspeed: false,
    allowed_sac_scale: Some(&["hiking"]),
    disallow_motorroad: true,
    absolute_barriers: &["fence", "wall", "hedge", "kissing_gate", "stile", "turnstile"],
    priority: Some(&BICYCLE_PRIORITY),
};

/// Routing [Profile] for cars, following posted speed limits
/// and with appropriate [access tags](https://wiki.openstreetmap.org/wiki/Key:access).
pub const CAR_PROFILE: Profile = Profile {
    name: "car",
    mode: Mode::Car,
    access: &["access", "vehicle", "motor_vehicle", "motorcar"],
    intended: VEHICLE_INTENDED,
    restricted: VEHICLE_RESTRICTED,
    categories: &[
        ride(Highway::Motorway, 100.0),
        ride(Highway::MotorwayLink, 70.0),
        ride(Highway::Trunk, 70.0),
        ride(Highway::TrunkLink, 65.0),
        ride(Highway::Primary, 65.0),
        ride(Highway::PrimaryLink, 60.0),
        ride(Highway::Secondary, 60.0),
        ride(Highway::SecondaryLink, 50.0),
        ride(Highway::Tertiary, 50.0),
        ride(Highway::TertiaryLink, 40.0),
        ride(Highway::Unclassified, 30.0),
        ride(Highway::Residential, 30.0),
        ride(Highway::LivingStreet, 5.0),
        ride(Highway::Service, 20.0),
        ride(Highway::Road, 20.0),
        ride(Highway::Track, 15.0),
    ],
    auxiliary: &[],
    speed_modifiers: &[
        SpeedModifier {
            key: "surface",
            value: Some("unpaved"),
            effect: SpeedEffect::Cap(30.0),
        },
        SpeedModifier {
            key: "surface",
            value: Some("gravel"),
            effect: SpeedEffect::Cap(30.0),
        },
        SpeedModifier {
            key: "surface",
            value: Some("dirt"),
            effect: SpeedEffect::Cap(20.0),
        },
        SpeedModifier {
            key: "tracktype",
            value: Some("grade4"),
            effect: SpeedEffect::Cap(10.0),
        },
        SpeedModifier {
            key: "tracktype",
            value: Some("grade5"),
            effect: SpeedEffect::Cap(5.0),
        },
    ],
    speed_bits: 5,
    speed_factor: 5.0,
    max_speed: 140.0,
    ferry_speed: 20.0,
    use_maxspeed: true,
    allowed_sac_scale: None,
    disallow_motorroad: false,
    absolute_barriers: &[
        "kissing_gate",
        "fence",
        "wall",
        "hedge",
        "bollard",
        "stile",
        "turnstile",
        "cycle_barrier",
        "motorcycle_barrier",
        "block",
        "bus_trap",
        "sump_buster",
        "jersey_barrier",
    ],
    priority: None,
};

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use chrono::NaiveDate;

use crate::ev::{BooleanEncodedValue, ConfigError, Direction, Registry};

use super::barrier;
use super::conditional::ConditionalInspector;
use super::profile::Profile;
use super::tags::{is_ferry_route, Tags, TagsExt};
use super::Options;

/// Result of classifying a way for a single travel mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WayAccess {
    /// The way is accessible.
    Way,

    /// The way is an accessible ferry route.
    Ferry,

    /// The way can't be used by the mode.
    Skip,
}

impl WayAccess {
    pub fn is_way(self) -> bool {
        self == Self::Way
    }

    pub fn is_ferry(self) -> bool {
        self == Self::Ferry
    }

    pub fn can_skip(self) -> bool {
        self == Self::Skip
    }
}

/// Decision of an active `<key>:conditional` tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conditional {
    Restricted,
    Permitted,
}

/// Everything an access rule may look at.
struct WayContext<'a> {
    profile: &'a Profile<'a>,
    options: Options,
    inspector: ConditionalInspector,
    tags: &'a Tags,
}

impl<'a> WayContext<'a> {
    /// Returns the decision of the first active conditional tag,
    /// starting from the most specific key of the access hierarchy.
    fn conditional(&self) -> Option<Conditional> {
        self.profile.access.iter().rev().find_map(|&key| {
            let raw = self.tags.tag(&format!("{key}:conditional"))?;
            let value = self.inspector.active_value(raw)?;
            if self.profile.is_restricted(value, self.options) {
                Some(Conditional::Restricted)
            } else if self.profile.is_intended(value) {
                Some(Conditional::Permitted)
            } else {
                None
            }
        })
    }
}

type Rule = fn(&WayContext<'_>) -> Option<WayAccess>;

/// Rules for ways with a `highway=*` tag, evaluated top-down. The first decision wins.
const HIGHWAY_RULES: &[Rule] = &[
    sac_scale,
    conditional_restriction,
    conditional_permission,
    access_tags,
    sidewalk,
    category,
    motorroad,
    ford,
];

fn sac_scale(ctx: &WayContext<'_>) -> Option<WayAccess> {
    let allowed = ctx.profile.allowed_sac_scale?;
    let value = ctx.tags.tag("sac_scale")?;
    if allowed.contains(&value) {
        None
    } else {
        Some(WayAccess::Skip)
    }
}

fn conditional_restriction(ctx: &WayContext<'_>) -> Option<WayAccess> {
    match ctx.conditional()? {
        Conditional::Restricted => Some(WayAccess::Skip),
        Conditional::Permitted => None,
    }
}

fn conditional_permission(ctx: &WayContext<'_>) -> Option<WayAccess> {
    match ctx.conditional()? {
        Conditional::Permitted => Some(WayAccess::Way),
        Conditional::Restricted => None,
    }
}

fn access_tags(ctx: &WayContext<'_>) -> Option<WayAccess> {
    let value = ctx.profile.access_value(ctx.tags)?;
    if ctx.profile.is_restricted(value, ctx.options) {
        Some(WayAccess::Skip)
    } else if ctx.profile.is_intended(value) {
        Some(WayAccess::Way)
    } else {
        None
    }
}

fn sidewalk(ctx: &WayContext<'_>) -> Option<WayAccess> {
    if ctx.profile.apply_foot_exceptions()
        && ctx
            .tags
            .has_tag_in("sidewalk", &["yes", "both", "left", "right"])
    {
        Some(WayAccess::Way)
    } else {
        None
    }
}

fn category(ctx: &WayContext<'_>) -> Option<WayAccess> {
    match ctx.profile.category(ctx.tags) {
        Some(c) if c.access => None,
        _ => Some(WayAccess::Skip),
    }
}

fn motorroad(ctx: &WayContext<'_>) -> Option<WayAccess> {
    if ctx.profile.disallow_motorroad && ctx.tags.has_tag("motorroad", "yes") {
        Some(WayAccess::Skip)
    } else {
        None
    }
}

fn ford(ctx: &WayContext<'_>) -> Option<WayAccess> {
    let is_ford =
        ctx.tags.has_tag("highway", "ford") || ctx.tags.tag("ford").is_some_and(|v| v != "no");
    if ctx.options.block_fords && is_ford {
        Some(WayAccess::Skip)
    } else {
        None
    }
}

/// Classifies ways without a `highway=*` tag: ferries and auxiliary ways (platforms, piers).
fn classify_without_highway(ctx: &WayContext<'_>) -> WayAccess {
    let candidate = if is_ferry_route(ctx.tags) {
        match ctx.profile.mode_value(ctx.tags) {
            None => WayAccess::Ferry,
            Some(v) if ctx.profile.is_intended(v) => WayAccess::Ferry,
            Some(_) => WayAccess::Skip,
        }
    } else if ctx.profile.auxiliary(ctx.tags).is_some() {
        WayAccess::Way
    } else {
        WayAccess::Skip
    };

    if candidate.can_skip() {
        return candidate;
    }

    match ctx.conditional() {
        Some(Conditional::Restricted) => WayAccess::Skip,
        Some(Conditional::Permitted) => candidate,
        None => {
            let any_restricted = ctx
                .profile
                .access
                .iter()
                .filter_map(|&key| ctx.tags.tag(key))
                .any(|v| ctx.profile.is_restricted(v, ctx.options));
            if any_restricted {
                WayAccess::Skip
            } else {
                candidate
            }
        }
    }
}

/// Decides whether a travel mode may use a way (and in which directions),
/// and whether nodes are barriers to it.
#[derive(Debug, Clone)]
pub struct AccessParser<'p> {
    profile: &'p Profile<'p>,
    options: Options,
    inspector: ConditionalInspector,
    access_enc: BooleanEncodedValue,
}

impl<'p> AccessParser<'p> {
    /// Binds the profile's access encoded value from a built registry.
    /// The value must be [directional](BooleanEncodedValue::is_directional).
    ///
    /// Conditional tags are evaluated against the local date of each call,
    /// unless a [reference date](AccessParser::with_reference_date) is set.
    pub fn new(
        registry: &Registry,
        profile: &'p Profile<'p>,
        options: Options,
    ) -> Result<Self, ConfigError> {
        let access_enc = registry.boolean(&profile.access_value_name())?;
        if !access_enc.is_directional() {
            return Err(ConfigError::NotDirectional(access_enc.name().to_string()));
        }

        Ok(Self {
            profile,
            options,
            inspector: ConditionalInspector::default(),
            access_enc,
        })
    }

    /// Evaluates conditional tags against the given date instead of today.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.inspector = ConditionalInspector::new(date);
        self
    }

    pub fn access_enc(&self) -> &BooleanEncodedValue {
        &self.access_enc
    }

    pub fn options(&self) -> Options {
        self.options
    }

    fn context<'a>(&'a self, tags: &'a Tags) -> WayContext<'a> {
        WayContext {
            profile: self.profile,
            options: self.options,
            inspector: self.inspector,
            tags,
        }
    }

    /// Classifies a way as [accessible](WayAccess::Way), a [ferry](WayAccess::Ferry)
    /// or [not accessible](WayAccess::Skip).
    pub fn get_access(&self, tags: &Tags) -> WayAccess {
        let ctx = self.context(tags);
        let access = if tags.contains_key("highway") {
            HIGHWAY_RULES
                .iter()
                .find_map(|rule| rule(&ctx))
                .unwrap_or(WayAccess::Way)
        } else {
            classify_without_highway(&ctx)
        };

        log::trace!("{}: way {:?} classified as {:?}", self.profile.name, tags, access);
        access
    }

    /// Returns whether the way may be traversed forward and backward,
    /// assuming it is accessible at all.
    ///
    /// One-way tags are considered first (see [Profile::way_direction]).
    /// Directional access tags (`<key>:forward`, `<key>:backward`) override them.
    /// If only one direction is explicitly allowed, the other one is forbidden.
    pub fn way_directions(&self, tags: &Tags) -> (bool, bool) {
        let (forward, backward) = self.profile.way_direction(tags);

        match (
            self.directional_access(tags, "forward"),
            self.directional_access(tags, "backward"),
        ) {
            (Some(f), Some(b)) => (f, b),
            (Some(true), None) => (true, false),
            (Some(false), None) => (false, backward),
            (None, Some(true)) => (false, true),
            (None, Some(false)) => (forward, false),
            (None, None) => (forward, backward),
        }
    }

    /// Returns the decision of the most specific `<key>:<suffix>` tag
    /// with an intended or restricted value.
    fn directional_access(&self, tags: &Tags, suffix: &str) -> Option<bool> {
        self.profile.access.iter().rev().find_map(|&key| {
            let value = tags.tag(&format!("{key}:{suffix}"))?;
            if self.profile.is_restricted(value, self.options) {
                Some(false)
            } else if self.profile.is_intended(value) {
                Some(true)
            } else {
                None
            }
        })
    }

    /// Classifies a way and stores its per-direction access in the record.
    /// Nothing is written for [skipped](WayAccess::Skip) ways.
    pub fn handle_way_tags(&self, record: &mut [u32], tags: &Tags) -> WayAccess {
        let access = self.get_access(tags);
        if access.can_skip() {
            return access;
        }

        let (forward, backward) = self.way_directions(tags);
        if !forward && !backward {
            return WayAccess::Skip;
        }

        self.access_enc
            .set_bool(Direction::Forward, record, forward);
        self.access_enc
            .set_bool(Direction::Backward, record, backward);
        access
    }

    /// Checks if a node with the given tags blocks the mode.
    pub fn is_barrier(&self, node_tags: &Tags) -> bool {
        barrier::is_barrier(self.profile, self.options, node_tags)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{BICYCLE_PROFILE, CAR_PROFILE, FOOT_PROFILE};
    use super::*;

    fn parser(
        profile: &'static Profile<'static>,
        options: Options,
    ) -> (Registry, AccessParser<'static>) {
        let mut r = Registry::new();
        profile.register(&mut r).unwrap();
        r.build().unwrap();
        let p = AccessParser::new(&r, profile, options).unwrap();
        (r, p)
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn requires_directional_access() {
        let mut r = Registry::new();
        r.add(crate::ev::EncodedValue::boolean("foot_access", false))
            .unwrap();
        r.build().unwrap();
        assert_eq!(
            AccessParser::new(&r, &FOOT_PROFILE, Options::default()).unwrap_err(),
            ConfigError::NotDirectional("foot_access".to_string()),
        );

        let empty = {
            let mut r = Registry::new();
            r.build().unwrap();
            r
        };
        assert_eq!(
            AccessParser::new(&empty, &FOOT_PROFILE, Options::default()).unwrap_err(),
            ConfigError::Unknown("foot_access".to_string()),
        );
    }

    #[test]
    fn sac_scale() {
        let (_, foot) = parser(&FOOT_PROFILE, Options::default());
        let (_, bike) = parser(&BICYCLE_PROFILE, Options::default());
        let (_, car) = parser(&CAR_PROFILE, Options::default());

        let hiking = tags! {"highway": "track", "sac_scale": "mountain_hiking"};
        assert!(foot.get_access(&hiking).is_way());
        assert!(bike.get_access(&hiking).can_skip());
        assert!(car.get_access(&hiking).is_way());

        let climbing = tags! {"highway": "path", "sac_scale": "difficult_alpine_hiking"};
        assert!(foot.get_access(&climbing).can_skip());
    }

    #[test]
    fn conditional_dates() {
        let (_, p) = parser(&FOOT_PROFILE, Options::default());
        let p = p.with_reference_date(date(2025, 7, 1));

        let tags = tags! {"highway": "path", "foot:conditional": "no @ (Jun-Aug)"};
        assert!(p.get_access(&tags).can_skip());

        let tags = tags! {"highway": "path", "foot:conditional": "no @ (Nov-Mar)"};
        assert!(p.get_access(&tags).is_way());

        // the most specific key is inspected first
        let tags = tags! {
            "highway": "path",
            "access:conditional": "no @ (Jun-Aug)",
            "foot:conditional": "yes @ (2025)"
        };
        assert!(p.get_access(&tags).is_way());

        // malformed conditions are ignored
        let tags = tags! {"highway": "path", "foot:conditional": "no @ (sunrise-sunset)"};
        assert!(p.get_access(&tags).is_way());
    }

    #[test]
    fn private() {
        let tags = tags! {"highway": "service", "access": "private"};
        let (_, blocking) = parser(&CAR_PROFILE, Options::default());
        assert!(blocking.get_access(&tags).can_skip());

        let (_, allowing) = parser(
            &CAR_PROFILE,
            Options {
                block_private: false,
                ..Options::default()
            },
        );
        assert!(allowing.get_access(&tags).is_way());
    }

    #[test]
    fn fords() {
        let tags = tags! {"highway": "track", "ford": "yes"};
        let ford_way = tags! {"highway": "ford"};
        let (_, p) = parser(&FOOT_PROFILE, Options::default());
        assert!(p.get_access(&tags).is_way());
        assert!(p.get_access(&ford_way).is_way());

        let (_, p) = parser(
            &FOOT_PROFILE,
            Options {
                block_fords: true,
                ..Options::default()
            },
        );
        assert!(p.get_access(&tags).can_skip());
        assert!(p.get_access(&ford_way).can_skip());
        assert!(p
            .get_access(&tags! {"highway": "track", "ford": "no"})
            .is_way());

        let (_, p) = parser(&BICYCLE_PROFILE, Options::default());
        assert!(p.get_access(&ford_way).is_way());
        let (_, p) = parser(&CAR_PROFILE, Options::default());
        assert!(p.get_access(&ford_way).can_skip());
    }

    #[test]
    fn car() {
        let (_, p) = parser(&CAR_PROFILE, Options::default());
        assert!(p.get_access(&tags! {"highway": "motorway"}).is_way());
        assert!(p.get_access(&tags! {"highway": "footway"}).can_skip());
        assert!(p
            .get_access(&tags! {"highway": "footway", "sidewalk": "both"})
            .can_skip());
        assert!(p
            .get_access(&tags! {"highway": "residential", "motor_vehicle": "agricultural"})
            .can_skip());
        assert!(p
            .get_access(&tags! {"highway": "residential", "access": "no", "motorcar": "destination"})
            .is_way());
        assert!(p
            .get_access(&tags! {"highway": "primary", "motorroad": "yes"})
            .is_way());
        assert!(p.get_access(&tags! {"route": "ferry"}).is_ferry());
        assert!(p
            .get_access(&tags! {"route": "ferry", "motor_vehicle": "no"})
            .can_skip());
        assert!(p
            .get_access(&tags! {"route": "shuttle_train", "motorcar": "yes"})
            .is_ferry());
    }

    #[test]
    fn auxiliary_ways() {
        let (_, p) = parser(&FOOT_PROFILE, Options::default());
        assert!(p.get_access(&tags! {"railway": "platform"}).is_way());
        assert!(p.get_access(&tags! {"public_transport": "platform"}).is_way());
        assert!(p.get_access(&tags! {"man_made": "pier"}).is_way());
        assert!(p
            .get_access(&tags! {"man_made": "pier", "access": "private"})
            .can_skip());
        assert!(p.get_access(&tags! {"railway": "tram"}).can_skip());
        assert!(p.get_access(&tags! {}).can_skip());
    }

    #[test]
    fn way_directions() {
        let (_, foot) = parser(&FOOT_PROFILE, Options::default());
        let (_, car) = parser(&CAR_PROFILE, Options::default());

        assert_eq!(
            foot.way_directions(&tags! {"highway": "path", "foot:forward": "yes"}),
            (true, false),
        );
        assert_eq!(
            foot.way_directions(&tags! {"highway": "path", "foot:backward": "yes"}),
            (false, true),
        );
        assert_eq!(
            foot.way_directions(&tags! {"highway": "path", "foot:backward": "no"}),
            (true, false),
        );
        assert_eq!(
            foot.way_directions(
                &tags! {"highway": "path", "foot:forward": "yes", "foot:backward": "yes"}
            ),
            (true, true),
        );
        assert_eq!(
            car.way_directions(&tags! {"highway": "residential", "oneway": "yes"}),
            (true, false),
        );
        assert_eq!(
            car.way_directions(
                &tags! {"highway": "residential", "oneway": "yes", "motorcar:backward": "yes", "motorcar:forward": "no"}
            ),
            (false, true),
        );
        assert_eq!(
            car.way_directions(
                &tags! {"highway": "residential", "oneway": "-1", "vehicle:backward": "no"}
            ),
            (false, false),
        );
    }

    #[test]
    fn handle_way_tags() {
        let (r, p) = parser(&CAR_PROFILE, Options::default());
        let enc = p.access_enc();

        let mut flags = r.create_flags().unwrap();
        let access = p.handle_way_tags(&mut flags, &tags! {"highway": "motorway"});
        assert!(access.is_way());
        assert!(enc.get_bool(Direction::Forward, &flags));
        assert!(!enc.get_bool(Direction::Backward, &flags));

        let mut flags = r.create_flags().unwrap();
        let access = p.handle_way_tags(
            &mut flags,
            &tags! {"highway": "residential", "oneway": "-1", "vehicle:backward": "no"},
        );
        assert!(access.can_skip());
        assert!(flags.iter().all(|&w| w == 0));

        let mut flags = r.create_flags().unwrap();
        let access = p.handle_way_tags(&mut flags, &tags! {"highway": "footway"});
        assert!(access.can_skip());
        assert!(flags.iter().all(|&w| w == 0));
    }
}

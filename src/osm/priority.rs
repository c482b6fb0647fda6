// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::ev::{ConfigError, DecimalEncodedValue, Direction, EnumEncodedValue, Registry};

use super::category::Highway;
use super::network::RouteNetwork;
use super::profile::{PriorityRules, Profile};
use super::tags::{parse_maxspeed, Tags, TagsExt};

/// Relative preference of a way, from the worst to the best.
///
/// Levels are stored as a multiplier equal to `value / 10`,
/// so [PriorityCode::Unchanged] has a neutral multiplier of 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityCode {
    Exclude = 0,
    ReachDestination = 1,
    VeryBad = 3,
    Bad = 5,
    AvoidMore = 6,
    Avoid = 8,
    SlightAvoid = 9,
    Unchanged = 10,
    SlightPrefer = 11,
    Prefer = 12,
    VeryNice = 13,
    Best = 15,
}

impl PriorityCode {
    /// All levels, from the worst to the best.
    pub const ALL: [Self; 12] = [
        Self::Exclude,
        Self::ReachDestination,
        Self::VeryBad,
        Self::Bad,
        Self::AvoidMore,
        Self::Avoid,
        Self::SlightAvoid,
        Self::Unchanged,
        Self::SlightPrefer,
        Self::Prefer,
        Self::VeryNice,
        Self::Best,
    ];

    /// Bit width of the priority encoded value.
    pub const BITS: u8 = 4;

    /// Quantization step of the priority encoded value.
    pub const FACTOR: f64 = 0.1;

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Returns the multiplier of this level.
    pub fn factor(self) -> f64 {
        self.value() as f64 / 10.0
    }

    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.value() == value)
    }

    /// Converts a stored multiplier back into a level.
    pub fn from_factor(factor: f64) -> Option<Self> {
        let value = (factor * 10.0).round();
        if (0.0..=u8::MAX as f64).contains(&value) {
            Self::from_value(value as u8)
        } else {
            None
        }
    }

    /// Returns the next better level, or self if already the [best](PriorityCode::Best).
    pub fn better(self) -> Self {
        let idx = self.index();
        Self::ALL[(idx + 1).min(Self::ALL.len() - 1)]
    }

    /// Returns the next worse level, or self if already [excluded](PriorityCode::Exclude).
    pub fn worse(self) -> Self {
        Self::ALL[self.index().saturating_sub(1)]
    }

    fn index(self) -> usize {
        Self::ALL
            .iter()
            .position(|&p| p == self)
            .unwrap_or_default()
    }
}

/// Scores ways with a [PriorityCode] according to a profile's [PriorityRules].
#[derive(Debug, Clone)]
pub struct PriorityParser<'p> {
    profile: &'p Profile<'p>,
    rules: &'p PriorityRules<'p>,
    priority_enc: DecimalEncodedValue,
    network_enc: EnumEncodedValue<RouteNetwork>,
}

impl<'p> PriorityParser<'p> {
    /// Binds the profile's priority and route network encoded values from a built registry.
    /// Fails if the profile has no [priority rules](Profile::priority).
    pub fn new(registry: &Registry, profile: &'p Profile<'p>) -> Result<Self, ConfigError> {
        let name = profile.priority_value_name();
        let rules = profile
            .priority
            .ok_or_else(|| ConfigError::Unknown(name.clone()))?;
        let priority_enc = registry.decimal(&name)?;
        let network_enc = registry.enumeration(&profile.network_value_name())?;

        Ok(Self {
            profile,
            rules,
            priority_enc,
            network_enc,
        })
    }

    pub fn priority_enc(&self) -> &DecimalEncodedValue {
        &self.priority_enc
    }

    pub fn network_enc(&self) -> &EnumEncodedValue<RouteNetwork> {
        &self.network_enc
    }

    /// Records that a way belongs to a route relation with the given tags.
    ///
    /// Relations with a `route=*` value outside of [PriorityRules::routes] are ignored.
    /// Otherwise, the most important network seen so far is kept in the record.
    /// Must be called before [PriorityParser::handle_way_tags].
    pub fn handle_relation_tags(&self, record: &mut [u32], relation_tags: &Tags) -> RouteNetwork {
        let stored = self.network_enc.get_enum(Direction::Forward, record);
        let relevant = relation_tags
            .tag("route")
            .is_some_and(|r| self.rules.routes.contains(&r));
        if !relevant {
            return stored;
        }

        let network = RouteNetwork::from_tag(relation_tags.tag("network").unwrap_or_default());
        let network = stored.more_important(network);
        self.network_enc
            .set_enum(Direction::Forward, record, network);
        network
    }

    /// Computes the priority of a way in three stages:
    ///
    /// 1. category baseline, adjusted by maxspeed and tunnels,
    /// 2. infrastructure dedication, which is final when it applies,
    /// 3. side path (e.g. sidewalk) presence.
    ///
    /// A better `relation` priority (coming from a route the way belongs to)
    /// replaces the result.
    pub fn handle_priority(&self, tags: &Tags, relation: Option<PriorityCode>) -> PriorityCode {
        let priority = match self.dedication(tags) {
            Some(dedicated) => dedicated,
            None => self.side_path(tags, self.baseline(tags)),
        };
        relation.map_or(priority, |r| priority.max(r))
    }

    /// Computes and stores the priority of a way in the record,
    /// taking into account the route network already stored there.
    pub fn handle_way_tags(&self, record: &mut [u32], tags: &Tags) -> PriorityCode {
        let network = self.network_enc.get_enum(Direction::Forward, record);
        let priority = self.handle_priority(tags, self.rules.network_level(network));
        self.priority_enc
            .set_decimal(Direction::Forward, record, priority.factor());
        priority
    }

    fn baseline(&self, tags: &Tags) -> PriorityCode {
        let level = tags
            .tag("highway")
            .and_then(Highway::from_tag)
            .map_or(PriorityCode::Unchanged, |h| self.rules.level(h));
        let maxspeed = tags.tag("maxspeed").and_then(parse_maxspeed);

        let baseline = if level > PriorityCode::Unchanged {
            level
        } else if maxspeed.is_some_and(|m| m <= self.rules.slow_maxspeed) {
            PriorityCode::Prefer
        } else if level < PriorityCode::Unchanged {
            level
        } else if maxspeed.is_some_and(|m| m > self.rules.fast_maxspeed) {
            PriorityCode::Avoid
        } else {
            PriorityCode::Unchanged
        };

        if baseline > PriorityCode::Unchanged && tags.tag("tunnel").is_some_and(|t| t != "no") {
            PriorityCode::Unchanged
        } else {
            baseline
        }
    }

    fn dedication(&self, tags: &Tags) -> Option<PriorityCode> {
        let own_mode = self.profile.access.last().and_then(|&key| tags.tag(key));
        if own_mode == Some("designated") {
            return Some(self.rules.designated);
        }

        let shared = self
            .rules
            .shared_with
            .iter()
            .any(|&key| tags.has_tag_in(key, &["designated", "official"]));
        if shared {
            Some(self.rules.shared)
        } else {
            None
        }
    }

    fn side_path(&self, tags: &Tags, baseline: PriorityCode) -> PriorityCode {
        let Some(key) = self.rules.side_path else {
            return baseline;
        };

        match tags.tag(key) {
            Some("yes" | "both" | "left" | "right") if baseline < PriorityCode::Unchanged => {
                baseline.better()
            }
            Some("no" | "none" | "separate") if baseline <= PriorityCode::Unchanged => {
                baseline.min(PriorityCode::Avoid)
            }
            _ => baseline,
        }
    }
}

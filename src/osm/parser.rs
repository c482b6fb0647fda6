// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use chrono::NaiveDate;

use crate::ev::{ConfigError, Registry};

use super::access::{AccessParser, WayAccess};
use super::priority::PriorityParser;
use super::profile::Profile;
use super::speed::SpeedParser;
use super::tags::Tags;
use super::Options;

/// Combines the access, speed and priority parsers of a single [Profile].
///
/// ```
/// use wayflags::ev::{Direction, Registry};
/// use wayflags::osm::{Options, Tags, WayParser, FOOT_PROFILE};
///
/// let mut registry = Registry::new();
/// FOOT_PROFILE.register(&mut registry)?;
/// registry.build()?;
///
/// let parser = WayParser::new(&registry, &FOOT_PROFILE, Options::default())?;
/// let tags = Tags::from_iter([("highway".to_string(), "steps".to_string())]);
///
/// let mut flags = registry.create_flags()?;
/// assert!(parser.handle_way_tags(&mut flags, &tags).is_way());
///
/// let speed = registry.decimal("foot_average_speed")?;
/// assert_eq!(speed.get_decimal(Direction::Forward, &flags), 3.0);
/// # Ok::<(), wayflags::ev::ConfigError>(())
/// ```
#[derive(Debug, Clone)]
pub struct WayParser<'p> {
    access: AccessParser<'p>,
    speed: SpeedParser<'p>,
    priority: Option<PriorityParser<'p>>,
}

impl<'p> WayParser<'p> {
    /// Binds all encoded values of the profile (see [Profile::register]) from a built registry.
    pub fn new(
        registry: &Registry,
        profile: &'p Profile<'p>,
        options: Options,
    ) -> Result<Self, ConfigError> {
        let priority = match profile.priority {
            Some(_) => Some(PriorityParser::new(registry, profile)?),
            None => None,
        };

        Ok(Self {
            access: AccessParser::new(registry, profile, options)?,
            speed: SpeedParser::new(registry, profile)?,
            priority,
        })
    }

    /// Evaluates conditional tags against the given date instead of today.
    pub fn with_reference_date(mut self, date: NaiveDate) -> Self {
        self.access = self.access.with_reference_date(date);
        self
    }

    pub fn access(&self) -> &AccessParser<'p> {
        &self.access
    }

    pub fn speed(&self) -> &SpeedParser<'p> {
        &self.speed
    }

    pub fn priority(&self) -> Option<&PriorityParser<'p>> {
        self.priority.as_ref()
    }

    /// Stores access, speed and priority of a way in the record.
    /// Nothing is written for [skipped](WayAccess::Skip) ways.
    pub fn handle_way_tags(&self, record: &mut [u32], tags: &Tags) -> WayAccess {
        let access = self.access.handle_way_tags(record, tags);
        if access.can_skip() {
            return access;
        }

        self.speed.handle_way_tags(record, tags);
        if let Some(priority) = &self.priority {
            priority.handle_way_tags(record, tags);
        }
        access
    }

    /// Records the route network of a relation the way belongs to,
    /// see [PriorityParser::handle_relation_tags]. Call before [WayParser::handle_way_tags].
    pub fn handle_relation_tags(&self, record: &mut [u32], relation_tags: &Tags) {
        if let Some(priority) = &self.priority {
            priority.handle_relation_tags(record, relation_tags);
        }
    }

    /// Checks if a node with the given tags blocks the profile's mode.
    pub fn is_barrier(&self, node_tags: &Tags) -> bool {
        self.access.is_barrier(node_tags)
    }
}

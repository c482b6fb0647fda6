// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use crate::ev::{ConfigError, DecimalEncodedValue, Direction, Registry};

use super::profile::Profile;
use super::tags::{is_ferry_route, parse_duration, parse_maxspeed, Tags, TagsExt};

/// Share of the posted [maxspeed](https://wiki.openstreetmap.org/wiki/Key:maxspeed)
/// assumed as the average speed.
const MAXSPEED_FACTOR: f64 = 0.9;

/// Resolves the average speed of ways and stores it in the profile's speed encoded value.
#[derive(Debug, Clone)]
pub struct SpeedParser<'p> {
    profile: &'p Profile<'p>,
    speed_enc: DecimalEncodedValue,
}

impl<'p> SpeedParser<'p> {
    /// Binds the profile's average speed encoded value from a built registry.
    pub fn new(registry: &Registry, profile: &'p Profile<'p>) -> Result<Self, ConfigError> {
        let speed_enc = registry.decimal(&profile.speed_value_name())?;
        Ok(Self { profile, speed_enc })
    }

    pub fn speed_enc(&self) -> &DecimalEncodedValue {
        &self.speed_enc
    }

    /// Returns the average speed of a way in km/h, or [None] if the profile
    /// has no speed for the way at all.
    ///
    /// The speed never exceeds the profile's maximum speed (rounded up to the
    /// next storable value), and positive speeds are never rounded down to zero.
    pub fn get_speed(&self, tags: &Tags) -> Option<f64> {
        self.raw_speed(tags).map(|speed| self.clamp(speed))
    }

    /// Resolves the speed of a way and stores it in the record.
    /// Nothing is written if there is no speed.
    pub fn handle_way_tags(&self, record: &mut [u32], tags: &Tags) -> Option<f64> {
        let speed = self.get_speed(tags)?;
        self.speed_enc.set_decimal(Direction::Forward, record, speed);
        if self.speed_enc.is_directional() {
            self.speed_enc
                .set_decimal(Direction::Backward, record, speed);
        }
        Some(speed)
    }

    fn raw_speed(&self, tags: &Tags) -> Option<f64> {
        if is_ferry_route(tags) {
            return Some(self.ferry_speed(tags));
        }

        let mut speed = self
            .profile
            .category(tags)
            .map(|c| c.speed)
            .or_else(|| self.profile.auxiliary(tags).map(|a| a.speed))?;

        if self.profile.use_maxspeed {
            if let Some(maxspeed) = tags.tag("maxspeed").and_then(parse_maxspeed) {
                speed = maxspeed * MAXSPEED_FACTOR;
            }
        }

        Some(self.apply_modifiers(tags, speed))
    }

    /// Applies matching [speed modifiers](Profile::speed_modifiers) in table order.
    /// Only the last matching modifier of every key is applied.
    fn apply_modifiers(&self, tags: &Tags, speed: f64) -> f64 {
        let modifiers = self.profile.speed_modifiers;
        modifiers
            .iter()
            .enumerate()
            .filter(|(_, m)| m.matches(tags))
            .filter(|&(idx, m)| {
                !modifiers[idx + 1..]
                    .iter()
                    .any(|later| later.key == m.key && later.matches(tags))
            })
            .fold(speed, |speed, (_, m)| m.effect.apply(speed))
    }

    /// Returns the speed of a ferry route, derived from its duration if possible.
    fn ferry_speed(&self, tags: &Tags) -> f64 {
        if let Some(speed) = tags.tag_f64("speed_from_duration").filter(|&s| s > 0.0) {
            return speed;
        }

        let duration = tags
            .tag_f64("duration:seconds")
            .or_else(|| tags.tag("duration").and_then(parse_duration))
            .filter(|&d| d > 0.0);
        let distance = tags.tag_f64("edge_distance").filter(|&d| d > 0.0);

        match (distance, duration) {
            (Some(distance), Some(duration)) => distance / duration * 3.6,
            _ => self.profile.ferry_speed,
        }
    }

    fn clamp(&self, speed: f64) -> f64 {
        let max = self
            .speed_enc
            .next_storable_value(self.profile.max_speed)
            .min(self.speed_enc.max_storable_value());
        let speed = speed.min(max);
        if speed > 0.0 {
            speed.max(self.speed_enc.factor())
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::{BICYCLE_PROFILE, CAR_PROFILE, FOOT_PROFILE};
    use super::*;

    fn parser(profile: &'static Profile<'static>) -> (Registry, SpeedParser<'static>) {
        let mut r = Registry::new();
        profile.register(&mut r).unwrap();
        r.build().unwrap();
        let p = SpeedParser::new(&r, profile).unwrap();
        (r, p)
    }

    #[test]
    fn foot_categories() {
        let (_, p) = parser(&FOOT_PROFILE);
        assert_eq!(p.get_speed(&tags! {"highway": "service"}), Some(5.0));
        assert_eq!(p.get_speed(&tags! {"highway": "steps"}), Some(3.0));
        assert_eq!(p.get_speed(&tags! {"highway": "motorway"}), Some(5.0));
        assert_eq!(p.get_speed(&tags! {"railway": "platform"}), Some(5.0));
        assert_eq!(p.get_speed(&tags! {"man_made": "pier"}), Some(5.0));
        assert_eq!(p.get_speed(&tags! {"railway": "tram"}), None);
        assert_eq!(p.get_speed(&tags! {"highway": "proposed"}), None);
    }

    #[test]
    fn sac_scale_last_match_wins() {
        let (_, p) = parser(&FOOT_PROFILE);
        assert_eq!(
            p.get_speed(&tags! {"highway": "track", "sac_scale": "hiking"}),
            Some(5.0)
        );
        assert_eq!(
            p.get_speed(&tags! {"highway": "track", "sac_scale": "mountain_hiking"}),
            Some(2.0)
        );
        assert_eq!(
            p.get_speed(&tags! {"highway": "steps", "sac_scale": "hiking"}),
            Some(3.0)
        );
    }

    #[test]
    fn modifiers_with_different_keys_stack() {
        let (_, p) = parser(&BICYCLE_PROFILE);
        assert_eq!(p.get_speed(&tags! {"highway": "cycleway"}), Some(18.0));
        assert_eq!(
            p.get_speed(&tags! {"highway": "cycleway", "surface": "gravel"}),
            Some(12.0)
        );
        let speed = p
            .get_speed(&tags! {"highway": "cycleway", "surface": "gravel", "smoothness": "bad"})
            .unwrap();
        assert_almost_eq!(speed, 8.4);
        assert_eq!(
            p.get_speed(&tags! {"highway": "track", "tracktype": "grade5", "surface": "dirt"}),
            Some(6.0)
        );
    }

    #[test]
    fn ferry() {
        let (_, p) = parser(&FOOT_PROFILE);
        let tags = tags! {
            "route": "ferry",
            "duration:seconds": "1800",
            "edge_distance": "30000.0",
            "speed_from_duration": "60"
        };
        assert_eq!(p.get_speed(&tags), Some(15.0));

        let tags = tags! {"route": "ferry", "duration:seconds": "3600", "edge_distance": "8000"};
        assert_almost_eq!(p.get_speed(&tags).unwrap(), 8.0);

        let tags = tags! {"route": "ferry", "duration": "01:00", "edge_distance": "4000"};
        assert_almost_eq!(p.get_speed(&tags).unwrap(), 4.0);

        let tags = tags! {"route": "ferry", "duration": "soon", "edge_distance": "4000"};
        assert_eq!(p.get_speed(&tags), Some(FOOT_PROFILE.ferry_speed));

        let (_, car) = parser(&CAR_PROFILE);
        assert_eq!(car.get_speed(&tags! {"route": "ferry"}), Some(20.0));
    }

    #[test]
    fn car_maxspeed() {
        let (_, p) = parser(&CAR_PROFILE);
        assert_eq!(p.get_speed(&tags! {"highway": "primary"}), Some(65.0));
        assert_almost_eq!(
            p.get_speed(&tags! {"highway": "primary", "maxspeed": "50"})
                .unwrap(),
            45.0
        );
        assert_eq!(
            p.get_speed(&tags! {"highway": "motorway", "maxspeed": "none"}),
            Some(100.0)
        );
        assert_eq!(
            p.get_speed(&tags! {"highway": "motorway", "maxspeed": "300"}),
            Some(140.0)
        );
        assert_eq!(
            p.get_speed(&tags! {"highway": "track", "maxspeed": "50", "tracktype": "grade5"}),
            Some(5.0)
        );
    }

    #[test]
    fn slow_speeds_are_not_lost() {
        let (_, p) = parser(&BICYCLE_PROFILE);
        // 2 km/h * 0.5 would round down to zero with a factor of 2
        assert_eq!(
            p.get_speed(&tags! {"highway": "steps", "smoothness": "very_bad"}),
            Some(2.0)
        );
    }

    #[test]
    fn handle_way_tags() {
        let (r, p) = parser(&FOOT_PROFILE);
        let enc = p.speed_enc();

        let mut flags = r.create_flags().unwrap();
        assert_eq!(
            p.handle_way_tags(&mut flags, &tags! {"highway": "steps"}),
            Some(3.0)
        );
        assert_eq!(enc.get_decimal(Direction::Forward, &flags), 3.0);
        assert_eq!(enc.get_decimal(Direction::Backward, &flags), 3.0);

        let mut flags = r.create_flags().unwrap();
        assert_eq!(p.handle_way_tags(&mut flags, &tags! {"railway": "tram"}), None);
        assert!(flags.iter().all(|&w| w == 0));
    }
}

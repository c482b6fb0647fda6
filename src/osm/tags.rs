// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Tags of an OSM way or node.
pub type Tags = HashMap<String, String>;

/// Conversion factor from miles per hour to kilometers per hour.
const MPH: f64 = 1.609344;

/// Conversion factor from knots to kilometers per hour.
const KNOTS: f64 = 1.852;

/// Speed assumed for `maxspeed=walk`, in km/h.
const WALK_SPEED: f64 = 6.0;

/// Convenience lookups over [Tags].
pub(crate) trait TagsExt {
    fn tag(&self, key: &str) -> Option<&str>;

    fn has_tag(&self, key: &str, value: &str) -> bool {
        self.tag(key) == Some(value)
    }

    fn has_tag_in(&self, key: &str, values: &[&str]) -> bool {
        self.tag(key).is_some_and(|v| values.contains(&v))
    }

    /// Parses a numeric tag. Unparseable and non-finite values are treated as absent.
    fn tag_f64(&self, key: &str) -> Option<f64> {
        self.tag(key)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    }
}

impl TagsExt for Tags {
    fn tag(&self, key: &str) -> Option<&str> {
        self.get(key).map(|v| v.as_str())
    }
}

/// Checks if a way is a [ferry](https://wiki.openstreetmap.org/wiki/Tag:route%3Dferry)
/// (or a car shuttle train) route without a `highway=*` tag.
pub(crate) fn is_ferry_route(tags: &Tags) -> bool {
    !tags.contains_key("highway") && tags.has_tag_in("route", &["ferry", "shuttle_train"])
}

/// Parses a [maxspeed](https://wiki.openstreetmap.org/wiki/Key:maxspeed) value into km/h.
///
/// Supports plain numbers, `km/h`, `mph` and `knots` units, and `walk`.
/// Only the first of `;`-separated values is considered.
/// Symbolic values like `none` or `signals` return [None].
pub(crate) fn parse_maxspeed(value: &str) -> Option<f64> {
    let value = value.split(';').next().unwrap_or("").trim();
    if value == "walk" {
        return Some(WALK_SPEED);
    }

    let split_at = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split_at);
    let number: f64 = number.parse().ok()?;

    let multiplier = match unit.trim() {
        "" | "km/h" | "kmh" | "kph" => 1.0,
        "mph" => MPH,
        "knots" => KNOTS,
        _ => return None,
    };

    Some(number * multiplier).filter(|&v| v.is_finite() && v > 0.0)
}

/// Parses a [duration](https://wiki.openstreetmap.org/wiki/Key:duration) value into seconds.
///
/// Supported formats: `MM`, `HH:MM`, `HH:MM:SS` and ISO 8601 `PT#H#M#S`.
pub(crate) fn parse_duration(value: &str) -> Option<f64> {
    let value = value.trim();
    if let Some(iso) = value.strip_prefix("PT") {
        return parse_iso_duration(iso);
    }

    let parts = value
        .split(':')
        .map(|p| p.trim().parse::<f64>().ok().filter(|&x| x >= 0.0))
        .collect::<Option<Vec<_>>>()?;

    let seconds = match parts.as_slice() {
        [m] => m * 60.0,
        [h, m] => h * 3600.0 + m * 60.0,
        [h, m, s] => h * 3600.0 + m * 60.0 + s,
        _ => return None,
    };
    Some(seconds).filter(|s| s.is_finite())
}

fn parse_iso_duration(mut value: &str) -> Option<f64> {
    let mut seconds = 0.0;
    let mut any = false;

    while !value.is_empty() {
        let idx = value.find(|c: char| c.is_ascii_alphabetic())?;
        let number: f64 = value[..idx].parse().ok()?;
        let multiplier = match &value[idx..idx + 1] {
            "H" => 3600.0,
            "M" => 60.0,
            "S" => 1.0,
            _ => return None,
        };
        seconds += number * multiplier;
        any = true;
        value = &value[idx + 1..];
    }

    if any {
        Some(seconds)
    } else {
        None
    }
}

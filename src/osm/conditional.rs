// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Evaluation of [conditional restrictions](https://wiki.openstreetmap.org/wiki/Conditional_restrictions)
//! with date-range conditions, like `access:conditional=no @ (2025 Mar 10-2025 Apr 5)`.
//!
//! Supported conditions are years (`2025`), months (`Mar`), days (`Mar 10`),
//! full dates (`2025 Mar 10`), weekdays (`Mon`, `Mo`) and ranges between two
//! conditions of the same kind (`Nov-Mar`, `Sat-Sun`). Ranges without a year wrap
//! around the end of the year (or week). Several ranges may be separated by commas.
//! Everything else, like opening hours or `AND`-combined conditions, is never active.

use chrono::{Datelike, Local, NaiveDate, Weekday};

/// Error which can occur when parsing a conditional value.
/// Such errors are never surfaced - malformed conditions are simply inactive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ConditionalError {
    #[error("missing '@' in {0:?}")]
    MissingCondition(String),

    #[error("unsupported condition {0:?}")]
    Unsupported(String),

    #[error("invalid date {0:?}")]
    InvalidDate(String),
}

/// Decides which conditional values apply on a reference date.
///
/// The [Default] inspector has no fixed date and reads the local date
/// on every evaluation, so long-lived inspectors follow the clock past midnight.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ConditionalInspector {
    fixed: Option<NaiveDate>,
}

impl ConditionalInspector {
    /// Creates an inspector evaluating conditions against the given date.
    pub fn new(date: NaiveDate) -> Self {
        Self { fixed: Some(date) }
    }

    /// Returns the date set by [ConditionalInspector::new], if any.
    pub fn fixed_date(&self) -> Option<NaiveDate> {
        self.fixed
    }

    /// Returns the date conditions are currently evaluated against.
    pub fn reference_date(&self) -> NaiveDate {
        self.fixed.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Returns the value of the first `value @ (condition)` entry
    /// from a conditional tag whose condition is active on the reference date.
    pub fn active_value<'t>(&self, raw: &'t str) -> Option<&'t str> {
        let entries = match split_entries(raw) {
            Ok(entries) => entries,
            Err(e) => {
                log::debug!("ignoring conditional value: {e}");
                return None;
            }
        };

        entries
            .into_iter()
            .find(|&(_, condition)| match self.is_active(condition) {
                Ok(active) => active,
                Err(e) => {
                    log::debug!("ignoring condition: {e}");
                    false
                }
            })
            .map(|(value, _)| value)
    }

    fn is_active(&self, condition: &str) -> Result<bool, ConditionalError> {
        if condition.contains(" AND ") {
            return Err(ConditionalError::Unsupported(condition.to_string()));
        }

        let ranges = condition
            .split(',')
            .map(DateRange::parse)
            .collect::<Result<Vec<_>, _>>()?;
        let date = self.reference_date();
        Ok(ranges.iter().any(|r| r.contains(date)))
    }
}

/// Splits `value @ (condition); value @ condition` into (value, condition) pairs,
/// ignoring semicolons inside parentheses.
fn split_entries(raw: &str) -> Result<Vec<(&str, &str)>, ConditionalError> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (idx, c) in raw.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                entries.push(split_entry(&raw[start..idx])?);
                start = idx + 1;
            }
            _ => {}
        }
    }
    entries.push(split_entry(&raw[start..])?);
    Ok(entries)
}

fn split_entry(entry: &str) -> Result<(&str, &str), ConditionalError> {
    let (value, condition) = entry
        .split_once('@')
        .ok_or_else(|| ConditionalError::MissingCondition(entry.trim().to_string()))?;

    let condition = condition.trim();
    let condition = condition
        .strip_prefix('(')
        .and_then(|c| c.strip_suffix(')'))
        .unwrap_or(condition)
        .trim();
    Ok((value.trim(), condition))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatePoint {
    Year(i32),
    Day {
        year: Option<i32>,
        month: u32,
        day: Option<u32>,
    },
    Weekday(Weekday),
}

impl DatePoint {
    fn parse(s: &str) -> Result<Self, ConditionalError> {
        let invalid = || ConditionalError::InvalidDate(s.trim().to_string());
        let tokens: Vec<&str> = s.split_whitespace().collect();

        let point = match tokens.as_slice() {
            [t] => {
                if let Some(year) = parse_year(t) {
                    Self::Year(year)
                } else if let Some(month) = parse_month(t) {
                    Self::Day {
                        year: None,
                        month,
                        day: None,
                    }
                } else if let Some(weekday) = parse_weekday(t) {
                    Self::Weekday(weekday)
                } else {
                    return Err(invalid());
                }
            }

            [a, b] => match (parse_year(a), parse_month(a)) {
                (Some(year), _) => Self::Day {
                    year: Some(year),
                    month: parse_month(b).ok_or_else(invalid)?,
                    day: None,
                },
                (None, Some(month)) => Self::Day {
                    year: None,
                    month,
                    day: Some(parse_day(b).ok_or_else(invalid)?),
                },
                (None, None) => return Err(invalid()),
            },

            [y, m, d] => Self::Day {
                year: Some(parse_year(y).ok_or_else(invalid)?),
                month: parse_month(m).ok_or_else(invalid)?,
                day: Some(parse_day(d).ok_or_else(invalid)?),
            },

            _ => return Err(invalid()),
        };

        if let Self::Day {
            year: Some(year),
            month,
            day: Some(day),
        } = point
        {
            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
        }

        Ok(point)
    }
}

/// Inclusive range between two [DatePoints](DatePoint) of the same kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DateRange {
    from: DatePoint,
    to: DatePoint,
}

impl DateRange {
    fn parse(s: &str) -> Result<Self, ConditionalError> {
        let (from, to) = match s.split_once('-') {
            Some((from, to)) => (DatePoint::parse(from)?, DatePoint::parse(to)?),
            None => {
                let p = DatePoint::parse(s)?;
                (p, p)
            }
        };

        let to = match (from, to) {
            (DatePoint::Year(_), DatePoint::Year(_))
            | (DatePoint::Weekday(_), DatePoint::Weekday(_))
            | (DatePoint::Day { year: None, .. }, DatePoint::Day { year: None, .. })
            | (DatePoint::Day { year: Some(_), .. }, DatePoint::Day { year: Some(_), .. }) => to,

            // "2025 Mar 10-Apr 5" - the end inherits the year of the start
            (DatePoint::Day { year: Some(y), .. }, DatePoint::Day { year: None, month, day }) => {
                DatePoint::Day {
                    year: Some(y),
                    month,
                    day,
                }
            }

            _ => return Err(ConditionalError::Unsupported(s.trim().to_string())),
        };

        Ok(Self { from, to })
    }

    fn contains(&self, date: NaiveDate) -> bool {
        match (self.from, self.to) {
            (DatePoint::Year(from), DatePoint::Year(to)) => (from..=to).contains(&date.year()),

            (DatePoint::Weekday(from), DatePoint::Weekday(to)) => wrapping_contains(
                from.num_days_from_monday(),
                to.num_days_from_monday(),
                date.weekday().num_days_from_monday(),
            ),

            (
                DatePoint::Day {
                    year: Some(from_year),
                    month: from_month,
                    day: from_day,
                },
                DatePoint::Day {
                    year: Some(to_year),
                    month: to_month,
                    day: to_day,
                },
            ) => {
                let from = (from_year, from_month, from_day.unwrap_or(1));
                let to = (to_year, to_month, to_day.unwrap_or(31));
                (from..=to).contains(&(date.year(), date.month(), date.day()))
            }

            (
                DatePoint::Day {
                    month: from_month,
                    day: from_day,
                    ..
                },
                DatePoint::Day {
                    month: to_month,
                    day: to_day,
                    ..
                },
            ) => wrapping_contains(
                (from_month, from_day.unwrap_or(1)),
                (to_month, to_day.unwrap_or(31)),
                (date.month(), date.day()),
            ),

            _ => false,
        }
    }
}

/// Checks if `x` is in the inclusive range `from..=to`, which wraps around if `from > to`.
fn wrapping_contains<T: PartialOrd>(from: T, to: T, x: T) -> bool {
    if from <= to {
        from <= x && x <= to
    } else {
        x >= from || x <= to
    }
}

fn parse_year(s: &str) -> Option<i32> {
    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok()
    } else {
        None
    }
}

fn parse_month(s: &str) -> Option<u32> {
    const MONTHS: [(&str, &str); 12] = [
        ("jan", "january"),
        ("feb", "february"),
        ("mar", "march"),
        ("apr", "april"),
        ("may", "may"),
        ("jun", "june"),
        ("jul", "july"),
        ("aug", "august"),
        ("sep", "september"),
        ("oct", "october"),
        ("nov", "november"),
        ("dec", "december"),
    ];

    let s = s.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|&(short, long)| s == short || s == long)
        .map(|idx| idx as u32 + 1)
}

fn parse_day(s: &str) -> Option<u32> {
    s.parse().ok().filter(|d| (1..=31).contains(d))
}

fn parse_weekday(s: &str) -> Option<Weekday> {
    match s.to_ascii_lowercase().as_str() {
        "mo" | "mon" => Some(Weekday::Mon),
        "tu" | "tue" => Some(Weekday::Tue),
        "we" | "wed" => Some(Weekday::Wed),
        "th" | "thu" => Some(Weekday::Thu),
        "fr" | "fri" => Some(Weekday::Fri),
        "sa" | "sat" => Some(Weekday::Sat),
        "su" | "sun" => Some(Weekday::Sun),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn active(today: NaiveDate, condition: &str) -> bool {
        ConditionalInspector::new(today)
            .is_active(condition)
            .unwrap()
    }

    #[test]
    fn full_dates() {
        let today = date(2025, 3, 20);
        assert!(active(today, "2025 Mar 20"));
        assert!(!active(today, "2025 Mar 21"));
        assert!(active(today, "2025 Mar 10-2025 Apr 5"));
        assert!(active(today, "2025 Mar 10-Apr 5"));
        assert!(!active(today, "2024 Mar 10-2024 Apr 5"));
        assert!(active(today, "2024 Dec 1-2025 Mar 20"));
        assert!(active(today, "2025 Mar"));
        assert!(active(today, "2025 Feb-2025 Mar"));
        assert!(!active(today, "2025 Apr-2025 May"));
    }

    #[test]
    fn years() {
        assert!(active(date(2025, 6, 1), "2025"));
        assert!(active(date(2025, 6, 1), "2020-2030"));
        assert!(!active(date(2031, 1, 1), "2020-2030"));
    }

    #[test]
    fn months_and_days_wrap() {
        assert!(active(date(2025, 5, 1), "Mar-Oct"));
        assert!(!active(date(2025, 11, 1), "Mar-Oct"));
        assert!(active(date(2025, 12, 24), "Nov-Mar"));
        assert!(active(date(2026, 1, 2), "Nov-Mar"));
        assert!(!active(date(2026, 4, 1), "Nov-Mar"));
        assert!(active(date(2025, 3, 31), "Mar 15-Jun 1"));
        assert!(!active(date(2025, 3, 14), "Mar 15-Jun 1"));
        assert!(active(date(2025, 7, 9), "july"));
        assert!(active(date(2025, 2, 2), "Jan-Feb, Jul-Aug"));
    }

    #[test]
    fn weekdays() {
        // 2025-03-22 is a Saturday
        assert!(active(date(2025, 3, 22), "Sat-Sun"));
        assert!(active(date(2025, 3, 22), "Sa"));
        assert!(!active(date(2025, 3, 22), "Mo-Fr"));
        assert!(active(date(2025, 3, 24), "Fri-Mon"));
        assert!(!active(date(2025, 3, 25), "Fri-Mon"));
    }

    #[test]
    fn invalid_conditions() {
        let i = ConditionalInspector::new(date(2025, 3, 20));
        assert!(i.is_active("10:00-18:00").is_err());
        assert!(i.is_active("2025 Feb 30").is_err());
        assert!(i.is_active("Mar-Sun").is_err());
        assert!(i.is_active("Mar-2025 Apr").is_err());
        assert!(i.is_active("Mar 40").is_err());
        assert!(i.is_active("Mo-Fr AND wet").is_err());
        assert!(i.is_active("Marzipan").is_err());
        assert!(i.is_active("2025 Mayday 1").is_err());
        assert!(i.is_active("").is_err());
    }

    #[test]
    fn month_names() {
        assert_eq!(parse_month("Mar"), Some(3));
        assert_eq!(parse_month("march"), Some(3));
        assert_eq!(parse_month("SEPTEMBER"), Some(9));
        assert_eq!(parse_month("May"), Some(5));
        assert_eq!(parse_month("Sept"), None);
        assert_eq!(parse_month("Mayday"), None);
        assert_eq!(parse_month("marzipan"), None);
        assert_eq!(parse_month("ma"), None);

        let i = ConditionalInspector::new(date(2025, 3, 20));
        assert!(i.is_active("March 1-April 1").unwrap());
    }

    #[test]
    fn active_value() {
        let i = ConditionalInspector::new(date(2025, 3, 20));
        assert_eq!(i.active_value("no @ (2025 Mar 20)"), Some("no"));
        assert_eq!(i.active_value("no @ 2025 Mar 20"), Some("no"));
        assert_eq!(i.active_value("no @ (2025 Apr 1)"), None);
        assert_eq!(
            i.active_value("no @ (Apr-Oct); destination @ (Nov-Mar)"),
            Some("destination"),
        );
        assert_eq!(i.active_value("no @ (10:00-18:00); yes @ (Mar)"), Some("yes"));
        assert_eq!(i.active_value("no"), None);
        assert_eq!(i.active_value("garbage @ (((("), None);
    }

    #[test]
    fn today() {
        let today = Local::now().date_naive();
        let i = ConditionalInspector::default();
        assert_eq!(i.fixed_date(), None);
        assert_eq!(i.reference_date(), today);
        assert_eq!(
            ConditionalInspector::new(date(2025, 3, 20)).fixed_date(),
            Some(date(2025, 3, 20))
        );

        let raw = format!("no @ ({})", today.format("%Y %b %d"));
        assert_eq!(i.active_value(&raw), Some("no"));
    }
}

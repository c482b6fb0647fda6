// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::str::FromStr;

/// Mode-independent switches adjusting how a [Profile](super::Profile) interprets tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Treat fords (`highway=ford` ways, `ford=*` ways and nodes) as impassable.
    pub block_fords: bool,

    /// Treat `private` access values as prohibitive.
    pub block_private: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            block_fords: false,
            block_private: true,
        }
    }
}

/// Error which can occur when parsing [Options].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptionsError {
    #[error("option {key}: expected a boolean, got {value:?}")]
    InvalidBool { key: String, value: String },

    #[error("malformed option {0:?} (expected key=value)")]
    Malformed(String),
}

impl Options {
    /// Builds options from a flat name-to-value map, starting from [Options::default].
    /// Unknown option names are logged and ignored.
    pub fn from_map(map: &HashMap<String, String>) -> Result<Self, OptionsError> {
        let mut options = Self::default();
        for (key, value) in map {
            options.set(key, value)?;
        }
        Ok(options)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), OptionsError> {
        match key {
            "block_fords" => self.block_fords = parse_bool(key, value)?,
            "block_private" => self.block_private = parse_bool(key, value)?,
            _ => log::warn!("ignoring unknown option {key}={value}"),
        }
        Ok(())
    }
}

/// Parses options in the `key=value|key=value` form, e.g. `block_fords=true|block_private=false`.
impl FromStr for Options {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut options = Self::default();
        for pair in s.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| OptionsError::Malformed(pair.to_string()))?;
            options.set(key.trim(), value.trim())?;
        }
        Ok(options)
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OptionsError> {
    match value {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(OptionsError::InvalidBool {
            key: key.to_string(),
            value: value.to_string(),
        }),
    }
}

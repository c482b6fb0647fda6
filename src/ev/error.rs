// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

/// Configuration mistakes detected while registering, building or looking up
/// [encoded values](super::EncodedValue).
///
/// All of them indicate a programming error made once at startup,
/// and none of them are recovered from automatically.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid encoded value name {0:?} (expected [a-z][a-z0-9_]*)")]
    InvalidName(String),

    #[error("encoded value {name:?}: invalid width {bits} (expected 1..=31)")]
    InvalidWidth { name: String, bits: u8 },

    #[error("encoded value {name:?}: factor {factor} can't represent two distinct levels")]
    InvalidFactor { name: String, factor: f64 },

    #[error("encoded value {0:?} is already registered")]
    DuplicateName(String),

    #[error("encoded value {0:?} added after the registry was built")]
    AddAfterBuild(String),

    #[error("registry was already built")]
    AlreadyBuilt,

    #[error("registry was not built yet")]
    NotBuilt,

    #[error("unknown encoded value {0:?}")]
    Unknown(String),

    #[error("encoded value {name:?} is not a {expected} value")]
    WrongKind { name: String, expected: &'static str },

    #[error("encoded value {0:?} must store both directions")]
    NotDirectional(String),
}

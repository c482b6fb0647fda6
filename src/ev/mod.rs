// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

//! Bit-packed per-edge attributes.
//!
//! An [EncodedValue] describes a single attribute. Once added to a [Registry]
//! and the registry is [built](Registry::build), every value gets a fixed,
//! private range of bits inside an [EdgeFlags] record, and can be read or
//! written through a [BooleanEncodedValue], [DecimalEncodedValue] or
//! [EnumEncodedValue] accessor.

mod boolean;
mod decimal;
mod enumeration;
mod error;
mod registry;

use std::ops::{Deref, DerefMut, Range};

pub use boolean::BooleanEncodedValue;
pub use decimal::DecimalEncodedValue;
pub use enumeration::{EncodedEnum, EnumEncodedValue};
pub use error::ConfigError;
pub use registry::Registry;

/// Maximum width of a single encoded value field, in bits.
pub const MAX_WIDTH: u8 = 31;

/// Number of bits in a single record word.
pub(crate) const WORD_BITS: u32 = u32::BITS;

/// Orientation in which an edge is read or written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Direction cardinality and width (in bits) of an [EncodedValue].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// A single field, shared by both directions.
    Shared(u8),

    /// Two independent fields, one for each [Direction].
    Directional(u8),
}

impl Storage {
    pub fn width(self) -> u8 {
        match self {
            Self::Shared(w) | Self::Directional(w) => w,
        }
    }

    pub fn is_directional(self) -> bool {
        matches!(self, Self::Directional(_))
    }
}

/// Kind of the stored attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueKind {
    Boolean,

    /// Quantized decimal; stored as an integer number of `factor` steps.
    Decimal { factor: f64 },

    /// One of `variants` values of an [EncodedEnum], stored by its index.
    Enum { variants: usize },
}

/// Definition of a named attribute, to be added to a [Registry].
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedValue {
    name: String,
    kind: ValueKind,
    storage: Storage,
}

impl EncodedValue {
    /// Defines a single-bit boolean value.
    pub fn boolean<S: Into<String>>(name: S, directional: bool) -> Self {
        Self {
            name: name.into(),
            kind: ValueKind::Boolean,
            storage: if directional {
                Storage::Directional(1)
            } else {
                Storage::Shared(1)
            },
        }
    }

    /// Defines a decimal value stored in `bits` bits as multiples of `factor`.
    pub fn decimal<S: Into<String>>(name: S, bits: u8, factor: f64, directional: bool) -> Self {
        Self {
            name: name.into(),
            kind: ValueKind::Decimal { factor },
            storage: if directional {
                Storage::Directional(bits)
            } else {
                Storage::Shared(bits)
            },
        }
    }

    /// Defines a value holding one of the [EncodedEnum::VALUES] of `T`,
    /// with just enough bits to store the index of the last one.
    pub fn enumeration<T: EncodedEnum, S: Into<String>>(name: S, directional: bool) -> Self {
        let variants = T::VALUES.len();
        let bits = enum_width(variants);
        Self {
            name: name.into(),
            kind: ValueKind::Enum { variants },
            storage: if directional {
                Storage::Directional(bits)
            } else {
                Storage::Shared(bits)
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn storage(&self) -> Storage {
        self.storage
    }

    /// Checks the definition for configuration mistakes.
    fn validate(&self) -> Result<(), ConfigError> {
        if !is_valid_name(&self.name) {
            return Err(ConfigError::InvalidName(self.name.clone()));
        }

        let bits = self.storage.width();
        if bits == 0 || bits > MAX_WIDTH {
            return Err(ConfigError::InvalidWidth {
                name: self.name.clone(),
                bits,
            });
        }

        match self.kind {
            ValueKind::Boolean if bits != 1 => Err(ConfigError::InvalidWidth {
                name: self.name.clone(),
                bits,
            }),
            ValueKind::Decimal { factor } if !factor.is_finite() || factor <= 0.0 => {
                Err(ConfigError::InvalidFactor {
                    name: self.name.clone(),
                    factor,
                })
            }
            _ => Ok(()),
        }
    }
}

/// Returns the number of bits needed for indices `0..variants`.
/// An enum without any values gets a width of zero, which fails validation.
fn enum_width(variants: usize) -> u8 {
    match variants {
        0 => 0,
        1 => 1,
        n => (usize::BITS - (n - 1).leading_zeros()) as u8,
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// Location of a single field inside a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Field {
    word: usize,
    shift: u32,
    mask: u32,
}

impl Field {
    pub(crate) fn new(word: usize, shift: u32, width: u8) -> Self {
        debug_assert!(width > 0 && width <= MAX_WIDTH);
        debug_assert!(shift + width as u32 <= WORD_BITS);
        Self {
            word,
            shift,
            mask: (1u32 << width) - 1,
        }
    }

    pub(crate) fn get(&self, record: &[u32]) -> u32 {
        (record[self.word] >> self.shift) & self.mask
    }

    pub(crate) fn set(&self, record: &mut [u32], value: u32) {
        let word = &mut record[self.word];
        *word = (*word & !(self.mask << self.shift)) | ((value & self.mask) << self.shift);
    }

    pub(crate) fn max(&self) -> u32 {
        self.mask
    }

    /// Absolute bit range occupied by this field.
    pub(crate) fn bits(&self) -> Range<usize> {
        let start = self.word * WORD_BITS as usize + self.shift as usize;
        start..start + self.mask.count_ones() as usize
    }
}

/// Fields assigned to an encoded value by the [Registry].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slots {
    Shared(Field),
    Directional { forward: Field, backward: Field },
}

impl Slots {
    pub(crate) fn field(&self, direction: Direction) -> Field {
        match (self, direction) {
            (Self::Shared(f), _) => *f,
            (Self::Directional { forward, .. }, Direction::Forward) => *forward,
            (Self::Directional { backward, .. }, Direction::Backward) => *backward,
        }
    }

    pub(crate) fn is_directional(&self) -> bool {
        matches!(self, Self::Directional { .. })
    }

    pub(crate) fn fields(&self) -> impl Iterator<Item = Field> {
        let (first, second) = match *self {
            Self::Shared(f) => (f, None),
            Self::Directional { forward, backward } => (forward, Some(backward)),
        };
        std::iter::once(first).chain(second)
    }
}

/// A fixed-width record holding all encoded values of a single edge.
///
/// Created zeroed by [Registry::create_flags]. Accessors operate on plain `[u32]`
/// slices, and `EdgeFlags` dereferences to one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EdgeFlags(Box<[u32]>);

impl EdgeFlags {
    pub(crate) fn zeroed(words: usize) -> Self {
        Self(vec![0; words].into_boxed_slice())
    }
}

impl Deref for EdgeFlags {
    type Target = [u32];

    fn deref(&self) -> &[u32] {
        &self.0
    }
}

impl DerefMut for EdgeFlags {
    fn deref_mut(&mut self) -> &mut [u32] {
        &mut self.0
    }
}

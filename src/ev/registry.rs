// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::ops::Range;

use super::{
    BooleanEncodedValue, ConfigError, DecimalEncodedValue, EdgeFlags, EncodedEnum, EncodedValue,
    EnumEncodedValue, Field, Slots, ValueKind, WORD_BITS,
};

/// Owns a set of [EncodedValues](EncodedValue) and lays them out
/// in a fixed-width [EdgeFlags] record.
///
/// Values are first [added](Registry::add), then the registry is [built](Registry::build),
/// which assigns every value a disjoint range of bits (in registration order) and
/// freezes the record width. Accessors can only be obtained from a built registry.
///
/// ```
/// use wayflags::ev::{Direction, EncodedValue, Registry};
///
/// let mut registry = Registry::new();
/// registry
///     .add(EncodedValue::boolean("foot_access", true))?
///     .add(EncodedValue::decimal("foot_average_speed", 4, 1.0, false))?;
/// registry.build()?;
///
/// let access = registry.boolean("foot_access")?;
/// let speed = registry.decimal("foot_average_speed")?;
///
/// let mut flags = registry.create_flags()?;
/// access.set_bool(Direction::Forward, &mut flags, true);
/// speed.set_decimal(Direction::Forward, &mut flags, 5.0);
/// assert!(!access.get_bool(Direction::Backward, &flags));
/// assert_eq!(speed.get_decimal(Direction::Backward, &flags), 5.0);
/// # Ok::<(), wayflags::ev::ConfigError>(())
/// ```
#[derive(Debug, Default, Clone)]
pub struct Registry {
    values: Vec<(EncodedValue, Option<Slots>)>,
    words: usize,
    built: bool,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a definition to the registry.
    ///
    /// Fails if the definition is invalid, if a value with the same name
    /// is already registered, or if the registry was already built.
    pub fn add(&mut self, value: EncodedValue) -> Result<&mut Self, ConfigError> {
        if self.built {
            return Err(ConfigError::AddAfterBuild(value.name().to_string()));
        }
        value.validate()?;
        if self.contains(value.name()) {
            return Err(ConfigError::DuplicateName(value.name().to_string()));
        }

        self.values.push((value, None));
        Ok(self)
    }

    /// Assigns bit offsets to all registered values and freezes the registry.
    ///
    /// A single field never straddles a word boundary.
    /// Directional values occupy two consecutive fields, forward first.
    pub fn build(&mut self) -> Result<(), ConfigError> {
        if self.built {
            return Err(ConfigError::AlreadyBuilt);
        }

        let mut word = 0;
        let mut shift = 0;
        let mut next_field = |width: u8| {
            if shift + width as u32 > WORD_BITS {
                word += 1;
                shift = 0;
            }
            let f = Field::new(word, shift, width);
            shift += width as u32;
            f
        };

        for (value, slots) in self.values.iter_mut() {
            let storage = value.storage();
            *slots = Some(if storage.is_directional() {
                let forward = next_field(storage.width());
                let backward = next_field(storage.width());
                Slots::Directional { forward, backward }
            } else {
                Slots::Shared(next_field(storage.width()))
            });
        }

        self.words = if shift == 0 { word } else { word + 1 };
        self.built = true;

        log::debug!(
            "registry built: {} encoded values in {} words",
            self.values.len(),
            self.words,
        );
        Ok(())
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Returns the number of registered values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.iter().any(|(v, _)| v.name() == name)
    }

    /// Returns the width of a single record, in 32-bit words.
    /// Zero until the registry is built.
    pub fn words_per_record(&self) -> usize {
        self.words
    }

    /// Creates a zeroed record of the frozen width.
    pub fn create_flags(&self) -> Result<EdgeFlags, ConfigError> {
        if !self.built {
            return Err(ConfigError::NotBuilt);
        }
        Ok(EdgeFlags::zeroed(self.words))
    }

    /// Returns the accessor for a registered boolean value.
    pub fn boolean(&self, name: &str) -> Result<BooleanEncodedValue, ConfigError> {
        let (value, slots) = self.lookup(name)?;
        match value.kind() {
            ValueKind::Boolean => Ok(BooleanEncodedValue::new(value.name().to_string(), slots)),
            _ => Err(ConfigError::WrongKind {
                name: name.to_string(),
                expected: "boolean",
            }),
        }
    }

    /// Returns the accessor for a registered decimal value.
    pub fn decimal(&self, name: &str) -> Result<DecimalEncodedValue, ConfigError> {
        let (value, slots) = self.lookup(name)?;
        match value.kind() {
            ValueKind::Decimal { factor } => Ok(DecimalEncodedValue::new(
                value.name().to_string(),
                factor,
                slots,
            )),
            _ => Err(ConfigError::WrongKind {
                name: name.to_string(),
                expected: "decimal",
            }),
        }
    }

    /// Returns the accessor for a registered enum value.
    /// Fails if the value was registered for an enum with a different number of values.
    pub fn enumeration<T: EncodedEnum>(
        &self,
        name: &str,
    ) -> Result<EnumEncodedValue<T>, ConfigError> {
        let (value, slots) = self.lookup(name)?;
        match value.kind() {
            ValueKind::Enum { variants } if variants == T::VALUES.len() => {
                Ok(EnumEncodedValue::new(value.name().to_string(), slots))
            }
            _ => Err(ConfigError::WrongKind {
                name: name.to_string(),
                expected: "enum",
            }),
        }
    }

    fn lookup(&self, name: &str) -> Result<(&EncodedValue, Slots), ConfigError> {
        if !self.built {
            return Err(ConfigError::NotBuilt);
        }
        self.values
            .iter()
            .find(|(v, _)| v.name() == name)
            .and_then(|(v, slots)| slots.map(|s| (v, s)))
            .ok_or_else(|| ConfigError::Unknown(name.to_string()))
    }

    /// Returns the absolute bit ranges of all fields, in layout order.
    /// Directional values contribute two ranges. Empty until the registry is built.
    pub fn bit_ranges(&self) -> Vec<(&str, Range<usize>)> {
        self.values
            .iter()
            .filter_map(|(v, slots)| slots.map(|s| (v.name(), s)))
            .flat_map(|(name, s)| s.fields().map(move |f| (name, f.bits())))
            .collect()
    }
}

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::fmt::Debug;
use std::marker::PhantomData;

use super::{Direction, Slots};

/// A closed set of values which can be stored in an [EnumEncodedValue].
///
/// Values are stored by their position in [EncodedEnum::VALUES].
/// The [Default] value is read back from zeroed records, so it should come first.
pub trait EncodedEnum: Copy + Default + Debug + PartialEq + 'static {
    const VALUES: &'static [Self];
}

/// Accessor for an enum value registered in a built [Registry](super::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumEncodedValue<T: EncodedEnum> {
    name: String,
    slots: Slots,
    marker: PhantomData<T>,
}

impl<T: EncodedEnum> EnumEncodedValue<T> {
    pub(crate) fn new(name: String, slots: Slots) -> Self {
        Self {
            name,
            slots,
            marker: PhantomData,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_directional(&self) -> bool {
        self.slots.is_directional()
    }

    pub fn get_enum(&self, direction: Direction, record: &[u32]) -> T {
        let index = self.slots.field(direction).get(record) as usize;
        T::VALUES.get(index).copied().unwrap_or_default()
    }

    pub fn set_enum(&self, direction: Direction, record: &mut [u32], value: T) {
        let index = T::VALUES
            .iter()
            .position(|&v| v == value)
            .unwrap_or_default();
        self.slots.field(direction).set(record, index as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::super::{ConfigError, EncodedValue, Registry};
    use super::*;

    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
    enum Surface {
        #[default]
        Missing,
        Paved,
        Gravel,
        Sand,
        Mud,
    }

    impl EncodedEnum for Surface {
        const VALUES: &'static [Self] = &[
            Self::Missing,
            Self::Paved,
            Self::Gravel,
            Self::Sand,
            Self::Mud,
        ];
    }

    #[test]
    fn set_get() {
        let mut r = Registry::new();
        r.add(EncodedValue::enumeration::<Surface, _>("surface", false))
            .unwrap()
            .add(EncodedValue::boolean("foot_access", true))
            .unwrap();
        r.build().unwrap();
        let enc = r.enumeration::<Surface>("surface").unwrap();
        let access = r.boolean("foot_access").unwrap();
        assert!(!enc.is_directional());

        let mut flags = r.create_flags().unwrap();
        assert_eq!(enc.get_enum(Direction::Forward, &flags), Surface::Missing);

        enc.set_enum(Direction::Forward, &mut flags, Surface::Mud);
        access.set_bool(Direction::Backward, &mut flags, true);
        assert_eq!(enc.get_enum(Direction::Backward, &flags), Surface::Mud);
        assert!(!access.get_bool(Direction::Forward, &flags));

        enc.set_enum(Direction::Forward, &mut flags, Surface::Paved);
        assert_eq!(enc.get_enum(Direction::Forward, &flags), Surface::Paved);
        assert!(access.get_bool(Direction::Backward, &flags));
    }

    #[test]
    fn directional() {
        let mut r = Registry::new();
        r.add(EncodedValue::enumeration::<Surface, _>("surface", true))
            .unwrap();
        r.build().unwrap();
        let enc = r.enumeration::<Surface>("surface").unwrap();

        let mut flags = r.create_flags().unwrap();
        enc.set_enum(Direction::Backward, &mut flags, Surface::Sand);
        assert_eq!(enc.get_enum(Direction::Forward, &flags), Surface::Missing);
        assert_eq!(enc.get_enum(Direction::Backward, &flags), Surface::Sand);
    }

    #[test]
    fn out_of_range_index_reads_default() {
        let mut r = Registry::new();
        r.add(EncodedValue::enumeration::<Surface, _>("surface", false))
            .unwrap();
        r.build().unwrap();
        let enc = r.enumeration::<Surface>("surface").unwrap();

        // 3 bits can hold 7, but there are only 5 surfaces
        let mut flags = r.create_flags().unwrap();
        flags[0] = 7;
        assert_eq!(enc.get_enum(Direction::Forward, &flags), Surface::Missing);
    }

    #[test]
    fn wrong_kind() {
        let mut r = Registry::new();
        r.add(EncodedValue::enumeration::<Surface, _>("surface", false))
            .unwrap()
            .add(EncodedValue::boolean("foot_access", true))
            .unwrap();
        r.build().unwrap();

        assert!(matches!(
            r.enumeration::<Surface>("foot_access"),
            Err(ConfigError::WrongKind { .. }),
        ));
        assert!(matches!(
            r.boolean("surface"),
            Err(ConfigError::WrongKind { .. }),
        ));
    }
}

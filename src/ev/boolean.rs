// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Direction, Slots};

/// Accessor for a boolean value registered in a built [Registry](super::Registry).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BooleanEncodedValue {
    name: String,
    slots: Slots,
}

impl BooleanEncodedValue {
    pub(crate) fn new(name: String, slots: Slots) -> Self {
        Self { name, slots }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if both directions are stored independently.
    pub fn is_directional(&self) -> bool {
        self.slots.is_directional()
    }

    /// Reads the value for the given direction. Shared values
    /// return the same bit for both directions.
    pub fn get_bool(&self, direction: Direction, record: &[u32]) -> bool {
        self.slots.field(direction).get(record) != 0
    }

    /// Writes the value for the given direction. Writing any direction
    /// of a shared value updates the shared bit.
    pub fn set_bool(&self, direction: Direction, record: &mut [u32], value: bool) {
        self.slots.field(direction).set(record, value as u32)
    }
}

// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use super::{Direction, Slots};

/// Tolerance for treating a quotient as an exact number of steps,
/// absorbing binary representation errors of factors like 0.1.
const STEP_EPSILON: f64 = 1e-9;

/// Accessor for a quantized decimal value registered in a built [Registry](super::Registry).
///
/// Values are stored as an unsigned number of `factor` steps, rounded half-up.
/// Writes never fail: values above [DecimalEncodedValue::max_storable_value]
/// are clamped to it, while negative values and NaN are stored as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct DecimalEncodedValue {
    name: String,
    factor: f64,
    slots: Slots,
}

impl DecimalEncodedValue {
    pub(crate) fn new(name: String, factor: f64, slots: Slots) -> Self {
        Self {
            name,
            factor,
            slots,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Size of a single quantization step.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Returns true if both directions are stored independently.
    pub fn is_directional(&self) -> bool {
        self.slots.is_directional()
    }

    /// Largest number of steps which fits into the value's bits.
    pub fn max_steps(&self) -> u32 {
        self.slots.field(Direction::Forward).max()
    }

    /// Largest value which can be stored.
    pub fn max_storable_value(&self) -> f64 {
        self.max_steps() as f64 * self.factor
    }

    /// Returns the smallest storable value not less than `value`,
    /// or [DecimalEncodedValue::max_storable_value] if `value` exceeds it.
    ///
    /// For example, with 4 bits and a factor of 2, `15` can't be stored
    /// and reads back as `16`, so `next_storable_value(15.0) == 16.0`.
    pub fn next_storable_value(&self, value: f64) -> f64 {
        let max = self.max_storable_value();
        if value.is_nan() || value <= 0.0 {
            return 0.0;
        } else if value >= max {
            return max;
        }

        let steps = value / self.factor;
        let rounded = steps.round();
        if (steps - rounded).abs() < STEP_EPSILON {
            rounded * self.factor
        } else {
            steps.ceil() * self.factor
        }
    }

    pub fn get_decimal(&self, direction: Direction, record: &[u32]) -> f64 {
        self.slots.field(direction).get(record) as f64 * self.factor
    }

    /// Stores `value` for the given direction. Writing any direction
    /// of a shared value updates the shared field.
    pub fn set_decimal(&self, direction: Direction, record: &mut [u32], value: f64) {
        let steps = self.to_steps(value);
        self.slots.field(direction).set(record, steps)
    }

    fn to_steps(&self, value: f64) -> u32 {
        if value.is_nan() {
            log::debug!("{}: storing NaN as zero", self.name);
            return 0;
        }

        let steps = (value / self.factor + 0.5 + STEP_EPSILON).floor();
        let max = self.max_steps();
        if steps <= 0.0 {
            0
        } else if steps >= max as f64 {
            max
        } else {
            steps as u32
        }
    }
}

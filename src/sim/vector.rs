//! 2D vector helpers
//!
//! `Vector` is glam's `Vec2`, which is `Copy` so every operation yields a new
//! value. The extension trait adds the checked arithmetic the simulation needs.

use glam::Vec2;

use crate::error::SimError;

pub type Vector = Vec2;

pub trait VectorExt: Sized {
    fn magnitude(self) -> f32;

    /// Unit vector in the same direction, or zero for the zero vector
    fn safe_normalize(self) -> Self;

    /// Divide by a scalar, failing instead of producing NaN/infinity
    fn checked_div(self, divisor: f32) -> Result<Self, SimError>;

    fn distance_to(self, other: Self) -> f32;

    /// Rescale to `max` if longer than `max`, otherwise unchanged
    fn limit_magnitude(self, max: f32) -> Self;
}

impl VectorExt for Vec2 {
    #[inline]
    fn magnitude(self) -> f32 {
        self.length()
    }

    #[inline]
    fn safe_normalize(self) -> Self {
        self.normalize_or_zero()
    }

    fn checked_div(self, divisor: f32) -> Result<Self, SimError> {
        if divisor == 0.0 {
            return Err(SimError::DivisionByZero {
                context: "vector division",
            });
        }
        Ok(self / divisor)
    }

    #[inline]
    fn distance_to(self, other: Self) -> f32 {
        self.distance(other)
    }

    fn limit_magnitude(self, max: f32) -> Self {
        let len = self.length();
        if len > max && len > 0.0 {
            self * (max / len)
        } else {
            self
        }
    }
}

/// `1 / value`, failing on zero
pub fn checked_recip(value: f32, context: &'static str) -> Result<f32, SimError> {
    if value == 0.0 {
        Err(SimError::DivisionByZero { context })
    } else {
        Ok(1.0 / value)
    }
}

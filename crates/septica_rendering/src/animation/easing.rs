//! Easing curves applied to transition progress.

use std::f32::consts::PI;

/// Easing function type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// Linear interpolation.
    Linear,
    /// Cubic ease-out: fast start, gentle landing.
    #[default]
    CubicOut,
    /// Cubic ease-in-out: symmetric, used for flips.
    CubicInOut,
    /// Sine ease-in-out.
    SineInOut,
    /// Instant (no animation).
    Instant,
}

impl Easing {
    /// Applies the easing function to a t value (0-1).
    ///
    /// Every curve is monotonic and maps 0 to 0 and 1 to 1.
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Linear => t,
            Self::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
            Self::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv * inv / 2.0
                }
            }
            Self::SineInOut => -((PI * t).cos() - 1.0) / 2.0,
            Self::Instant => 1.0,
        }
    }
}

/// Linear interpolation between `a` and `b`.
#[inline]
#[must_use]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

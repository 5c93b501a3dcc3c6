//! # Palette & Performance Constants
//!
//! **CRITICAL:** These values are baked into both the shaders and the host.
//! Changes require rebuilding both sides.

// =============================================================================
// PALETTE
// =============================================================================

/// Gold from the national tricolor (RGB).
pub const ROMANIAN_GOLD: [f32; 3] = [1.0, 0.84, 0.0];

/// Red from the national tricolor (RGB).
pub const ROMANIAN_RED: [f32; 3] = [0.8, 0.2, 0.2];

/// Blue from the national tricolor (RGB).
pub const ROMANIAN_BLUE: [f32; 3] = [0.2, 0.4, 0.8];

// =============================================================================
// PERFORMANCE
// =============================================================================

/// Absolute particle ceiling, regardless of quality tier.
pub const MAX_PARTICLES: usize = 1000;

/// Card corner radius, in card-local units.
pub const CARD_CORNER_RADIUS: f32 = 0.1;

/// Resting glow intensity of every card.
pub const DEFAULT_GLOW_INTENSITY: f32 = 0.3;

/// Global multiplier applied to animation time.
pub const ANIMATION_SPEED_MULTIPLIER: f32 = 1.0;

/// Opaque RGBA from one of the palette colors.
#[inline]
#[must_use]
pub const fn opaque(rgb: [f32; 3]) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], 1.0]
}

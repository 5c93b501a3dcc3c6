//! # Effects Configuration
//!
//! Durations, glow levels, emission ranges and quality caps. Every field has
//! a default, so a TOML file only needs the values it overrides:
//!
//! ```toml
//! seed = 7
//!
//! [animation]
//! flip_duration = 0.8
//!
//! [emission]
//! count = 200
//! palette = [[1.0, 0.84, 0.0, 1.0]]
//!
//! [quality]
//! high_particle_cap = 300
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use septica_shared::constants::opaque;
use septica_shared::{
    ANIMATION_SPEED_MULTIPLIER, DEFAULT_GLOW_INTENSITY, MAX_PARTICLES, ROMANIAN_BLUE, ROMANIAN_GOLD,
    ROMANIAN_RED,
};

use crate::error::{EffectsError, EffectsResult};

/// Timings and visual levels of the card state machine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnimationConfig {
    /// Selection ramp `Idle -> Selected` (seconds).
    pub select_duration: f32,
    /// Return to rest `Selected -> Idle` (seconds).
    pub deselect_duration: f32,
    /// Flip `Selected -> Flipping` (seconds).
    pub flip_duration: f32,
    /// Lift `Flipping -> Floating` (seconds).
    pub float_duration: f32,
    /// Settle `Floating -> Idle` (seconds).
    pub settle_duration: f32,
    /// Celebration, including the glow pulse (seconds).
    pub celebrate_duration: f32,
    /// Return to rest after a flip or a celebration (seconds).
    pub rest_duration: f32,
    /// Glow every card decays back to.
    pub baseline_glow: f32,
    /// Glow held while floating.
    pub float_glow: f32,
    /// Lift height of a floating card, in world units.
    pub float_height: f32,
    /// Multiplier applied to every frame's delta time.
    pub speed_multiplier: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            select_duration: 0.2,
            deselect_duration: 0.2,
            flip_duration: 0.6,
            float_duration: 0.4,
            settle_duration: 0.5,
            celebrate_duration: 1.5,
            rest_duration: 0.25,
            baseline_glow: DEFAULT_GLOW_INTENSITY,
            float_glow: 0.6,
            float_height: 0.15,
            speed_multiplier: ANIMATION_SPEED_MULTIPLIER,
        }
    }
}

/// Style parameters of a particle burst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParticleStyle {
    /// Particles requested per celebration.
    pub count: u32,
    /// Half-angle of the emission cone around +Y (radians).
    pub cone_half_angle: f32,
    /// Extra horizontal push away from the cone axis, as a fraction of speed.
    pub outward_bias: f32,
    /// Initial speed range `[min, max]`.
    pub speed: [f32; 2],
    /// Lifetime range `[min, max]` in seconds.
    pub life: [f32; 2],
    /// Sprite size range `[min, max]`.
    pub size: [f32; 2],
    /// Maximum absolute rotation speed (radians per second).
    pub spin: f32,
    /// Colors picked uniformly per particle.
    pub palette: Vec<[f32; 4]>,
}

impl Default for ParticleStyle {
    fn default() -> Self {
        Self {
            count: 120,
            cone_half_angle: 0.6,
            outward_bias: 0.35,
            speed: [1.5, 3.5],
            life: [0.8, 1.6],
            size: [0.02, 0.05],
            spin: 6.0,
            palette: vec![opaque(ROMANIAN_BLUE), opaque(ROMANIAN_GOLD), opaque(ROMANIAN_RED)],
        }
    }
}

/// Per-tier budgets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct QualityConfig {
    /// Particle cap at `High`. `Ultra` always uses `MAX_PARTICLES`.
    pub high_particle_cap: usize,
    /// Celebration glow peak at `High` (and `Medium`).
    pub standard_glow_peak: f32,
    /// Celebration glow peak at `Ultra`.
    pub rich_glow_peak: f32,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            high_particle_cap: 500,
            standard_glow_peak: 0.8,
            rich_glow_peak: 1.0,
        }
    }
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// Seed of the particle RNG. Same seed, same bursts.
    pub seed: u64,
    /// Downward acceleration applied to particles (units per second squared).
    pub gravity: f32,
    /// Card state machine timings.
    pub animation: AnimationConfig,
    /// Celebration burst style.
    pub emission: ParticleStyle,
    /// Quality tier budgets.
    pub quality: QualityConfig,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            seed: 0x5E97_1CA0,
            gravity: 4.0,
            animation: AnimationConfig::default(),
            emission: ParticleStyle::default(),
            quality: QualityConfig::default(),
        }
    }
}

impl EffectsConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::Parse`] for malformed TOML and
    /// [`EffectsError::InvalidConfig`] for out-of-range values.
    pub fn from_toml_str(source: &str) -> EffectsResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`Self::from_toml_str`].
    pub fn from_path(path: impl AsRef<Path>) -> EffectsResult<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| EffectsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Checks every value is usable by the engine.
    ///
    /// # Errors
    ///
    /// Returns [`EffectsError::InvalidConfig`] naming the first bad field.
    pub fn validate(&self) -> EffectsResult<()> {
        let anim = &self.animation;
        for (name, value) in [
            ("animation.select_duration", anim.select_duration),
            ("animation.deselect_duration", anim.deselect_duration),
            ("animation.flip_duration", anim.flip_duration),
            ("animation.float_duration", anim.float_duration),
            ("animation.settle_duration", anim.settle_duration),
            ("animation.celebrate_duration", anim.celebrate_duration),
            ("animation.rest_duration", anim.rest_duration),
            ("animation.speed_multiplier", anim.speed_multiplier),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }

        let quality = &self.quality;
        for (name, value) in [
            ("animation.baseline_glow", anim.baseline_glow),
            ("animation.float_glow", anim.float_glow),
            ("quality.standard_glow_peak", quality.standard_glow_peak),
            ("quality.rich_glow_peak", quality.rich_glow_peak),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{name} must be within [0, 1], got {value}")));
            }
        }

        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err(invalid(format!("gravity must be non-negative, got {}", self.gravity)));
        }

        if quality.high_particle_cap > MAX_PARTICLES {
            return Err(invalid(format!(
                "quality.high_particle_cap {} exceeds MAX_PARTICLES ({MAX_PARTICLES})",
                quality.high_particle_cap
            )));
        }

        let style = &self.emission;
        for (name, [min, max]) in [
            ("emission.speed", style.speed),
            ("emission.life", style.life),
            ("emission.size", style.size),
        ] {
            if !(min.is_finite() && max.is_finite() && min >= 0.0 && min <= max) {
                return Err(invalid(format!("{name} must be an ordered range, got [{min}, {max}]")));
            }
        }
        if style.life[0] <= 0.0 {
            return Err(invalid("emission.life minimum must be positive".to_string()));
        }
        if !(0.0..=std::f32::consts::PI).contains(&style.cone_half_angle) {
            return Err(invalid(format!(
                "emission.cone_half_angle must be within [0, pi], got {}",
                style.cone_half_angle
            )));
        }
        if !(style.spin.is_finite() && style.spin >= 0.0 && style.outward_bias.is_finite()) {
            return Err(invalid(
                "emission.spin and emission.outward_bias must be finite".to_string(),
            ));
        }
        if style.palette.is_empty() {
            return Err(invalid("emission.palette must contain at least one color".to_string()));
        }

        Ok(())
    }
}

fn invalid(message: String) -> EffectsError {
    EffectsError::InvalidConfig(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(EffectsConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = EffectsConfig::from_toml_str(
            r"
            seed = 7

            [animation]
            flip_duration = 0.8

            [quality]
            high_particle_cap = 300
            ",
        )
        .unwrap();

        assert_eq!(config.seed, 7);
        assert!((config.animation.flip_duration - 0.8).abs() < f32::EPSILON);
        assert!((config.animation.select_duration - 0.2).abs() < f32::EPSILON);
        assert_eq!(config.quality.high_particle_cap, 300);
        assert_eq!(config.emission.palette.len(), 3);
    }

    #[test]
    fn test_rejects_cap_above_ceiling() {
        let err = EffectsConfig::from_toml_str("[quality]\nhigh_particle_cap = 5000").unwrap_err();
        assert!(matches!(err, EffectsError::InvalidConfig(_)));
    }

    #[test]
    fn test_rejects_zero_duration() {
        let err = EffectsConfig::from_toml_str("[animation]\nselect_duration = 0.0").unwrap_err();
        assert!(err.to_string().contains("animation.select_duration"));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let err = EffectsConfig::from_toml_str("[emission]\nlife = [2.0, 1.0]").unwrap_err();
        assert!(err.to_string().contains("emission.life"));
    }

    #[test]
    fn test_rejects_unknown_field() {
        let err = EffectsConfig::from_toml_str("[animation]\nwobble = 1.0").unwrap_err();
        assert!(matches!(err, EffectsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = EffectsConfig::from_path("/nonexistent/septica/effects.toml").unwrap_err();
        assert!(matches!(err, EffectsError::Io { .. }));
    }
}

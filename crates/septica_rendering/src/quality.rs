//! # Quality Scaler
//!
//! Maps a [`RenderQuality`] tier to simulation and shading budgets.
//!
//! | Tier   | Particles          | Card effects | Rich glow |
//! |--------|--------------------|--------------|-----------|
//! | Low    | 0                  | no           | no        |
//! | Medium | 0                  | yes          | no        |
//! | High   | `high_particle_cap`| yes          | no        |
//! | Ultra  | `MAX_PARTICLES`    | yes          | yes       |

use septica_shared::{CardAnimationState, RenderQuality, ShaderType, MAX_PARTICLES};

use crate::config::QualityConfig;

/// Budgets derived from a quality tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityProfile {
    /// Tier this profile was built for.
    pub tier: RenderQuality,
    /// Particle pool capacity, never above `MAX_PARTICLES`.
    pub max_particles: usize,
    /// Selection highlight, edge glow and flip shading.
    pub card_effects: bool,
    /// Gold edge glow on every card and the higher celebration peak.
    pub rich_glow: bool,
    /// Peak glow of the celebration pulse.
    pub glow_peak: f32,
}

impl QualityProfile {
    /// Builds the profile for `tier`.
    #[must_use]
    pub fn for_tier(tier: RenderQuality, config: &QualityConfig) -> Self {
        let (max_particles, card_effects, rich_glow) = match tier {
            RenderQuality::Low => (0, false, false),
            RenderQuality::Medium => (0, true, false),
            RenderQuality::High => (config.high_particle_cap, true, false),
            RenderQuality::Ultra => (MAX_PARTICLES, true, true),
        };

        let glow_peak = if rich_glow {
            config.rich_glow_peak
        } else {
            config.standard_glow_peak
        };

        Self {
            tier,
            max_particles: max_particles.min(MAX_PARTICLES),
            card_effects,
            rich_glow,
            glow_peak,
        }
    }

    /// Are particle bursts emitted at this tier?
    #[inline]
    #[must_use]
    pub const fn particles_enabled(&self) -> bool {
        self.max_particles > 0
    }

    /// Shader variant the backend should bind for a card in `state`.
    #[must_use]
    pub const fn shader_for(&self, state: CardAnimationState) -> ShaderType {
        if !self.card_effects {
            return ShaderType::Basic;
        }
        match state {
            CardAnimationState::Idle if self.rich_glow => ShaderType::RomanianPattern,
            CardAnimationState::Idle => ShaderType::Card,
            CardAnimationState::Flipping => ShaderType::CardFlip,
            CardAnimationState::Selected
            | CardAnimationState::Floating
            | CardAnimationState::Celebrating => ShaderType::CardHighlight,
        }
    }
}

impl Default for QualityProfile {
    fn default() -> Self {
        Self::for_tier(RenderQuality::default(), &QualityConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(tier: RenderQuality) -> QualityProfile {
        QualityProfile::for_tier(tier, &QualityConfig::default())
    }

    #[test]
    fn test_caps_per_tier() {
        assert_eq!(profile(RenderQuality::Low).max_particles, 0);
        assert_eq!(profile(RenderQuality::Medium).max_particles, 0);
        assert_eq!(profile(RenderQuality::High).max_particles, 500);
        assert_eq!(profile(RenderQuality::Ultra).max_particles, MAX_PARTICLES);
        for tier in RenderQuality::ALL {
            assert!(profile(*tier).max_particles <= MAX_PARTICLES);
        }
    }

    #[test]
    fn test_effect_flags() {
        assert!(!profile(RenderQuality::Low).card_effects);
        assert!(profile(RenderQuality::Medium).card_effects);
        assert!(!profile(RenderQuality::Medium).particles_enabled());
        assert!(profile(RenderQuality::High).particles_enabled());
        assert!(!profile(RenderQuality::High).rich_glow);
        assert!(profile(RenderQuality::Ultra).rich_glow);
        assert!(profile(RenderQuality::Ultra).glow_peak > profile(RenderQuality::High).glow_peak);
    }

    #[test]
    fn test_shader_selection() {
        let low = profile(RenderQuality::Low);
        for state in CardAnimationState::ALL {
            assert_eq!(low.shader_for(*state), ShaderType::Basic);
        }

        let high = profile(RenderQuality::High);
        assert_eq!(high.shader_for(CardAnimationState::Idle), ShaderType::Card);
        assert_eq!(high.shader_for(CardAnimationState::Flipping), ShaderType::CardFlip);
        assert_eq!(high.shader_for(CardAnimationState::Selected), ShaderType::CardHighlight);

        let ultra = profile(RenderQuality::Ultra);
        assert_eq!(ultra.shader_for(CardAnimationState::Idle), ShaderType::RomanianPattern);
    }
}

//! Per-card animation: current state plus the transition in flight.

use std::f32::consts::PI;

use septica_shared::{
    CardAnimationState, CardUniforms, CARD_CORNER_RADIUS, ROMANIAN_BLUE, ROMANIAN_GOLD,
};

use crate::quality::QualityProfile;
use super::easing::{lerp, Easing};
use super::events::Landing;

/// Static description of a card supplied by the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardSpec {
    /// Resting world position of the card center.
    pub position: [f32; 3],
    /// Card width and height.
    pub size: [f32; 2],
    /// Corner radius.
    pub corner_radius: f32,
}

impl Default for CardSpec {
    fn default() -> Self {
        Self {
            position: [0.0; 3],
            size: [0.63, 0.88],
            corner_radius: CARD_CORNER_RADIUS,
        }
    }
}

/// Interpolated visual parameters of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardVisuals {
    /// Selection intensity in [0, 1].
    pub selection: f32,
    /// Flip angle in radians.
    pub flip_angle: f32,
    /// Glow intensity in [0, 1].
    pub glow: f32,
    /// Lift above the table in [0, 1], scaled by the configured float height.
    pub lift: f32,
}

impl CardVisuals {
    /// Face-down, unselected, at the given glow.
    #[must_use]
    pub const fn resting(glow: f32) -> Self {
        Self {
            selection: 0.0,
            flip_angle: 0.0,
            glow,
            lift: 0.0,
        }
    }

    fn lerp(self, to: Self, t: f32) -> Self {
        Self {
            selection: lerp(self.selection, to.selection, t),
            flip_angle: lerp(self.flip_angle, to.flip_angle, t),
            glow: lerp(self.glow, to.glow, t),
            lift: lerp(self.lift, to.lift, t),
        }
    }

    fn clamped(self) -> Self {
        Self {
            selection: self.selection.clamp(0.0, 1.0),
            flip_angle: self.flip_angle.clamp(0.0, PI),
            glow: self.glow.clamp(0.0, 1.0),
            lift: self.lift.clamp(0.0, 1.0),
        }
    }
}

/// A timed interpolation between two sets of visuals.
///
/// `start` is on the animator clock (`f64`); durations and progress are `f32`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Transition {
    pub(crate) start: f64,
    pub(crate) duration: f32,
    easing: Easing,
    from: CardVisuals,
    to: CardVisuals,
    /// Glow pulse peak layered on top of the interpolation.
    pulse_peak: Option<f32>,
}

impl Transition {
    fn settled(visuals: CardVisuals, now: f64) -> Self {
        Self {
            start: now,
            duration: 0.0,
            easing: Easing::Instant,
            from: visuals,
            to: visuals,
            pulse_peak: None,
        }
    }

    /// Raw progress `clamp((now - start) / duration, 0, 1)`.
    fn raw_progress(&self, now: f64) -> f32 {
        if self.duration <= 0.0 {
            return 1.0;
        }
        let elapsed = (now - self.start) as f32;
        (elapsed / self.duration).clamp(0.0, 1.0)
    }

    pub(crate) fn end(&self) -> f64 {
        self.start + f64::from(self.duration)
    }

    /// Visuals the transition settles on.
    pub(crate) fn target(&self) -> CardVisuals {
        self.to
    }

    fn sample(&self, now: f64) -> CardVisuals {
        let raw = self.raw_progress(now);
        let mut visuals = self.from.lerp(self.to, self.easing.apply(raw));
        if let Some(peak) = self.pulse_peak {
            let headroom = (peak - visuals.glow).max(0.0);
            visuals.glow += headroom * (PI * raw).sin();
        }
        visuals.clamped()
    }
}

/// Animation state of one visible card.
#[derive(Debug, Clone)]
pub struct CardAnimation {
    spec: CardSpec,
    state: CardAnimationState,
    transition: Transition,
    landing: Landing,
}

impl CardAnimation {
    /// A card at rest, face-down, at the baseline glow.
    #[must_use]
    pub fn new(spec: CardSpec, now: f64, baseline_glow: f32) -> Self {
        Self {
            spec,
            state: CardAnimationState::Idle,
            transition: Transition::settled(CardVisuals::resting(baseline_glow), now),
            landing: Landing::Rest,
        }
    }

    /// Current animation state.
    #[inline]
    #[must_use]
    pub const fn state(&self) -> CardAnimationState {
        self.state
    }

    /// Host-supplied description.
    #[must_use]
    pub const fn spec(&self) -> &CardSpec {
        &self.spec
    }

    /// Landing chosen by the last play event.
    #[must_use]
    pub const fn landing(&self) -> Landing {
        self.landing
    }

    /// Visual parameters at `now`.
    #[must_use]
    pub fn visuals(&self, now: f64) -> CardVisuals {
        self.transition.sample(now)
    }

    /// Eased progress of the current transition, in [0, 1].
    #[must_use]
    pub fn progress(&self, now: f64) -> f32 {
        self.transition.easing.apply(self.transition.raw_progress(now))
    }

    /// Is a transition still running at `now`?
    #[must_use]
    pub fn is_transitioning(&self, now: f64) -> bool {
        self.transition.raw_progress(now) < 1.0
    }

    /// World position including the float lift.
    #[must_use]
    pub fn world_position(&self, now: f64, float_height: f32) -> [f32; 3] {
        let [x, y, z] = self.spec.position;
        [x, y + self.visuals(now).lift * float_height, z]
    }

    /// Packs the card for the GPU under the given quality profile.
    #[must_use]
    pub fn uniforms(&self, now: f64, profile: &QualityProfile) -> CardUniforms {
        let visuals = self.visuals(now);
        let mut uniforms = CardUniforms::resting(self.spec.size);
        uniforms.corner_radius = self.spec.corner_radius;
        uniforms.flip_angle = visuals.flip_angle;
        uniforms.animation_state = self.state.as_raw();

        if profile.card_effects {
            let edge = if profile.rich_glow
                || matches!(
                    self.state,
                    CardAnimationState::Floating | CardAnimationState::Celebrating
                ) {
                ROMANIAN_GOLD
            } else {
                ROMANIAN_BLUE
            };
            uniforms.selection_intensity = visuals.selection;
            uniforms.glow_intensity = visuals.glow;
            uniforms.highlight_color = with_alpha(ROMANIAN_GOLD, visuals.selection);
            uniforms.edge_glow_color = with_alpha(edge, visuals.glow);
        } else {
            uniforms.selection_intensity = 0.0;
            uniforms.glow_intensity = 0.0;
        }
        uniforms
    }

    pub(crate) fn set_spec(&mut self, spec: CardSpec) {
        self.spec = spec;
    }

    pub(crate) fn set_landing(&mut self, landing: Landing) {
        self.landing = landing;
    }

    pub(crate) fn transition(&self) -> &Transition {
        &self.transition
    }

    /// Enters `state`, interpolating from the visuals at `start` to `to`.
    pub(crate) fn begin(
        &mut self,
        state: CardAnimationState,
        start: f64,
        duration: f32,
        easing: Easing,
        to: CardVisuals,
        pulse_peak: Option<f32>,
    ) {
        let from = self.visuals(start);
        self.state = state;
        self.transition = Transition {
            start,
            duration,
            easing,
            from,
            to: to.clamped(),
            pulse_peak,
        };
    }
}

fn with_alpha(rgb: [f32; 3], alpha: f32) -> [f32; 4] {
    [rgb[0], rgb[1], rgb[2], alpha]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::QualityConfig;
    use septica_shared::RenderQuality;

    #[test]
    fn test_new_card_is_idle_and_settled() {
        let card = CardAnimation::new(CardSpec::default(), 0.0, 0.3);
        assert_eq!(card.state(), CardAnimationState::Idle);
        assert!(!card.is_transitioning(0.0));
        assert!((card.progress(0.0) - 1.0).abs() < f32::EPSILON);
        assert!((card.visuals(5.0).glow - 0.3).abs() < f32::EPSILON);
    }

    #[test]
    fn test_begin_interpolates() {
        let mut card = CardAnimation::new(CardSpec::default(), 0.0, 0.3);
        let to = CardVisuals {
            selection: 1.0,
            ..CardVisuals::resting(0.3)
        };
        card.begin(CardAnimationState::Selected, 0.0, 1.0, Easing::Linear, to, None);
        assert!((card.visuals(0.5).selection - 0.5).abs() < 1e-6);
        assert!((card.visuals(2.0).selection - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_pulse_returns_to_target() {
        let mut card = CardAnimation::new(CardSpec::default(), 0.0, 0.3);
        card.begin(
            CardAnimationState::Celebrating,
            0.0,
            1.0,
            Easing::Linear,
            CardVisuals::resting(0.3),
            Some(1.0),
        );
        assert!((card.visuals(0.5).glow - 1.0).abs() < 1e-5);
        assert!((card.visuals(1.0).glow - 0.3).abs() < 1e-5);
    }

    #[test]
    fn test_low_quality_strips_highlight() {
        let mut card = CardAnimation::new(CardSpec::default(), 0.0, 0.3);
        let to = CardVisuals {
            selection: 1.0,
            ..CardVisuals::resting(0.3)
        };
        card.begin(CardAnimationState::Selected, 0.0, 0.1, Easing::Linear, to, None);

        let low = QualityProfile::for_tier(RenderQuality::Low, &QualityConfig::default());
        let packed = card.uniforms(1.0, &low);
        assert_eq!(packed.selection_intensity, 0.0);
        assert_eq!(packed.glow_intensity, 0.0);
        assert_eq!(packed.animation_state(), Some(CardAnimationState::Selected));

        let high = QualityProfile::for_tier(RenderQuality::High, &QualityConfig::default());
        let packed = card.uniforms(1.0, &high);
        assert!((packed.selection_intensity - 1.0).abs() < 1e-6);
        assert!((packed.highlight_color[3] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_world_position_includes_lift() {
        let spec = CardSpec {
            position: [1.0, 2.0, 3.0],
            ..CardSpec::default()
        };
        let mut card = CardAnimation::new(spec, 0.0, 0.3);
        let to = CardVisuals {
            lift: 1.0,
            ..CardVisuals::resting(0.6)
        };
        card.begin(CardAnimationState::Floating, 0.0, 0.5, Easing::CubicOut, to, None);
        let [x, y, z] = card.world_position(1.0, 0.2);
        assert_eq!((x, z), (1.0, 3.0));
        assert!((y - 2.2).abs() < 1e-6);
    }
}

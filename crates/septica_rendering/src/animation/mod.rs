//! # Card Animation
//!
//! Per-card visual state driven by discrete game events:
//! - `CardAnimator` - the state machine over every visible card
//! - `CardAnimation` - one card's state and the transition in flight
//! - `Easing` - progress curves
//!
//! Durations are fixed per transition (see [`crate::config::AnimationConfig`]),
//! measured on the animator's own clock.

mod card;
mod easing;
mod events;
mod state_machine;

pub use card::{CardAnimation, CardSpec, CardVisuals};
pub use easing::{lerp, Easing};
pub use events::{CardEvent, CardId, Landing};
pub use state_machine::{CardAnimator, EventOutcome};

//! # Septica Rendering
//!
//! CPU side of the Septica card renderer:
//! - Card animation state machine driven by game events
//! - Fixed-capacity particle bursts for round wins
//! - Quality tiers scaling particles and card shading
//! - Frame packer producing records ready for GPU upload
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                       FRAME PIPELINE                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  Game events → CardEventQueue → CardAnimator → CardUniforms  │
//! │                                     ↓                        │
//! │                         RoundWon → ParticleSystem            │
//! │                                     ↓                        │
//! │  RenderQuality → QualityProfile → ParticleData + Frame       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Rules
//!
//! - No rendering API calls: the backend uploads [`FramePacket`] bytes
//! - No allocations after warm-up: the packet and the pool are reused
//! - Particles never exceed the tier cap, nor `MAX_PARTICLES`

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod config;
pub mod effects;
pub mod error;
pub mod integration;
pub mod quality;

#[cfg(feature = "wgpu")]
pub mod gpu;

pub use animation::{CardAnimator, CardEvent, CardId, CardSpec, Easing, EventOutcome, Landing};
pub use config::{AnimationConfig, EffectsConfig, ParticleStyle, QualityConfig};
pub use effects::{ParticleStats, ParticleSystem};
pub use error::{EffectsError, EffectsResult};
pub use quality::QualityProfile;

// === INTEGRATION ===
pub use integration::{
    CardEventQueue, EffectsEngine, EventSender, FrameInput, FramePacket, FrameStats,
};

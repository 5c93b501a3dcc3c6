//! # Septica Shared
//!
//! The data contract between the card renderer's shaders and its host code.
//!
//! ## CRITICAL RULE
//!
//! Everything in here crosses the CPU/GPU boundary. Field order and numeric
//! widths of the records in [`uniforms`] are the wire contract: any change
//! requires a bump of [`LAYOUT_VERSION`].
//!
//! This crate must NEVER depend on `wgpu` or any window-related crate.

#![deny(missing_docs)]
#![deny(unsafe_code)]

#[macro_use]
mod macros;

pub mod constants;
pub mod interface;
pub mod uniforms;

pub use constants::{
    ANIMATION_SPEED_MULTIPLIER, CARD_CORNER_RADIUS, DEFAULT_GLOW_INTENSITY, MAX_PARTICLES,
    ROMANIAN_BLUE, ROMANIAN_GOLD, ROMANIAN_RED,
};
pub use interface::{
    BufferIndex, CardAnimationState, RenderQuality, ShaderType, TextureIndex, VertexAttribute,
};
pub use uniforms::{CardUniforms, FrameUniforms, ParticleData, IDENTITY_MATRIX, LAYOUT_VERSION};

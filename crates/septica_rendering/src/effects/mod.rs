//! # Visual Effects System
//!
//! When a round is won, the winning card bursts into the national colors.
//!
//! This module provides:
//! - `ParticlePool` - fixed arena with O(1) allocation and reclamation
//! - `ParticleSystem` - emission and explicit Euler integration
//!
//! The pool never exceeds the active quality tier's cap, and never exceeds
//! `MAX_PARTICLES` regardless of tier.

mod particle_pool;
mod particle_system;

pub use particle_pool::{ParticleHandle, ParticlePool};
pub use particle_system::{ParticleStats, ParticleSystem};

//! Particle Simulation
//!
//! CPU-side burst particles for card celebrations:
//! 1. `emit` samples new particles into free pool slots
//! 2. `tick` integrates every live particle (explicit Euler) and reclaims
//!    the ones whose life ran out
//! 3. The frame packer copies the live set into the particle buffer
//!
//! The simulation knows nothing about cards or game rules; it only reacts to
//! emission requests.

use std::f32::consts::TAU;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use septica_shared::ParticleData;

use crate::config::ParticleStyle;
use super::particle_pool::ParticlePool;

/// Statistics from the particle system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParticleStats {
    /// Active pool capacity.
    pub capacity: u32,
    /// Currently alive particles.
    pub alive_count: u32,
    /// Particles spawned since the last tick.
    pub spawned_this_frame: u32,
    /// Spawn requests refused because the pool was saturated.
    pub dropped_this_frame: u32,
    /// Particles whose life ran out during the last tick.
    pub expired_this_frame: u32,
}

/// The particle simulation.
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    pool: ParticlePool,
    rng: ChaCha8Rng,
    /// Downward acceleration (units per second squared).
    gravity: f32,
    stats: ParticleStats,
}

impl ParticleSystem {
    /// Creates a particle system with the given active capacity.
    #[must_use]
    pub fn new(capacity: usize, gravity: f32, seed: u64) -> Self {
        let pool = ParticlePool::new(capacity);
        Self {
            stats: ParticleStats {
                capacity: pool.capacity() as u32,
                ..ParticleStats::default()
            },
            pool,
            rng: ChaCha8Rng::seed_from_u64(seed),
            gravity,
        }
    }

    /// Emits up to `count` particles at `origin`.
    ///
    /// Emits fewer when the pool is saturated; never errors. Returns how many
    /// were emitted.
    pub fn emit(&mut self, origin: [f32; 3], count: u32, style: &ParticleStyle) -> u32 {
        let mut emitted = 0;
        for _ in 0..count {
            if self.pool.free_count() == 0 {
                break;
            }
            let particle = self.sample(origin, style);
            if self.pool.allocate(particle).is_none() {
                break;
            }
            emitted += 1;
        }

        if emitted < count {
            tracing::debug!(
                requested = count,
                emitted,
                capacity = self.pool.capacity(),
                "particle pool saturated"
            );
        }
        self.stats.spawned_this_frame += emitted;
        self.stats.dropped_this_frame += count - emitted;
        self.stats.alive_count = self.pool.len() as u32;
        emitted
    }

    /// Advances every live particle by `dt` seconds.
    ///
    /// Negative or non-finite `dt` is treated as zero so life never increases.
    pub fn tick(&mut self, dt: f32) {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let gravity = self.gravity;

        let expired = self.pool.retain_mut(|p| {
            for axis in 0..3 {
                p.position[axis] += p.velocity[axis] * dt;
            }
            p.velocity[1] -= gravity * dt;
            p.life -= dt;
            p.rotation += p.rotation_speed * dt;
            p.life > 0.0
        });

        self.stats.expired_this_frame = expired as u32;
        self.stats.alive_count = self.pool.len() as u32;
    }

    /// Resets the per-frame counters. Called by the packer at frame start.
    pub fn begin_frame(&mut self) {
        self.stats.spawned_this_frame = 0;
        self.stats.dropped_this_frame = 0;
        self.stats.expired_this_frame = 0;
    }

    /// Changes the active capacity, reclaiming the oldest particles first.
    /// Returns how many were reclaimed.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        let reclaimed = self.pool.set_capacity(capacity);
        self.stats.capacity = self.pool.capacity() as u32;
        self.stats.alive_count = self.pool.len() as u32;
        reclaimed
    }

    /// Active capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.pool.capacity()
    }

    /// Number of live particles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.pool.len()
    }

    /// Live particles in slot order.
    pub fn iter_live(&self) -> impl Iterator<Item = &ParticleData> {
        self.pool.iter()
    }

    /// The underlying pool.
    #[must_use]
    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// Returns current statistics.
    #[must_use]
    pub fn stats(&self) -> ParticleStats {
        self.stats
    }

    /// Reclaims every particle.
    pub fn clear(&mut self) {
        self.pool.clear();
        self.stats.alive_count = 0;
    }

    /// Samples one particle: velocity inside a cone around +Y with an outward
    /// radial push, color from the palette, life/size/spin from the ranges.
    fn sample(&mut self, origin: [f32; 3], style: &ParticleStyle) -> ParticleData {
        let rng = &mut self.rng;

        let polar = rng.gen_range(0.0..=style.cone_half_angle);
        let azimuth = rng.gen_range(0.0..TAU);
        let speed = rng.gen_range(style.speed[0]..=style.speed[1]);
        let (sin_p, cos_p) = polar.sin_cos();
        let (sin_a, cos_a) = azimuth.sin_cos();
        let radial = sin_p + style.outward_bias;
        let velocity = [cos_a * radial * speed, cos_p * speed, sin_a * radial * speed];

        let color = if style.palette.is_empty() {
            [1.0; 4]
        } else {
            style.palette[rng.gen_range(0..style.palette.len())]
        };

        let spin = if style.spin > 0.0 {
            rng.gen_range(-style.spin..=style.spin)
        } else {
            0.0
        };

        ParticleData {
            position: origin,
            velocity,
            color,
            life: rng.gen_range(style.life[0]..=style.life[1]),
            size: rng.gen_range(style.size[0]..=style.size[1]),
            rotation: rng.gen_range(0.0..TAU),
            rotation_speed: spin,
            ..ParticleData::dead()
        }
    }
}

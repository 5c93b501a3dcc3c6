//! # Particle Pool
//!
//! Fixed arena of `MAX_PARTICLES` slots with a free list. The arena never
//! grows or shrinks; the active capacity only limits how many slots may be
//! live at once.

use septica_shared::{ParticleData, MAX_PARTICLES};

/// Handle to a live particle.
///
/// The generation makes a handle stale once its slot is reclaimed, so a
/// handle kept across ticks never aliases a newer particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleHandle {
    /// Index into the arena.
    index: u32,
    /// Slot generation at allocation time.
    generation: u32,
}

impl ParticleHandle {
    /// Slot index of this handle.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.index as usize
    }
}

#[derive(Debug, Clone, Copy)]
struct LiveParticle {
    data: ParticleData,
    /// Allocation order, used for oldest-first reclamation.
    sequence: u64,
}

#[derive(Debug, Clone, Copy, Default)]
struct Slot {
    particle: Option<LiveParticle>,
    generation: u32,
}

/// Fixed-capacity particle arena.
///
/// # Thread Safety
///
/// Not thread-safe. Mutated only from the frame tick.
#[derive(Debug, Clone)]
pub struct ParticlePool {
    /// The storage array, always `MAX_PARTICLES` long.
    slots: Box<[Slot]>,
    /// Free list - indices of available slots.
    free_list: Vec<usize>,
    /// Number of live particles.
    live: usize,
    /// Active capacity (<= `MAX_PARTICLES`).
    capacity: usize,
    /// Next allocation sequence number.
    next_sequence: u64,
    /// Scratch for oldest-first reclamation, `MAX_PARTICLES` capacity.
    by_age: Vec<(u64, usize)>,
}

impl ParticlePool {
    /// Creates a pool. `capacity` is clamped to `MAX_PARTICLES`.
    ///
    /// All memory is pre-allocated upfront.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![Slot::default(); MAX_PARTICLES].into_boxed_slice(),
            // Reversed so that pops hand out the lowest index first
            free_list: (0..MAX_PARTICLES).rev().collect(),
            live: 0,
            capacity: capacity.min(MAX_PARTICLES),
            next_sequence: 0,
            by_age: Vec::with_capacity(MAX_PARTICLES),
        }
    }

    /// Active capacity.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of live particles.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live
    }

    /// True if no particle is live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Slots still available under the active capacity.
    #[inline]
    #[must_use]
    pub const fn free_count(&self) -> usize {
        self.capacity.saturating_sub(self.live)
    }

    /// Stores a particle. O(1).
    ///
    /// Returns `None` when the active capacity is reached.
    pub fn allocate(&mut self, data: ParticleData) -> Option<ParticleHandle> {
        if self.live >= self.capacity {
            return None;
        }
        let index = self.free_list.pop()?;

        let slot = &mut self.slots[index];
        slot.particle = Some(LiveParticle {
            data,
            sequence: self.next_sequence,
        });
        self.next_sequence += 1;
        self.live += 1;

        Some(ParticleHandle {
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Reclaims a particle. O(1).
    ///
    /// Returns the particle, or `None` if the handle is stale.
    pub fn free(&mut self, handle: ParticleHandle) -> Option<ParticleData> {
        let index = handle.index();
        let slot = self.slots.get_mut(index)?;
        if slot.generation != handle.generation {
            return None;
        }
        let live = slot.particle.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free_list.push(index);
        self.live -= 1;
        Some(live.data)
    }

    /// Gets a live particle.
    #[must_use]
    pub fn get(&self, handle: ParticleHandle) -> Option<&ParticleData> {
        let slot = self.slots.get(handle.index())?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.particle.as_ref().map(|live| &live.data)
    }

    /// Updates every live particle in slot order; particles for which `keep`
    /// returns false are reclaimed. Returns how many were reclaimed.
    pub fn retain_mut(&mut self, mut keep: impl FnMut(&mut ParticleData) -> bool) -> usize {
        let mut reclaimed = 0;
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(live) = slot.particle.as_mut() else {
                continue;
            };
            if !keep(&mut live.data) {
                slot.particle = None;
                slot.generation = slot.generation.wrapping_add(1);
                self.free_list.push(index);
                reclaimed += 1;
            }
        }
        self.live -= reclaimed;
        reclaimed
    }

    /// Changes the active capacity (clamped to `MAX_PARTICLES`).
    ///
    /// When live particles exceed the new capacity, the oldest ones are
    /// reclaimed first. Returns how many were reclaimed.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity.min(MAX_PARTICLES);
        let excess = self.live.saturating_sub(self.capacity);
        if excess == 0 {
            return 0;
        }

        self.by_age.clear();
        self.by_age.extend(
            self.slots
                .iter()
                .enumerate()
                .filter_map(|(index, slot)| slot.particle.map(|live| (live.sequence, index))),
        );
        self.by_age.sort_unstable();

        for &(_, index) in self.by_age.iter().take(excess) {
            let slot = &mut self.slots[index];
            slot.particle = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free_list.push(index);
        }
        self.live -= excess;
        excess
    }

    /// Reclaims every particle.
    pub fn clear(&mut self) {
        for slot in self.slots.iter_mut() {
            if slot.particle.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
            }
        }
        self.free_list.clear();
        self.free_list.extend((0..MAX_PARTICLES).rev());
        self.live = 0;
    }

    /// Iterates over live particles in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &ParticleData> {
        self.slots
            .iter()
            .filter_map(|slot| slot.particle.as_ref().map(|live| &live.data))
    }
}

//! Frame Packer - Main integration point for the rendering backend
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         FRAME TIMELINE                          │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ├── Apply quality tier (shrink/grow particle capacity)         │
//! │  ├── Drain CardEventQueue + EventSender channel                 │
//! │  │   └── RoundWon → particle burst at the card                  │
//! │  ├── Advance CardAnimator and ParticleSystem by delta time      │
//! │  ├── Pack CardUniforms (ordered by CardId)                      │
//! │  ├── Pack ParticleData (live prefix, padded to capacity)        │
//! │  └── Write FrameUniforms                                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The packer never touches a rendering API: the backend uploads the bytes
//! of the returned [`FramePacket`] itself.

use crossbeam_channel::{Receiver, Sender};
use septica_shared::{
    CardUniforms, FrameUniforms, ParticleData, RenderQuality, ShaderType, IDENTITY_MATRIX,
};

use crate::animation::{CardAnimator, CardEvent, CardId, CardSpec, EventOutcome};
use crate::config::{EffectsConfig, ParticleStyle};
use crate::effects::ParticleSystem;
use crate::error::EffectsResult;
use crate::quality::QualityProfile;
use super::card_events::{CardEventQueue, EventSender, MAX_EVENTS_PER_FRAME};

/// Per-frame input from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInput {
    /// Projection matrix (column-major).
    pub projection: [[f32; 4]; 4],
    /// View matrix (column-major).
    pub view: [[f32; 4]; 4],
    /// Drawable size in pixels.
    pub screen_size: [f32; 2],
    /// Seconds since the previous frame.
    pub delta_time: f32,
}

impl Default for FrameInput {
    fn default() -> Self {
        Self {
            projection: IDENTITY_MATRIX,
            view: IDENTITY_MATRIX,
            screen_size: [1280.0, 720.0],
            delta_time: 1.0 / 60.0,
        }
    }
}

/// Everything the backend copies into GPU buffers for one frame.
#[derive(Debug, Clone, Default)]
pub struct FramePacket {
    /// Frame number (starts at 1).
    pub frame_number: u64,
    /// Tier the packet was produced under.
    pub quality: RenderQuality,
    /// Per-frame uniforms.
    pub frame: FrameUniforms,
    /// Card identities, parallel to `cards`.
    pub card_ids: Vec<CardId>,
    /// Shader variant per card, parallel to `cards`.
    pub card_shaders: Vec<ShaderType>,
    /// Per-card uniforms, ordered by card identity.
    pub cards: Vec<CardUniforms>,
    /// Particle buffer: `live_particles` live records, then dead padding up
    /// to the active capacity.
    pub particles: Vec<ParticleData>,
    /// Number of live records at the front of `particles`.
    pub live_particles: usize,
}

impl FramePacket {
    /// Bytes for the [`septica_shared::BufferIndex::Uniforms`] buffer.
    #[must_use]
    pub fn frame_bytes(&self) -> &[u8] {
        self.frame.as_bytes()
    }

    /// Bytes for the [`septica_shared::BufferIndex::CardUniforms`] buffer.
    #[must_use]
    pub fn card_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.cards)
    }

    /// Bytes for the [`septica_shared::BufferIndex::ParticleData`] buffer.
    #[must_use]
    pub fn particle_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.particles)
    }

    /// Only the live particle records.
    #[must_use]
    pub fn live_particles(&self) -> &[ParticleData] {
        &self.particles[..self.live_particles]
    }
}

/// Counters for the last frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Events that caused a transition.
    pub events_applied: u32,
    /// Events ignored (no edge, or unknown card).
    pub events_ignored: u32,
    /// Events pushed to the queue since the previous frame.
    pub events_received: u32,
    /// Events the queue dropped on overflow since the previous frame.
    pub events_dropped: u32,
    /// Particles emitted by celebrations.
    pub particles_emitted: u32,
    /// Particles reclaimed by a quality downgrade.
    pub particles_reclaimed: u32,
}

/// The card effects engine: state machine, particles and frame packer.
///
/// Single-threaded. Other threads feed it through [`EffectsEngine::sender`].
pub struct EffectsEngine {
    config: EffectsConfig,
    animator: CardAnimator,
    particles: ParticleSystem,
    profile: QualityProfile,
    queue: CardEventQueue,
    sender: Sender<CardEvent>,
    receiver: Receiver<CardEvent>,
    packet: FramePacket,
    frame_count: u64,
    stats: FrameStats,
}

impl EffectsEngine {
    /// Creates an engine at the default quality tier.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EffectsError::InvalidConfig`] if `config` fails
    /// validation.
    pub fn new(config: EffectsConfig) -> EffectsResult<Self> {
        config.validate()?;

        let profile = QualityProfile::for_tier(RenderQuality::default(), &config.quality);
        let (sender, receiver) = crossbeam_channel::bounded(MAX_EVENTS_PER_FRAME);

        Ok(Self {
            animator: CardAnimator::new(config.animation.clone()),
            particles: ParticleSystem::new(profile.max_particles, config.gravity, config.seed),
            profile,
            queue: CardEventQueue::new(),
            sender,
            receiver,
            packet: FramePacket::default(),
            frame_count: 0,
            stats: FrameStats::default(),
            config,
        })
    }

    /// Adds a card to the visible set, or updates a known card's spec.
    pub fn insert_card(&mut self, id: CardId, spec: CardSpec) {
        self.animator.insert_card(id, spec);
    }

    /// Removes a card leaving the visible set.
    pub fn remove_card(&mut self, id: CardId) -> bool {
        self.animator.remove_card(id)
    }

    /// Queues an event for the next frame. Returns false if dropped.
    pub fn push_event(&mut self, event: CardEvent) -> bool {
        self.queue.push(event)
    }

    /// Returns mutable access to the event queue
    pub fn event_queue_mut(&mut self) -> &mut CardEventQueue {
        &mut self.queue
    }

    /// A sender for events raised on other threads.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender::new(self.sender.clone())
    }

    /// Executes one frame and returns the packed records.
    pub fn frame(&mut self, input: &FrameInput, quality: RenderQuality) -> &FramePacket {
        self.frame_count += 1;
        self.stats = FrameStats::default();
        self.particles.begin_frame();

        // === PHASE 1: Quality tier ===
        self.apply_quality(quality);

        // === PHASE 2: Events ===
        {
            let Self {
                config,
                animator,
                particles,
                profile,
                queue,
                receiver,
                stats,
                ..
            } = self;
            for event in queue.drain().chain(receiver.try_iter()) {
                dispatch(event, animator, particles, profile, &config.emission, stats);
            }
            let intake = queue.stats();
            stats.events_received = intake.received;
            stats.events_dropped = intake.dropped;
            queue.reset_stats();
        }

        // === PHASE 3: Advance ===
        let dt = sanitize_delta(input.delta_time) * self.config.animation.speed_multiplier;
        self.animator.advance(dt);
        self.particles.tick(dt);

        // === PHASE 4: Pack ===
        let now = self.animator.time();
        let packet = &mut self.packet;
        packet.frame_number = self.frame_count;
        packet.quality = self.profile.tier;

        packet.card_ids.clear();
        packet.card_shaders.clear();
        packet.cards.clear();
        for (id, card) in self.animator.iter() {
            packet.card_ids.push(id);
            packet.card_shaders.push(self.profile.shader_for(card.state()));
            packet.cards.push(card.uniforms(now, &self.profile));
        }

        packet.particles.clear();
        packet.particles.extend(self.particles.iter_live().copied());
        packet.live_particles = packet.particles.len();
        packet
            .particles
            .resize(self.particles.capacity(), ParticleData::dead());

        packet.frame = FrameUniforms::new(
            input.projection,
            input.view,
            now as f32,
            dt,
            input.screen_size,
            self.animator.global_progress(),
        );

        &self.packet
    }

    fn apply_quality(&mut self, quality: RenderQuality) {
        if quality == self.profile.tier {
            return;
        }
        let previous = self.profile.tier;
        self.profile = QualityProfile::for_tier(quality, &self.config.quality);
        let reclaimed = self.particles.set_capacity(self.profile.max_particles);
        self.stats.particles_reclaimed += reclaimed as u32;
        tracing::info!(
            from = ?previous,
            to = ?quality,
            capacity = self.profile.max_particles,
            reclaimed,
            "render quality changed"
        );
    }

    /// The card state machine.
    #[must_use]
    pub fn animator(&self) -> &CardAnimator {
        &self.animator
    }

    /// The particle simulation.
    #[must_use]
    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    /// Budgets of the current tier.
    #[must_use]
    pub fn profile(&self) -> &QualityProfile {
        &self.profile
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &EffectsConfig {
        &self.config
    }

    /// The last packed frame.
    #[must_use]
    pub fn packet(&self) -> &FramePacket {
        &self.packet
    }

    /// Counters for the last frame.
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

fn dispatch(
    event: CardEvent,
    animator: &mut CardAnimator,
    particles: &mut ParticleSystem,
    profile: &QualityProfile,
    style: &ParticleStyle,
    stats: &mut FrameStats,
) {
    match animator.apply(event, profile.glow_peak) {
        EventOutcome::Ignored => stats.events_ignored += 1,
        EventOutcome::Transitioned(_) => stats.events_applied += 1,
        EventOutcome::Celebrate { origin } => {
            stats.events_applied += 1;
            if profile.particles_enabled() {
                stats.particles_emitted += particles.emit(origin, style.count, style);
            }
        }
    }
}

fn sanitize_delta(dt: f32) -> f32 {
    if dt.is_finite() {
        dt.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::Landing;
    use crate::integration::EventQueueStats;
    use septica_shared::CardAnimationState;

    fn engine() -> EffectsEngine {
        let mut engine = EffectsEngine::new(EffectsConfig::default()).unwrap();
        engine.insert_card(CardId(2), CardSpec::default());
        engine.insert_card(CardId(1), CardSpec::default());
        engine
    }

    #[test]
    fn test_cards_ordered_by_identity() {
        let mut engine = engine();
        let packet = engine.frame(&FrameInput::default(), RenderQuality::High);
        assert_eq!(packet.card_ids, vec![CardId(1), CardId(2)]);
        assert_eq!(packet.cards.len(), 2);
        assert_eq!(packet.card_bytes().len(), 2 * CardUniforms::SIZE);
        assert_eq!(packet.frame_number, 1);
    }

    #[test]
    fn test_particle_buffer_padded_to_capacity() {
        let mut engine = engine();
        engine.push_event(CardEvent::RoundWon(CardId(1)));
        let packet = engine.frame(&FrameInput::default(), RenderQuality::High);

        assert_eq!(packet.particles.len(), 500);
        assert_eq!(packet.live_particles, 120);
        assert!(packet.live_particles().iter().all(ParticleData::is_alive));
        assert!(packet.particles[120..].iter().all(|p| !p.is_alive()));
        assert_eq!(packet.particle_bytes().len(), 500 * ParticleData::SIZE);
    }

    #[test]
    fn test_medium_celebrates_without_particles() {
        let mut engine = engine();
        engine.push_event(CardEvent::RoundWon(CardId(1)));
        let packet = engine.frame(&FrameInput::default(), RenderQuality::Medium);

        assert_eq!(packet.live_particles, 0);
        assert!(packet.particles.is_empty());
        assert_eq!(
            packet.cards[0].animation_state(),
            Some(CardAnimationState::Celebrating)
        );
        assert_eq!(packet.card_shaders[0], ShaderType::CardHighlight);
    }

    #[test]
    fn test_frame_uniforms_written() {
        let mut engine = engine();
        let input = FrameInput {
            screen_size: [800.0, 600.0],
            delta_time: 0.5,
            ..FrameInput::default()
        };
        engine.frame(&input, RenderQuality::High);
        let packet = engine.frame(&input, RenderQuality::High);

        assert!((packet.frame.time - 1.0).abs() < 1e-6);
        assert!((packet.frame.delta_time - 0.5).abs() < 1e-6);
        assert_eq!(packet.frame.screen_size, [800.0, 600.0]);
        assert!((packet.frame.animation_progress - 1.0).abs() < f32::EPSILON);
        assert_eq!(packet.frame_bytes().len(), FrameUniforms::SIZE);
    }

    #[test]
    fn test_stats_count_ignored_events() {
        let mut engine = engine();
        engine.push_event(CardEvent::Settle(CardId(1)));
        engine.push_event(CardEvent::Select(CardId(1)));
        engine.push_event(CardEvent::Play {
            card: CardId(42),
            landing: Landing::Rest,
        });
        engine.frame(&FrameInput::default(), RenderQuality::High);

        let stats = engine.stats();
        assert_eq!(stats.events_applied, 1);
        assert_eq!(stats.events_ignored, 2);
    }

    #[test]
    fn test_queue_stats_cover_one_frame() {
        let mut engine = engine();
        for _ in 0..=MAX_EVENTS_PER_FRAME {
            engine.event_queue_mut().push_select(CardId(1));
        }
        engine.frame(&FrameInput::default(), RenderQuality::High);
        let stats = engine.stats();
        assert_eq!(stats.events_received, MAX_EVENTS_PER_FRAME as u32);
        assert_eq!(stats.events_dropped, 1);
        assert_eq!(engine.event_queue_mut().stats(), EventQueueStats::default());

        engine.event_queue_mut().push_deselect(CardId(1));
        engine.frame(&FrameInput::default(), RenderQuality::High);
        let stats = engine.stats();
        assert_eq!(stats.events_received, 1);
        assert_eq!(stats.events_dropped, 0);
        assert_eq!(stats.events_applied, 1);
    }

    #[test]
    fn test_sender_events_applied_next_frame() {
        let mut engine = engine();
        let sender = engine.sender();

        let handle = std::thread::spawn(move || sender.select(CardId(2)));
        assert!(handle.join().unwrap());

        engine.frame(&FrameInput::default(), RenderQuality::High);
        assert_eq!(
            engine.animator().card(CardId(2)).unwrap().state(),
            CardAnimationState::Selected
        );
    }

    #[test]
    fn test_rejects_invalid_config() {
        let mut config = EffectsConfig::default();
        config.animation.flip_duration = -1.0;
        assert!(EffectsEngine::new(config).is_err());
    }
}

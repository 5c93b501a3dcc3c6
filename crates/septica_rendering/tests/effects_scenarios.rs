//! # Card Effects Scenarios
//!
//! Drives the engine frame by frame through the situations a card table
//! produces: selection, play, celebration, quality changes.

use septica_rendering::animation::{CardId, CardSpec, Landing};
use septica_rendering::{EffectsConfig, EffectsEngine, FrameInput};
use septica_shared::{CardAnimationState, CardUniforms, RenderQuality, MAX_PARTICLES};

const TABLE_CARD: CardId = CardId(7);

fn input(delta_time: f32) -> FrameInput {
    FrameInput {
        delta_time,
        ..FrameInput::default()
    }
}

fn engine_with(config: EffectsConfig, card: CardSpec) -> EffectsEngine {
    let mut engine = EffectsEngine::new(config).unwrap();
    engine.insert_card(TABLE_CARD, card);
    engine
}

fn state_of(engine: &EffectsEngine, id: CardId) -> CardAnimationState {
    engine.animator().card(id).unwrap().state()
}

/// Selecting a card ramps its highlight to full over the select duration.
#[test]
fn test_select_ramps_highlight() {
    let mut engine = engine_with(EffectsConfig::default(), CardSpec::default());
    engine.event_queue_mut().push_select(TABLE_CARD);

    let mut last = 0.0;
    for _ in 0..15 {
        let packet = engine.frame(&input(1.0 / 60.0), RenderQuality::High);
        let card = packet.cards[0];
        assert!(card.selection_intensity >= last);
        assert!((0.0..=1.0).contains(&card.selection_intensity));
        last = card.selection_intensity;
    }

    let card = engine.packet().cards[0];
    assert!((card.selection_intensity - 1.0).abs() < 1e-5);
    assert_eq!(card.animation_state(), Some(CardAnimationState::Selected));
}

/// Winning with a floating card bursts at its lifted position.
#[test]
fn test_round_won_while_floating() {
    let spec = CardSpec {
        position: [1.0, 0.0, -2.0],
        ..CardSpec::default()
    };
    let config = EffectsConfig::default();
    let float_height = config.animation.float_height;
    let count = config.emission.count as usize;
    let mut engine = engine_with(config, spec);

    engine.event_queue_mut().push_select(TABLE_CARD);
    engine.frame(&input(0.25), RenderQuality::High);
    engine.event_queue_mut().push_play(TABLE_CARD, Landing::Float);
    engine.frame(&input(0.25), RenderQuality::High);
    assert_eq!(state_of(&engine, TABLE_CARD), CardAnimationState::Flipping);

    engine.frame(&input(0.6), RenderQuality::High);
    engine.frame(&input(0.5), RenderQuality::High);
    assert_eq!(state_of(&engine, TABLE_CARD), CardAnimationState::Floating);
    let face_up = engine.packet().cards[0].flip_angle;
    assert!((face_up - std::f32::consts::PI).abs() < 1e-5);

    engine.event_queue_mut().push_round_won(TABLE_CARD);
    let packet = engine.frame(&input(0.0), RenderQuality::High);

    assert_eq!(
        packet.cards[0].animation_state(),
        Some(CardAnimationState::Celebrating)
    );
    assert!(packet.live_particles > 0);
    assert!(packet.live_particles <= count);
    for particle in packet.live_particles() {
        assert!((particle.position[0] - 1.0).abs() < 1e-5);
        assert!((particle.position[1] - float_height).abs() < 1e-5);
        assert!((particle.position[2] + 2.0).abs() < 1e-5);
    }
}

/// Dropping to Low reclaims every particle by the next frame.
#[test]
fn test_downgrade_to_low_clears_particles() {
    let mut config = EffectsConfig::default();
    config.emission.count = 50;
    let mut engine = engine_with(config, CardSpec::default());

    engine.event_queue_mut().push_round_won(TABLE_CARD);
    let packet = engine.frame(&input(0.0), RenderQuality::High);
    assert_eq!(packet.live_particles, 50);

    let packet = engine.frame(&input(1.0 / 60.0), RenderQuality::Low);
    assert_eq!(packet.live_particles, 0);
    assert!(packet.particles.is_empty());
    assert_eq!(engine.stats().particles_reclaimed, 50);

    // Low keeps the state machine running but strips card effects
    let card = engine.packet().cards[0];
    assert_eq!(card.animation_state(), Some(CardAnimationState::Celebrating));
    assert!(card.glow_intensity.abs() < f32::EPSILON);
}

/// The particle buffer never exceeds the tier cap nor `MAX_PARTICLES`.
#[test]
fn test_particle_caps_per_tier() {
    for tier in RenderQuality::ALL.iter().copied() {
        let mut engine = EffectsEngine::new(EffectsConfig::default()).unwrap();
        for id in 0..32 {
            engine.insert_card(CardId(id), CardSpec::default());
        }

        for _ in 0..3 {
            for id in 0..32 {
                engine.event_queue_mut().push_round_won(CardId(id));
            }
            let packet = engine.frame(&input(1.0 / 60.0), tier);
            let (live, buffered) = (packet.live_particles, packet.particles.len());
            let cap = engine.profile().max_particles;
            assert!(live <= cap);
            assert!(live <= MAX_PARTICLES);
            assert_eq!(buffered, cap);
        }

        let expected = match tier {
            RenderQuality::Low | RenderQuality::Medium => 0,
            RenderQuality::High => 500,
            RenderQuality::Ultra => MAX_PARTICLES,
        };
        assert_eq!(engine.packet().live_particles, expected, "{tier:?}");
    }
}

/// Cards are packed by identity, not insertion order.
#[test]
fn test_cards_packed_by_identity() {
    let mut engine = EffectsEngine::new(EffectsConfig::default()).unwrap();
    for id in [5, 1, 3] {
        engine.insert_card(CardId(id), CardSpec::default());
    }
    engine.remove_card(CardId(3));

    let packet = engine.frame(&input(1.0 / 60.0), RenderQuality::Ultra);
    assert_eq!(packet.card_ids, vec![CardId(1), CardId(5)]);
    assert_eq!(packet.card_shaders.len(), 2);
}

/// Packed card bytes read back as the same records.
#[test]
fn test_card_bytes_read_back() {
    let mut engine = engine_with(EffectsConfig::default(), CardSpec::default());
    engine.insert_card(CardId(9), CardSpec::default());
    engine.event_queue_mut().push_select(CardId(9));
    engine.frame(&input(0.1), RenderQuality::High);

    let packet = engine.packet();
    let decoded: Vec<CardUniforms> = packet
        .card_bytes()
        .chunks_exact(CardUniforms::SIZE)
        .map(|chunk| CardUniforms::from_bytes(chunk).unwrap())
        .collect();
    assert_eq!(decoded, packet.cards);
}

/// Events sent from another thread are applied on the next tick, not before.
#[test]
fn test_cross_thread_events() {
    let mut engine = engine_with(EffectsConfig::default(), CardSpec::default());
    let sender = engine.sender();

    std::thread::spawn(move || {
        assert!(sender.select(TABLE_CARD));
    })
    .join()
    .unwrap();

    assert_eq!(state_of(&engine, TABLE_CARD), CardAnimationState::Idle);
    engine.frame(&input(1.0 / 60.0), RenderQuality::High);
    assert_eq!(state_of(&engine, TABLE_CARD), CardAnimationState::Selected);
}

/// Frame progress is 1.0 at rest and inside [0, 1] while animating.
#[test]
fn test_global_progress() {
    let mut engine = engine_with(EffectsConfig::default(), CardSpec::default());
    let packet = engine.frame(&input(1.0 / 60.0), RenderQuality::Medium);
    assert!((packet.frame.animation_progress - 1.0).abs() < f32::EPSILON);

    engine.event_queue_mut().push_select(TABLE_CARD);
    let packet = engine.frame(&input(0.05), RenderQuality::Medium);
    assert!(packet.frame.animation_progress > 0.0);
    assert!(packet.frame.animation_progress < 1.0);
}

/// A broken delta time never moves the clock backwards.
#[test]
fn test_bad_delta_time_ignored() {
    let mut engine = engine_with(EffectsConfig::default(), CardSpec::default());
    engine.frame(&input(0.5), RenderQuality::High);
    engine.frame(&input(-3.0), RenderQuality::High);
    engine.frame(&input(f32::NAN), RenderQuality::High);

    assert!((engine.animator().time() - 0.5).abs() < 1e-6);
    assert!((engine.packet().frame.delta_time).abs() < f32::EPSILON);
}

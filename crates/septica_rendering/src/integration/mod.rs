//! # Frame Integration
//!
//! Ties the card state machine, the particle simulation and the quality
//! tiers into one per-frame call:
//! - `CardEventQueue` / `EventSender` - event intake, drained at tick start
//! - `EffectsEngine` - runs the frame and packs GPU-ready records
//!
//! ## Usage
//!
//! ```rust
//! use septica_rendering::integration::{EffectsEngine, FrameInput};
//! use septica_rendering::animation::{CardId, CardSpec};
//! use septica_rendering::EffectsConfig;
//! use septica_shared::RenderQuality;
//!
//! let mut engine = EffectsEngine::new(EffectsConfig::default()).unwrap();
//! engine.insert_card(CardId(7), CardSpec::default());
//! engine.event_queue_mut().push_select(CardId(7));
//!
//! let packet = engine.frame(&FrameInput::default(), RenderQuality::High);
//! assert_eq!(packet.cards.len(), 1);
//! ```

mod card_events;
mod frame_packer;

pub use card_events::{CardEventQueue, EventQueueStats, EventSender, MAX_EVENTS_PER_FRAME};
pub use frame_packer::{EffectsEngine, FrameInput, FramePacket, FrameStats};

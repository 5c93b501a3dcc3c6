//! Card Event Queue - Receives game events for the next tick
//!
//! Events are never applied mid-tick. Same-thread hosts push into the
//! [`CardEventQueue`]; hosts on other threads use an [`EventSender`] whose
//! channel the engine drains right after the queue.
//!
//! ```text
//! Game logic (render thread) ──► CardEventQueue ──┐
//!                                                 ├──► tick start ──► CardAnimator
//! Game logic (other thread)  ──► EventSender ─────┘
//! ```

use std::collections::VecDeque;

use crossbeam_channel::{Sender, TrySendError};

use crate::animation::{CardEvent, CardId, Landing};

/// Maximum events to queue per frame
pub const MAX_EVENTS_PER_FRAME: usize = 256;

/// Statistics from the event queue
///
/// The engine copies these into its frame stats and resets them once per
/// frame, right after draining.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventQueueStats {
    /// Events received since the last reset
    pub received: u32,
    /// Events handed out by drains since the last reset
    pub processed: u32,
    /// Events dropped (overflow) since the last reset
    pub dropped: u32,
}

/// Bounded queue of card events, drained at the start of each tick.
#[derive(Debug, Clone)]
pub struct CardEventQueue {
    /// Pending events
    events: VecDeque<CardEvent>,
    /// Statistics
    stats: EventQueueStats,
}

impl CardEventQueue {
    /// Creates a new event queue
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: VecDeque::with_capacity(MAX_EVENTS_PER_FRAME),
            stats: EventQueueStats::default(),
        }
    }

    /// Pushes an event to the queue
    ///
    /// Returns false if the queue is full (event dropped).
    pub fn push(&mut self, event: CardEvent) -> bool {
        if self.events.len() >= MAX_EVENTS_PER_FRAME {
            self.stats.dropped += 1;
            tracing::warn!(card = event.card().0, "card event queue full, event dropped");
            return false;
        }
        self.events.push_back(event);
        self.stats.received += 1;
        true
    }

    /// Pushes a select event
    pub fn push_select(&mut self, card: CardId) -> bool {
        self.push(CardEvent::Select(card))
    }

    /// Pushes a deselect event
    pub fn push_deselect(&mut self, card: CardId) -> bool {
        self.push(CardEvent::Deselect(card))
    }

    /// Pushes a play event
    pub fn push_play(&mut self, card: CardId, landing: Landing) -> bool {
        self.push(CardEvent::Play { card, landing })
    }

    /// Pushes a round-won event
    pub fn push_round_won(&mut self, card: CardId) -> bool {
        self.push(CardEvent::RoundWon(card))
    }

    /// Pushes a settle event
    pub fn push_settle(&mut self, card: CardId) -> bool {
        self.push(CardEvent::Settle(card))
    }

    /// Drains all events for processing
    ///
    /// Call this at the start of each tick.
    pub fn drain(&mut self) -> impl Iterator<Item = CardEvent> + '_ {
        self.stats.processed += self.events.len() as u32;
        self.events.drain(..)
    }

    /// Returns the number of pending events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if the queue is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Returns statistics
    #[must_use]
    pub fn stats(&self) -> EventQueueStats {
        self.stats
    }

    /// Resets statistics, called once per frame
    pub fn reset_stats(&mut self) {
        self.stats = EventQueueStats::default();
    }
}

impl Default for CardEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Sending half for hosts that raise events on another thread.
///
/// Never blocks: when the channel is full the event is dropped and `false`
/// returned, matching [`CardEventQueue::push`].
#[derive(Debug, Clone)]
pub struct EventSender {
    sender: Sender<CardEvent>,
}

impl EventSender {
    pub(crate) fn new(sender: Sender<CardEvent>) -> Self {
        Self { sender }
    }

    /// Sends an event for the next tick.
    ///
    /// Returns false if the channel is full or the engine is gone.
    pub fn send(&self, event: CardEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(card = event.card().0, "card event channel full, event dropped");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Sends a select event
    pub fn select(&self, card: CardId) -> bool {
        self.send(CardEvent::Select(card))
    }

    /// Sends a deselect event
    pub fn deselect(&self, card: CardId) -> bool {
        self.send(CardEvent::Deselect(card))
    }

    /// Sends a play event
    pub fn play(&self, card: CardId, landing: Landing) -> bool {
        self.send(CardEvent::Play { card, landing })
    }

    /// Sends a round-won event
    pub fn round_won(&self, card: CardId) -> bool {
        self.send(CardEvent::RoundWon(card))
    }

    /// Sends a settle event
    pub fn settle(&self, card: CardId) -> bool {
        self.send(CardEvent::Settle(card))
    }
}

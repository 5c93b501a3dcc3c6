//! # Card Animation State Machine
//!
//! ```text
//!            select              play               (flip done, Float)
//!   Idle ───────────► Selected ───────► Flipping ─────────────────────► Floating
//!    ▲  ◄───────────     │                 │                              │
//!    │     deselect      │                 │ (flip done, Rest)            │ settle
//!    ├───────────────────┴─────────────────┘                              │
//!    ◄────────────────────────────────────────────────────────────────────┘
//!
//!   Any ──round won──► Celebrating ──(done)──► Idle
//! ```
//!
//! Events that have no edge from the current state are ignored. Re-entering
//! the same transition restarts its timer from the current visuals.

use std::collections::BTreeMap;
use std::f32::consts::{FRAC_PI_2, PI};

use septica_shared::CardAnimationState;

use crate::config::AnimationConfig;
use super::card::{CardAnimation, CardSpec, CardVisuals};
use super::easing::Easing;
use super::events::{CardEvent, CardId, Landing};

/// What applying an event did.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventOutcome {
    /// No edge for this event from the card's state, or unknown card.
    Ignored,
    /// The card entered a new state (or restarted the current one).
    Transitioned(CardAnimationState),
    /// The card started celebrating; particles should burst at `origin`.
    Celebrate {
        /// World position of the celebrating card.
        origin: [f32; 3],
    },
}

/// Drives every visible card. Iteration is ordered by [`CardId`].
#[derive(Debug, Clone)]
pub struct CardAnimator {
    config: AnimationConfig,
    cards: BTreeMap<CardId, CardAnimation>,
    /// Animation clock in seconds.
    time: f64,
}

impl CardAnimator {
    /// Creates an animator with no cards.
    #[must_use]
    pub fn new(config: AnimationConfig) -> Self {
        Self {
            config,
            cards: BTreeMap::new(),
            time: 0.0,
        }
    }

    /// Current animation clock.
    #[inline]
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Timing configuration.
    #[must_use]
    pub const fn config(&self) -> &AnimationConfig {
        &self.config
    }

    /// Adds a card in `Idle`, or updates the spec of a known card.
    pub fn insert_card(&mut self, id: CardId, spec: CardSpec) {
        if let Some(card) = self.cards.get_mut(&id) {
            card.set_spec(spec);
        } else {
            self.cards
                .insert(id, CardAnimation::new(spec, self.time, self.config.baseline_glow));
        }
    }

    /// Removes a card leaving the visible set. Returns false if unknown.
    pub fn remove_card(&mut self, id: CardId) -> bool {
        self.cards.remove(&id).is_some()
    }

    /// Looks up a card.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&CardAnimation> {
        self.cards.get(&id)
    }

    /// Number of visible cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// True if no cards are visible.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Cards in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (CardId, &CardAnimation)> {
        self.cards.iter().map(|(id, card)| (*id, card))
    }

    /// Applies one event at the current clock.
    ///
    /// `glow_peak` is the celebration pulse peak of the active quality tier.
    pub fn apply(&mut self, event: CardEvent, glow_peak: f32) -> EventOutcome {
        let now = self.time;
        let config = &self.config;
        let Some(card) = self.cards.get_mut(&event.card()) else {
            tracing::trace!(card = event.card().0, "event for unknown card ignored");
            return EventOutcome::Ignored;
        };

        let previous = card.state();
        let current = card.visuals(now);
        let rest = CardVisuals {
            flip_angle: current.flip_angle,
            ..CardVisuals::resting(config.baseline_glow)
        };

        let outcome = match (previous, event) {
            (_, CardEvent::RoundWon(_)) => {
                let origin = card.world_position(now, config.float_height);
                // An interrupted flip still lands on its target face
                let to = CardVisuals {
                    selection: 0.0,
                    glow: config.baseline_glow,
                    flip_angle: card.transition().target().flip_angle,
                    ..current
                };
                card.begin(
                    CardAnimationState::Celebrating,
                    now,
                    config.celebrate_duration,
                    Easing::SineInOut,
                    to,
                    Some(glow_peak),
                );
                EventOutcome::Celebrate { origin }
            }
            (CardAnimationState::Idle | CardAnimationState::Selected, CardEvent::Select(_)) => {
                let to = CardVisuals {
                    selection: 1.0,
                    glow: config.baseline_glow,
                    ..current
                };
                card.begin(
                    CardAnimationState::Selected,
                    now,
                    config.select_duration,
                    Easing::CubicOut,
                    to,
                    None,
                );
                EventOutcome::Transitioned(CardAnimationState::Selected)
            }
            (CardAnimationState::Selected, CardEvent::Deselect(_)) => {
                card.begin(
                    CardAnimationState::Idle,
                    now,
                    config.deselect_duration,
                    Easing::CubicOut,
                    rest,
                    None,
                );
                EventOutcome::Transitioned(CardAnimationState::Idle)
            }
            (CardAnimationState::Selected, CardEvent::Play { landing, .. }) => {
                let target = if current.flip_angle < FRAC_PI_2 { PI } else { 0.0 };
                let to = CardVisuals {
                    selection: 0.0,
                    flip_angle: target,
                    ..current
                };
                card.set_landing(landing);
                card.begin(
                    CardAnimationState::Flipping,
                    now,
                    config.flip_duration,
                    Easing::CubicInOut,
                    to,
                    None,
                );
                EventOutcome::Transitioned(CardAnimationState::Flipping)
            }
            (CardAnimationState::Floating, CardEvent::Settle(_)) => {
                card.begin(
                    CardAnimationState::Idle,
                    now,
                    config.settle_duration,
                    Easing::CubicOut,
                    rest,
                    None,
                );
                EventOutcome::Transitioned(CardAnimationState::Idle)
            }
            _ => {
                tracing::trace!(
                    card = event.card().0,
                    state = ?previous,
                    event = ?event,
                    "inapplicable event ignored"
                );
                return EventOutcome::Ignored;
            }
        };

        tracing::debug!(
            card = event.card().0,
            from = ?previous,
            to = ?card.state(),
            "card transition"
        );
        outcome
    }

    /// Advances the clock by `dt` seconds and completes finished flips and
    /// celebrations.
    pub fn advance(&mut self, dt: f32) {
        self.time += f64::from(dt);
        let now = self.time;
        let config = &self.config;

        for (id, card) in &mut self.cards {
            while !card.is_transitioning(now) {
                let end = card.transition().end();
                let settled = card.visuals(end);
                let rest = CardVisuals {
                    flip_angle: settled.flip_angle,
                    ..CardVisuals::resting(config.baseline_glow)
                };
                let previous = card.state();

                match (previous, card.landing()) {
                    (CardAnimationState::Flipping, Landing::Float) => {
                        let to = CardVisuals {
                            lift: 1.0,
                            glow: config.float_glow,
                            ..settled
                        };
                        card.begin(
                            CardAnimationState::Floating,
                            end,
                            config.float_duration,
                            Easing::CubicOut,
                            to,
                            None,
                        );
                    }
                    (CardAnimationState::Flipping, Landing::Rest)
                    | (CardAnimationState::Celebrating, _) => {
                        card.begin(
                            CardAnimationState::Idle,
                            end,
                            config.rest_duration,
                            Easing::CubicOut,
                            rest,
                            None,
                        );
                    }
                    _ => break,
                }

                tracing::debug!(
                    card = id.0,
                    from = ?previous,
                    to = ?card.state(),
                    "card transition completed"
                );
            }
        }
    }

    /// Global animation progress: eased progress of the most recently started
    /// transition still running, or 1.0 when every card is at rest.
    #[must_use]
    pub fn global_progress(&self) -> f32 {
        let now = self.time;
        self.cards
            .values()
            .filter(|card| card.is_transitioning(now))
            .max_by(|a, b| a.transition().start.total_cmp(&b.transition().start))
            .map_or(1.0, |card| card.progress(now))
    }
}

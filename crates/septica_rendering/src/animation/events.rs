//! Discrete inputs to the card state machine.

/// Identity of a visible card. Packing order follows this ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardId(pub u32);

/// Where a played card goes once its flip completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Landing {
    /// Back to rest on the table.
    #[default]
    Rest,
    /// Lifted above the table until settled (e.g. the card took the trick).
    Float,
}

/// Game events the state machine reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardEvent {
    /// The player picked the card.
    Select(CardId),
    /// The player dropped the selection.
    Deselect(CardId),
    /// The card was played and turns over.
    Play {
        /// Card being played.
        card: CardId,
        /// State entered once the flip completes.
        landing: Landing,
    },
    /// The round was won with this card.
    RoundWon(CardId),
    /// The trick was resolved, a floating card comes back down.
    Settle(CardId),
}

impl CardEvent {
    /// The card this event targets.
    #[must_use]
    pub const fn card(&self) -> CardId {
        match self {
            Self::Select(card)
            | Self::Deselect(card)
            | Self::RoundWon(card)
            | Self::Settle(card)
            | Self::Play { card, .. } => *card,
        }
    }
}

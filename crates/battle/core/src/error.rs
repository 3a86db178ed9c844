//! Error types surfaced by the battle core.
//!
//! Everything here is a logic or content error: there is no retry path in a
//! turn-based battle, so callers are expected to fail fast during
//! development rather than continue with undefined data.

use crate::combatant::Side;
use crate::session::BattleState;

/// Errors surfaced while driving a battle session.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BattleError {
    /// A combatant was asked to take a combat turn with no resolved attacks.
    ///
    /// This indicates malformed content data (every battle-capable entity
    /// must know at least one attack), not a recoverable runtime condition.
    #[error("{side} combatant '{name}' has no attacks available")]
    NoAttacksAvailable { side: Side, name: String },

    /// An attack index outside the combatant's resolved attack list.
    #[error("unknown attack index {index} (combatant knows {available} attacks)")]
    UnknownAttackIndex { index: usize, available: usize },

    /// A session call that is not valid in the current state.
    ///
    /// The session state is left unchanged when this is returned.
    #[error("invalid in state {actual} (expected {expected})")]
    InvalidState {
        expected: BattleState,
        actual: BattleState,
    },

    /// An action the acting side is not capable of (enemies cannot flee or
    /// use items).
    #[error("{side} side cannot {action}")]
    ActionUnavailable { side: Side, action: &'static str },
}

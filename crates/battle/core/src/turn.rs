//! Round-level decisions: action order, damage, and flee resolution.

use crate::combatant::{Combatant, Side};
use crate::rng::RngOracle;

/// Action order for one round of the BATTLE state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOrder {
    /// Both combatants act, `first` leading.
    Both { first: Side },
    /// The player's turn was already consumed (item use or failed flee);
    /// only the enemy acts this round.
    EnemyOnly,
}

impl TurnOrder {
    /// Acting sides in sequence.
    pub fn sequence(self) -> Vec<Side> {
        match self {
            TurnOrder::Both { first } => vec![first, first.opponent()],
            TurnOrder::EnemyOnly => vec![Side::Enemy],
        }
    }
}

/// Decide who acts this round.
///
/// A consumed player turn always yields the enemy-only order; otherwise the
/// lead is a fair coin flip.
pub fn decide_order(turn_consumed: bool, rng: &dyn RngOracle, seed: u64) -> TurnOrder {
    if turn_consumed {
        return TurnOrder::EnemyOnly;
    }

    let first = if rng.coin_flip(seed) {
        Side::Player
    } else {
        Side::Enemy
    };
    TurnOrder::Both { first }
}

/// Damage dealt by one successful attack.
///
/// Deliberately flat: the observed game applies the attacker's base attack
/// with no variance, critical hits, or type modifiers. Richer combat math
/// belongs here if it is ever added.
pub fn compute_damage(attacker: &Combatant) -> u32 {
    attacker.base_attack()
}

/// Resolve a flee attempt: roll a die and succeed on a high roll.
///
/// With the default d10 and threshold 5 this is a 50% chance. On failure
/// the enemy still takes a turn before control returns to the player.
pub fn resolve_flee_attempt(
    rng: &dyn RngOracle,
    seed: u64,
    die_sides: u32,
    threshold: u32,
) -> bool {
    rng.roll_die(seed, die_sides) > threshold
}

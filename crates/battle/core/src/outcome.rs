//! Post-attack outcome evaluation.

use crate::combatant::Combatant;

/// Result of the post-attack check for one round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleOutcome {
    /// Neither side fainted; the battle returns to player input.
    Continue,
    /// The enemy fainted this round.
    EnemyDefeated,
    /// The player's active combatant fainted this round.
    PlayerDefeated,
}

/// How a finished session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleEnding {
    EnemyDefeated,
    PlayerDefeated,
    /// The player got away before either side was defeated.
    Fled,
}

/// Evaluate which side, if any, went down this round.
///
/// The enemy is checked first: when the player's attack resolves the
/// knockout, the enemy does not get a posthumous retaliation credited.
pub fn evaluate_outcome(player: &Combatant, enemy: &Combatant) -> BattleOutcome {
    if enemy.is_fainted() {
        return BattleOutcome::EnemyDefeated;
    }
    if player.is_fainted() {
        return BattleOutcome::PlayerDefeated;
    }
    BattleOutcome::Continue
}

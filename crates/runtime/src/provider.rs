//! Asynchronous abstraction for sourcing the player's menu choice.
//!
//! Runtime users plug in a [`PlayerActionProvider`] so a battle can run with
//! human input, scripted fixtures, or an autoplayer.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use battle_core::{Combatant, PlayerAction};

use crate::error::{Result, RuntimeError};

/// Read-only view of the battle handed to a provider when the menu opens.
pub struct BattleView<'a> {
    pub player: &'a Combatant,
    pub enemy: &'a Combatant,
}

/// Supplies the player's action each time the battle menu is shown.
#[async_trait]
pub trait PlayerActionProvider: Send + Sync {
    async fn choose(&self, view: BattleView<'_>) -> Result<PlayerAction>;
}

/// Replays a fixed list of actions, then errors.
///
/// Used by tests and scripted demos; running dry means the script did not
/// account for every round, which is a fixture bug worth failing on.
pub struct ScriptedActionProvider {
    actions: Mutex<VecDeque<PlayerAction>>,
    total: usize,
}

impl ScriptedActionProvider {
    pub fn new(actions: impl IntoIterator<Item = PlayerAction>) -> Self {
        let actions: VecDeque<PlayerAction> = actions.into_iter().collect();
        let total = actions.len();
        Self {
            actions: Mutex::new(actions),
            total,
        }
    }
}

#[async_trait]
impl PlayerActionProvider for ScriptedActionProvider {
    async fn choose(&self, _view: BattleView<'_>) -> Result<PlayerAction> {
        self.actions
            .lock()
            .expect("action script mutex poisoned")
            .pop_front()
            .ok_or(RuntimeError::ScriptExhausted(self.total))
    }
}

/// Autoplayer that always fights with the first known attack.
pub struct FirstAttackProvider;

#[async_trait]
impl PlayerActionProvider for FirstAttackProvider {
    async fn choose(&self, _view: BattleView<'_>) -> Result<PlayerAction> {
        Ok(PlayerAction::Fight { attack_index: 0 })
    }
}

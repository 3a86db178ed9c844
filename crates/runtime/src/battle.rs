//! High-level battle driver.
//!
//! [`BattleRuntime`] owns a session and its injected collaborators and runs
//! the whole battle: play each cue batch through the presenter, ask the
//! action provider whenever the menu opens, and persist the player's HP
//! through the party store as it changes.

use battle_core::{
    BattleCue, BattleEnding, BattleOutcome, BattleSession, BattleState, PlayerAction, Side,
};

use crate::error::{Result, RuntimeError};
use crate::presenter::BattlePresenter;
use crate::provider::{BattleView, PlayerActionProvider};
use crate::store::PartyStore;

/// Summary of a finished battle, handed back to the surrounding scene code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BattleReport {
    pub ending: BattleEnding,
    /// Outcome of the last post-attack check, if any round completed.
    pub last_outcome: Option<BattleOutcome>,
    /// Surfaces to the overworld so it can heal the party and reposition
    /// the player.
    pub player_knocked_out: bool,
    pub final_player_hp: u32,
}

/// Drives one battle session from intro to finish.
pub struct BattleRuntime {
    session: BattleSession,
    presenter: Box<dyn BattlePresenter>,
    provider: Box<dyn PlayerActionProvider>,
    store: Box<dyn PartyStore>,
    last_state: BattleState,
    final_hp_persisted: bool,
}

impl BattleRuntime {
    pub fn builder() -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new()
    }

    pub fn session(&self) -> &BattleSession {
        &self.session
    }

    /// Run the battle to completion.
    pub async fn run(&mut self) -> Result<BattleReport> {
        let cues = self.session.begin()?;
        self.presenter.state_entered(self.session.state()).await?;
        self.play(cues).await?;

        while !self.session.is_finished() {
            let cues = if self.session.state() == BattleState::PlayerInput {
                self.player_turn().await?
            } else {
                self.session.acknowledge()?
            };
            self.note_state().await?;
            self.play(cues).await?;
        }

        let ending = self.session.ending().ok_or(RuntimeError::MissingEnding)?;
        let report = BattleReport {
            ending,
            last_outcome: self.session.outcome(),
            player_knocked_out: self.session.is_player_knocked_out(),
            final_player_hp: self.session.player().hp().current(),
        };
        tracing::info!(
            ending = %report.ending,
            player_hp = report.final_player_hp,
            knocked_out = report.player_knocked_out,
            "battle finished"
        );
        Ok(report)
    }

    /// Ask the provider for the next menu choice and submit it.
    async fn player_turn(&mut self) -> Result<Vec<BattleCue>> {
        let action = {
            let view = BattleView {
                player: self.session.player(),
                enemy: self.session.enemy(),
            };
            self.provider.choose(view).await?
        };
        tracing::debug!(?action, "player action chosen");

        if matches!(action, PlayerAction::UseItem) {
            // Item effects land in the roster through the inventory flow;
            // sync the session's combatant before the enemy's free turn.
            let member = self.store.active_member()?;
            let cue = self.session.restore_player_hp(member.current_hp);
            self.presenter.present(&cue).await?;
        }

        Ok(self.session.submit_player_action(action)?)
    }

    /// Present a cue batch in order, persisting player HP as it changes.
    async fn play(&mut self, cues: Vec<BattleCue>) -> Result<()> {
        for cue in &cues {
            self.presenter.present(cue).await?;
            self.persist(cue)?;
        }
        Ok(())
    }

    /// Write player HP back to the roster on every change and once at the
    /// finish cue. Nothing is written after that, so re-entering FINISHED
    /// can never double-apply persistence. Health cues outside the BATTLE
    /// state are initial bar renders, not changes, and are not written.
    fn persist(&mut self, cue: &BattleCue) -> Result<()> {
        if self.final_hp_persisted {
            return Ok(());
        }
        match cue {
            BattleCue::HealthUpdate {
                side: Side::Player,
                current,
                ..
            } if self.session.state() == BattleState::Battle => {
                self.store.set_active_member_hp(*current)?;
            }
            BattleCue::SceneFinish { .. } => {
                self.store
                    .set_active_member_hp(self.session.player().hp().current())?;
                self.final_hp_persisted = true;
            }
            _ => {}
        }
        Ok(())
    }

    async fn note_state(&mut self) -> Result<()> {
        let state = self.session.state();
        if state != self.last_state {
            tracing::debug!(%state, "battle state entered");
            self.presenter.state_entered(state).await?;
            self.last_state = state;
        }
        Ok(())
    }
}

/// Builder for [`BattleRuntime`].
pub struct BattleRuntimeBuilder {
    session: Option<BattleSession>,
    presenter: Option<Box<dyn BattlePresenter>>,
    provider: Option<Box<dyn PlayerActionProvider>>,
    store: Option<Box<dyn PartyStore>>,
}

impl BattleRuntimeBuilder {
    fn new() -> Self {
        Self {
            session: None,
            presenter: None,
            provider: None,
            store: None,
        }
    }

    pub fn session(mut self, session: BattleSession) -> Self {
        self.session = Some(session);
        self
    }

    pub fn presenter(mut self, presenter: impl BattlePresenter + 'static) -> Self {
        self.presenter = Some(Box::new(presenter));
        self
    }

    pub fn provider(mut self, provider: impl PlayerActionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    pub fn store(mut self, store: impl PartyStore + 'static) -> Self {
        self.store = Some(Box::new(store));
        self
    }

    pub fn build(self) -> Result<BattleRuntime> {
        let session = self.session.ok_or(RuntimeError::MissingComponent {
            component: "session",
        })?;
        let presenter = self.presenter.ok_or(RuntimeError::MissingComponent {
            component: "presenter",
        })?;
        let provider = self.provider.ok_or(RuntimeError::MissingComponent {
            component: "action provider",
        })?;
        let store = self.store.ok_or(RuntimeError::MissingComponent {
            component: "party store",
        })?;

        Ok(BattleRuntime {
            last_state: session.state(),
            session,
            presenter,
            provider,
            store,
            final_hp_persisted: false,
        })
    }
}

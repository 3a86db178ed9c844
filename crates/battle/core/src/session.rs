//! The battle state machine.
//!
//! [`BattleSession`] sequences one battle from intro to finish. The host
//! drives it cooperatively: every call returns a batch of [`BattleCue`]s for
//! the presentation layer to play, strictly in order, and the host calls
//! [`BattleSession::acknowledge`] once the batch has completed. Internally
//! the session keeps an explicit continuation queue, so at most one
//! presentation batch is ever outstanding and no two steps run concurrently.
//!
//! State flow:
//!
//! ```text
//! INTRO -> PRE_BATTLE_INFO -> BRING_OUT_CHARACTER -> PLAYER_INPUT
//!   PLAYER_INPUT --fight/item--> ENEMY_INPUT -> BATTLE -> POST_ATTACK_CHECK
//!   PLAYER_INPUT --flee--------> FLEE_ATTEMPT -> FINISHED | ENEMY_INPUT
//!   POST_ATTACK_CHECK ----------> PLAYER_INPUT | FINISHED
//! ```

use std::collections::VecDeque;

use crate::combatant::{Combatant, Side};
use crate::config::BattleConfig;
use crate::error::BattleError;
use crate::outcome::{BattleEnding, BattleOutcome, evaluate_outcome};
use crate::rng::{RngOracle, compute_seed};
use crate::turn::{compute_damage, decide_order, resolve_flee_attempt};

/// Battle state machine states, one active at a time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BattleState {
    Intro,
    PreBattleInfo,
    BringOutCharacter,
    PlayerInput,
    EnemyInput,
    Battle,
    PostAttackCheck,
    FleeAttempt,
    Finished,
}

/// Action the player chose from the battle menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerAction {
    Fight { attack_index: usize },
    /// An inventory item was used; the effect itself is applied by the host
    /// (see [`BattleSession::restore_player_hp`]), the session only charges
    /// the turn.
    UseItem,
    Flee,
}

/// Presentation request emitted by the session.
///
/// Each batch of cues must be played in order and then acknowledged as a
/// whole. The session never emits a new batch until the previous one has
/// been acknowledged.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BattleCue {
    /// Entry fade-in for the battle scene.
    SceneTransition,
    /// Slide/fade a combatant onto the field.
    CombatantAppear {
        side: Side,
        name: String,
        asset_key: String,
    },
    /// Queued info-pane text. When `wait_for_input` is false the lines
    /// collapse after a timed delay instead of waiting for acknowledgment.
    Message {
        lines: Vec<String>,
        wait_for_input: bool,
    },
    /// Expose the Fight/Item/Flee menu and wait for a player decision.
    ShowBattleMenu,
    /// Play an attack animation against the target side.
    Attack {
        attacker: Side,
        target: Side,
        animation: String,
        audio_key: String,
    },
    /// Animate a health bar to the given values.
    HealthUpdate {
        side: Side,
        current: u32,
        maximum: u32,
    },
    /// Play the faint/death animation for a side.
    Faint { side: Side },
    /// Exit fade-out; the host loads the next scene with this flag.
    SceneFinish { player_knocked_out: bool },
}

/// Pending continuation steps, executed one per acknowledgment.
#[derive(Clone, Debug)]
enum Step {
    EnterPreBattleInfo,
    EnterBringOutCharacter,
    EnterPlayerInput,
    EnterEnemyInput,
    Attack { attacker: Side, attack_index: usize },
    PostAttackCheck,
    FleeAttempt,
    Finish,
}

/// One battle from intro to finish: exactly one player combatant and one
/// enemy combatant, mutated in place as the rounds resolve.
pub struct BattleSession {
    player: Combatant,
    enemy: Combatant,
    config: BattleConfig,
    rng: Box<dyn RngOracle>,

    state: BattleState,
    steps: VecDeque<Step>,
    begun: bool,

    player_attack_index: Option<usize>,
    turn_consumed: bool,
    player_knocked_out: bool,
    finish_emitted: bool,

    outcome: Option<BattleOutcome>,
    ending: Option<BattleEnding>,

    /// Random-decision counter, mixed into every seed.
    nonce: u64,
}

impl BattleSession {
    pub fn new(
        player: Combatant,
        enemy: Combatant,
        config: BattleConfig,
        rng: impl RngOracle + 'static,
    ) -> Self {
        Self {
            player,
            enemy,
            config,
            rng: Box::new(rng),
            state: BattleState::Intro,
            steps: VecDeque::new(),
            begun: false,
            player_attack_index: None,
            turn_consumed: false,
            player_knocked_out: false,
            finish_emitted: false,
            outcome: None,
            ending: None,
            nonce: 0,
        }
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn player(&self) -> &Combatant {
        &self.player
    }

    pub fn enemy(&self) -> &Combatant {
        &self.enemy
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    /// Outcome of the most recent post-attack check, if any.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        self.outcome
    }

    /// How the battle ended, once it has.
    pub fn ending(&self) -> Option<BattleEnding> {
        self.ending
    }

    pub fn is_player_knocked_out(&self) -> bool {
        self.player_knocked_out
    }

    pub fn is_finished(&self) -> bool {
        self.state == BattleState::Finished
    }

    /// Start the session: enters INTRO and emits the entry transition cue.
    pub fn begin(&mut self) -> Result<Vec<BattleCue>, BattleError> {
        if self.begun {
            return Err(BattleError::InvalidState {
                expected: BattleState::Intro,
                actual: self.state,
            });
        }
        self.begun = true;
        self.steps.push_back(Step::EnterPreBattleInfo);
        Ok(vec![BattleCue::SceneTransition])
    }

    /// Advance after the host finished presenting the previous cue batch.
    ///
    /// In FINISHED this is a no-op; the finish cue is never re-emitted.
    pub fn acknowledge(&mut self) -> Result<Vec<BattleCue>, BattleError> {
        if !self.begun {
            return Err(BattleError::InvalidState {
                expected: BattleState::Intro,
                actual: self.state,
            });
        }
        if self.state == BattleState::Finished {
            return Ok(Vec::new());
        }
        self.run_steps()
    }

    /// Submit the player's menu choice. Only valid in PLAYER_INPUT; any
    /// rejection leaves the session state untouched.
    pub fn submit_player_action(
        &mut self,
        action: PlayerAction,
    ) -> Result<Vec<BattleCue>, BattleError> {
        if self.state != BattleState::PlayerInput {
            return Err(BattleError::InvalidState {
                expected: BattleState::PlayerInput,
                actual: self.state,
            });
        }

        let capabilities = self.player.side().capabilities();
        match action {
            PlayerAction::Fight { attack_index } => {
                // Validate before committing anything
                self.player.attack(attack_index)?;
                self.player_attack_index = Some(attack_index);
                self.steps.push_back(Step::EnterEnemyInput);
            }
            PlayerAction::UseItem => {
                if !capabilities.can_use_items {
                    return Err(BattleError::ActionUnavailable {
                        side: self.player.side(),
                        action: "use items",
                    });
                }
                self.turn_consumed = true;
                self.steps.push_back(Step::EnterEnemyInput);
            }
            PlayerAction::Flee => {
                if !capabilities.can_flee {
                    return Err(BattleError::ActionUnavailable {
                        side: self.player.side(),
                        action: "flee",
                    });
                }
                self.steps.push_back(Step::FleeAttempt);
            }
        }

        self.run_steps()
    }

    /// Sync the player's HP from the party roster after an item effect,
    /// clamped at max HP. Returns the health-bar cue for the host to play
    /// with its next batch.
    pub fn restore_player_hp(&mut self, updated_hp: u32) -> BattleCue {
        let current = self.player.restore_hp(updated_hp);
        BattleCue::HealthUpdate {
            side: Side::Player,
            current,
            maximum: self.player.hp().maximum(),
        }
    }

    /// Execute queued steps until one produces presentation cues (or the
    /// queue drains, meaning the session is waiting on player input or has
    /// finished).
    fn run_steps(&mut self) -> Result<Vec<BattleCue>, BattleError> {
        let mut cues = Vec::new();
        while let Some(step) = self.steps.pop_front() {
            self.execute(step, &mut cues)?;
            if !cues.is_empty() {
                break;
            }
        }
        Ok(cues)
    }

    fn execute(&mut self, step: Step, cues: &mut Vec<BattleCue>) -> Result<(), BattleError> {
        match step {
            Step::EnterPreBattleInfo => {
                self.state = BattleState::PreBattleInfo;
                cues.push(self.appear_cue(Side::Enemy));
                cues.push(self.health_cue(Side::Enemy));
                cues.push(self.message(
                    vec![format!("Wild {} appeared!", self.enemy.name())],
                    true,
                ));
                self.steps.push_back(Step::EnterBringOutCharacter);
            }
            Step::EnterBringOutCharacter => {
                self.state = BattleState::BringOutCharacter;
                cues.push(self.appear_cue(Side::Player));
                cues.push(self.health_cue(Side::Player));
                // Timed delay, no input wait
                cues.push(self.message(vec![format!("Go {}!", self.player.name())], false));
                self.steps.push_back(Step::EnterPlayerInput);
            }
            Step::EnterPlayerInput => {
                self.state = BattleState::PlayerInput;
                self.player_attack_index = None;
                self.turn_consumed = false;
                cues.push(BattleCue::ShowBattleMenu);
            }
            Step::EnterEnemyInput => {
                self.state = BattleState::EnemyInput;
                let seed = self.draw_seed(0);
                let enemy_attack_index = self.enemy.pick_random_move(self.rng.as_ref(), seed)?;
                self.plan_battle_round(enemy_attack_index)?;
            }
            Step::Attack {
                attacker,
                attack_index,
            } => {
                self.attack_step(attacker, attack_index, cues)?;
            }
            Step::PostAttackCheck => {
                self.post_attack_check(cues);
            }
            Step::FleeAttempt => {
                self.flee_attempt(cues);
            }
            Step::Finish => {
                self.state = BattleState::Finished;
                if !self.finish_emitted {
                    self.finish_emitted = true;
                    cues.push(BattleCue::SceneFinish {
                        player_knocked_out: self.player_knocked_out,
                    });
                }
            }
        }
        Ok(())
    }

    /// Lay out the BATTLE round: resolved order, one attack step per acting
    /// side, then the post-attack check.
    fn plan_battle_round(&mut self, enemy_attack_index: usize) -> Result<(), BattleError> {
        self.state = BattleState::Battle;

        let seed = self.draw_seed(0);
        let order = decide_order(self.turn_consumed, self.rng.as_ref(), seed);

        for side in order.sequence() {
            let attack_index = match side {
                Side::Player => {
                    self.player_attack_index
                        .ok_or(BattleError::InvalidState {
                            expected: BattleState::PlayerInput,
                            actual: self.state,
                        })?
                }
                Side::Enemy => enemy_attack_index,
            };
            self.steps.push_back(Step::Attack {
                attacker: side,
                attack_index,
            });
        }
        self.steps.push_back(Step::PostAttackCheck);
        Ok(())
    }

    /// One attack in the round. A fainted attacker is skipped outright: if
    /// the enemy went down to the player's attack, it does not retaliate.
    fn attack_step(
        &mut self,
        attacker: Side,
        attack_index: usize,
        cues: &mut Vec<BattleCue>,
    ) -> Result<(), BattleError> {
        if self.combatant(attacker).is_fainted() {
            return Ok(());
        }

        let (attack_name, animation, audio_key) = {
            let attack = self.combatant(attacker).attack(attack_index)?;
            (
                attack.name.clone(),
                attack.animation.clone(),
                attack.audio_key.clone(),
            )
        };
        let attacker_name = self.combatant(attacker).name().to_string();
        let damage = compute_damage(self.combatant(attacker));

        let target = attacker.opponent();
        let defender = self.combatant_mut(target);
        defender.take_damage(damage);

        cues.push(self.message(
            vec![format!("{attacker_name} used {attack_name}")],
            false,
        ));
        cues.push(BattleCue::Attack {
            attacker,
            target,
            animation,
            audio_key,
        });
        cues.push(self.health_cue(target));
        Ok(())
    }

    /// Post-round bookkeeping: decide whether the battle continues, and set
    /// up the faint/result sequence when it does not. The host persists the
    /// player's HP when it sees the health cues from this round.
    fn post_attack_check(&mut self, cues: &mut Vec<BattleCue>) {
        self.state = BattleState::PostAttackCheck;
        let outcome = evaluate_outcome(&self.player, &self.enemy);
        self.outcome = Some(outcome);

        match outcome {
            BattleOutcome::Continue => {
                self.steps.push_back(Step::EnterPlayerInput);
            }
            BattleOutcome::EnemyDefeated => {
                self.ending = Some(BattleEnding::EnemyDefeated);
                cues.push(BattleCue::Faint { side: Side::Enemy });
                cues.push(self.message(
                    vec![
                        format!("Wild {} fainted", self.enemy.name()),
                        "You have gained some experience".to_string(),
                    ],
                    true,
                ));
                self.steps.push_back(Step::Finish);
            }
            BattleOutcome::PlayerDefeated => {
                self.player_knocked_out = true;
                self.ending = Some(BattleEnding::PlayerDefeated);
                cues.push(BattleCue::Faint { side: Side::Player });
                cues.push(self.message(
                    vec![
                        format!("{} fainted", self.player.name()),
                        "You have no more allies, escaping to safety...".to_string(),
                    ],
                    true,
                ));
                self.steps.push_back(Step::Finish);
            }
        }
    }

    /// Resolve the flee attempt. Success ends the battle; failure hands the
    /// enemy a free turn before control returns to the player.
    fn flee_attempt(&mut self, cues: &mut Vec<BattleCue>) {
        self.state = BattleState::FleeAttempt;
        let seed = self.draw_seed(0);
        let escaped = resolve_flee_attempt(
            self.rng.as_ref(),
            seed,
            self.config.flee_die_sides,
            self.config.flee_threshold,
        );

        if escaped {
            self.ending = Some(BattleEnding::Fled);
            cues.push(self.message(vec!["You got away safely!".to_string()], true));
            self.steps.push_back(Step::Finish);
        } else {
            self.turn_consumed = true;
            cues.push(self.message(vec!["You failed to run away...".to_string()], true));
            self.steps.push_back(Step::EnterEnemyInput);
        }
    }

    fn combatant(&self, side: Side) -> &Combatant {
        match side {
            Side::Player => &self.player,
            Side::Enemy => &self.enemy,
        }
    }

    fn combatant_mut(&mut self, side: Side) -> &mut Combatant {
        match side {
            Side::Player => &mut self.player,
            Side::Enemy => &mut self.enemy,
        }
    }

    fn appear_cue(&self, side: Side) -> BattleCue {
        let combatant = self.combatant(side);
        BattleCue::CombatantAppear {
            side,
            name: combatant.name().to_string(),
            asset_key: combatant.asset_key().to_string(),
        }
    }

    fn health_cue(&self, side: Side) -> BattleCue {
        let combatant = self.combatant(side);
        BattleCue::HealthUpdate {
            side,
            current: combatant.hp().current(),
            maximum: combatant.hp().maximum(),
        }
    }

    fn message(&self, lines: Vec<String>, wait_for_input: bool) -> BattleCue {
        BattleCue::Message {
            lines,
            wait_for_input: wait_for_input && !self.config.skip_animations,
        }
    }

    fn draw_seed(&mut self, context: u32) -> u64 {
        let seed = compute_seed(self.config.session_seed, self.nonce, context);
        self.nonce += 1;
        seed
    }
}

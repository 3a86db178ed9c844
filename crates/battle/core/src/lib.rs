//! Deterministic turn-based battle logic.
//!
//! `battle-core` defines the canonical battle rules (combatants, attack
//! resolution, turn order, the battle state machine) and exposes pure APIs
//! that can be reused by both the runtime and offline tools. All session
//! mutation flows through [`session::BattleSession`], and supporting crates
//! depend on the types re-exported here.
//!
//! The crate performs no I/O and holds no global state: content lookups go
//! through the [`AttackOracle`] trait, randomness through [`RngOracle`], and
//! presentation through the [`BattleCue`] values each session call returns.
pub mod catalog;
pub mod combatant;
pub mod config;
pub mod error;
pub mod outcome;
pub mod rng;
pub mod session;
pub mod turn;

pub use catalog::{Attack, AttackId, AttackOracle};
pub use combatant::{Combatant, CombatantSpec, DamageOutcome, ResourceMeter, Side, SideCapabilities};
pub use config::BattleConfig;
pub use error::BattleError;
pub use outcome::{BattleEnding, BattleOutcome, evaluate_outcome};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use session::{BattleCue, BattleSession, BattleState, PlayerAction};
pub use turn::{TurnOrder, compute_damage, decide_order, resolve_flee_attempt};

//! Async orchestration for battle sessions.
//!
//! The runtime owns one [`battle_core::BattleSession`] and the injected
//! collaborators around it: a [`BattlePresenter`] that plays presentation
//! cues (each resolved future is a completion callback), a
//! [`PlayerActionProvider`] that supplies menu choices, and a [`PartyStore`]
//! the player's HP is persisted through. [`BattleRuntime::run`] drives the
//! session from intro to finish and returns a [`BattleReport`].

pub mod battle;
pub mod error;
pub mod presenter;
pub mod provider;
pub mod store;

pub use battle::{BattleReport, BattleRuntime, BattleRuntimeBuilder};
pub use error::{Result, RuntimeError};
pub use presenter::{BattlePresenter, NullPresenter};
pub use provider::{
    BattleView, FirstAttackProvider, PlayerActionProvider, ScriptedActionProvider,
};
pub use store::{FilePartyStore, InMemoryPartyStore, PartyStore, StoreError};

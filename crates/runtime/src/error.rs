//! Unified error types surfaced by the runtime API.

use thiserror::Error;

pub use crate::store::StoreError;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Battle(#[from] battle_core::BattleError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("battle runtime requires a {component} before building")]
    MissingComponent { component: &'static str },

    #[error("scripted action provider exhausted after {0} actions")]
    ScriptExhausted(usize),

    #[error("presentation step failed: {0}")]
    Presentation(String),

    #[error("battle finished without recording an ending")]
    MissingEnding,
}

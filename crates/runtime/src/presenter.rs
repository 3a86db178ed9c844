//! Asynchronous seam to the presentation layer.
//!
//! The battle core emits [`BattleCue`] batches; a presenter plays them. A
//! cue's completion callback is simply the `present` future resolving, so
//! the strict sequential ordering guarantee falls out of awaiting each cue
//! before the next.

use async_trait::async_trait;
use battle_core::{BattleCue, BattleState};

use crate::error::Result;

/// Plays presentation cues for a battle session.
///
/// Implementations can drive a real scene (sprites, tweens, audio), print
/// to a console, or do nothing at all. The runtime awaits every `present`
/// call before touching the session again, so implementations never see two
/// cues in flight.
#[async_trait]
pub trait BattlePresenter: Send + Sync {
    async fn present(&self, cue: &BattleCue) -> Result<()>;

    /// Called once whenever the session enters a new state.
    async fn state_entered(&self, _state: BattleState) -> Result<()> {
        Ok(())
    }
}

/// Presenter that completes every cue instantly.
///
/// Useful for tests and for fully collapsed "skip animations" runs.
pub struct NullPresenter;

#[async_trait]
impl BattlePresenter for NullPresenter {
    async fn present(&self, _cue: &BattleCue) -> Result<()> {
        Ok(())
    }
}

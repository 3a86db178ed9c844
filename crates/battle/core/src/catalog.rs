//! Attack metadata and the catalog lookup trait.
//!
//! Attacks are immutable, shared content records: many combatants may
//! reference the same [`Attack`]. The catalog itself holds no battle-session
//! state, so one instance is safely shared across every combatant and every
//! battle.

use std::fmt;

/// Unique identifier for an attack content record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AttackId(pub u32);

impl fmt::Display for AttackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "attack#{}", self.0)
    }
}

/// Display/animation/audio metadata for a single attack.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Attack {
    pub id: AttackId,
    pub name: String,
    /// Animation key the presentation layer plays for this attack.
    pub animation: String,
    /// Sound-effect key the presentation layer plays alongside the animation.
    pub audio_key: String,
}

/// Read-only lookup into a preloaded attack table.
///
/// `None` is a normal, expected result: content uses unresolvable ids to
/// mean "this attack slot is unset", and combatant construction skips them.
pub trait AttackOracle: Send + Sync {
    fn attack(&self, id: AttackId) -> Option<&Attack>;
}

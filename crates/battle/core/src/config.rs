//! Session-level battle configuration.

/// Tunable parameters for a battle session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BattleConfig {
    /// Collapse presentation steps instantly (accessibility/speed option
    /// supplied by the surrounding options screen).
    pub skip_animations: bool,
    /// Sides of the die rolled for a flee attempt.
    pub flee_die_sides: u32,
    /// A flee succeeds when the roll is strictly greater than this.
    pub flee_threshold: u32,
    /// Base seed for every random decision in the session.
    pub session_seed: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            skip_animations: false,
            flee_die_sides: 10,
            flee_threshold: 5,
            session_seed: 0,
        }
    }
}

impl BattleConfig {
    pub fn with_seed(session_seed: u64) -> Self {
        Self {
            session_seed,
            ..Self::default()
        }
    }
}

//! The combatant model: one battling entity and its vitals.
//!
//! The original content distinguishes player and enemy character classes;
//! here a single [`Combatant`] carries a [`Side`] tag instead, with the
//! side-specific menu capabilities expressed as data rather than subclasses.

use std::fmt;

use crate::catalog::{Attack, AttackId, AttackOracle};
use crate::error::BattleError;
use crate::rng::RngOracle;

/// Which side of the battle a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[strum(serialize_all = "lowercase")]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }

    /// Menu actions available to this side.
    pub fn capabilities(self) -> SideCapabilities {
        match self {
            Side::Player => SideCapabilities {
                can_flee: true,
                can_use_items: true,
            },
            Side::Enemy => SideCapabilities {
                can_flee: false,
                can_use_items: false,
            },
        }
    }
}

/// Per-side action capability set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SideCapabilities {
    pub can_flee: bool,
    pub can_use_items: bool,
}

/// Integer resource meter (health) tracked per combatant.
///
/// All mutation clamps: depletion floors at 0, restoration caps at the
/// maximum, so `0 <= current <= maximum` holds at all times.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    current: u32,
    maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self {
            current: current.min(maximum),
            maximum,
        }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    pub fn current(&self) -> u32 {
        self.current
    }

    pub fn maximum(&self) -> u32 {
        self.maximum
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Subtract `amount`, flooring at zero. Returns the new current value.
    pub fn deplete(&mut self, amount: u32) -> u32 {
        self.current = self.current.saturating_sub(amount);
        self.current
    }

    /// Replace the current value, capping at the maximum.
    pub fn set(&mut self, value: u32) -> u32 {
        self.current = value.min(self.maximum);
        self.current
    }
}

impl fmt::Display for ResourceMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

/// Snapshot of external party/encounter data a combatant is created from.
///
/// This mirrors the character records the surrounding scenes pass in; the
/// asset key is opaque to the battle core and only travels back out through
/// presentation cues.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CombatantSpec {
    pub name: String,
    pub asset_key: String,
    pub level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub base_attack: u32,
    pub attack_ids: Vec<AttackId>,
}

impl CombatantSpec {
    /// Resolve the spec into a live [`Combatant`] for one battle.
    ///
    /// Attack ids that do not resolve through the oracle are dropped, not
    /// an error: content uses placeholder ids for unset attack slots.
    pub fn resolve(&self, side: Side, catalog: &dyn AttackOracle) -> Combatant {
        let attacks = self
            .attack_ids
            .iter()
            .filter_map(|&id| catalog.attack(id).cloned())
            .collect();

        Combatant {
            name: self.name.clone(),
            asset_key: self.asset_key.clone(),
            level: self.level,
            side,
            hp: ResourceMeter::new(self.current_hp, self.max_hp),
            base_attack: self.base_attack,
            attacks,
        }
    }
}

/// Result of applying damage to a combatant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DamageOutcome {
    pub remaining_hp: u32,
    pub fainted: bool,
}

/// A battle-participating entity: player character or wild enemy.
///
/// Created once per battle from a [`CombatantSpec`] snapshot, mutated in
/// place while the battle runs, and discarded when the session ends. The
/// player side's final HP is written back to the party roster by the host.
#[derive(Clone, Debug)]
pub struct Combatant {
    name: String,
    asset_key: String,
    level: u32,
    side: Side,
    hp: ResourceMeter,
    base_attack: u32,
    attacks: Vec<Attack>,
}

impl Combatant {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn asset_key(&self) -> &str {
        &self.asset_key
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn hp(&self) -> ResourceMeter {
        self.hp
    }

    pub fn base_attack(&self) -> u32 {
        self.base_attack
    }

    pub fn attacks(&self) -> &[Attack] {
        &self.attacks
    }

    /// True once current HP has reached zero; a fainted combatant no longer
    /// acts in the battle sequence.
    pub fn is_fainted(&self) -> bool {
        self.hp.is_empty()
    }

    /// Apply incoming damage, clamping at zero.
    ///
    /// Purely numeric: any health-bar presentation is the caller's
    /// responsibility once this returns.
    pub fn take_damage(&mut self, amount: u32) -> DamageOutcome {
        let remaining_hp = self.hp.deplete(amount);
        DamageOutcome {
            remaining_hp,
            fainted: self.hp.is_empty(),
        }
    }

    /// Overwrite current HP from an external source (post-item sync),
    /// capped at max HP.
    pub fn restore_hp(&mut self, updated_hp: u32) -> u32 {
        self.hp.set(updated_hp)
    }

    /// Look up one of this combatant's resolved attacks.
    pub fn attack(&self, index: usize) -> Result<&Attack, BattleError> {
        self.attacks
            .get(index)
            .ok_or(BattleError::UnknownAttackIndex {
                index,
                available: self.attacks.len(),
            })
    }

    /// Select an attack index uniformly at random.
    ///
    /// Used for the enemy side each round. An empty attack list is a
    /// content error: a combatant with no attacks cannot take a combat
    /// turn, so this fails loudly instead of producing an index.
    pub fn pick_random_move(
        &self,
        rng: &dyn RngOracle,
        seed: u64,
    ) -> Result<usize, BattleError> {
        if self.attacks.is_empty() {
            return Err(BattleError::NoAttacksAvailable {
                side: self.side,
                name: self.name.clone(),
            });
        }
        Ok(rng.pick_index(seed, self.attacks.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Attack, AttackId, AttackOracle};
    use std::collections::HashMap;

    struct TestCatalog(HashMap<AttackId, Attack>);

    impl TestCatalog {
        fn with_attacks(ids: &[u32]) -> Self {
            let map = ids
                .iter()
                .map(|&id| {
                    (
                        AttackId(id),
                        Attack {
                            id: AttackId(id),
                            name: format!("attack-{id}"),
                            animation: format!("anim-{id}"),
                            audio_key: format!("sfx-{id}"),
                        },
                    )
                })
                .collect();
            Self(map)
        }
    }

    impl AttackOracle for TestCatalog {
        fn attack(&self, id: AttackId) -> Option<&Attack> {
            self.0.get(&id)
        }
    }

    struct FixedRng(u32);

    impl RngOracle for FixedRng {
        fn next_u32(&self, _seed: u64) -> u32 {
            self.0
        }
    }

    fn spec(current_hp: u32, max_hp: u32, attack_ids: &[u32]) -> CombatantSpec {
        CombatantSpec {
            name: "iguanignite".into(),
            asset_key: "IGUANIGNITE".into(),
            level: 5,
            max_hp,
            current_hp,
            base_attack: 5,
            attack_ids: attack_ids.iter().map(|&id| AttackId(id)).collect(),
        }
    }

    #[test]
    fn resolve_drops_unknown_attack_ids() {
        let catalog = TestCatalog::with_attacks(&[1, 2]);
        let combatant = spec(25, 25, &[1, 99, 2]).resolve(Side::Player, &catalog);
        assert_eq!(combatant.attacks().len(), 2);
        assert_eq!(combatant.attacks()[0].id, AttackId(1));
        assert_eq!(combatant.attacks()[1].id, AttackId(2));
    }

    #[test]
    fn take_damage_clamps_at_zero() {
        let catalog = TestCatalog::with_attacks(&[1]);
        let mut combatant = spec(3, 25, &[1]).resolve(Side::Player, &catalog);

        let outcome = combatant.take_damage(15);
        assert_eq!(outcome.remaining_hp, 0);
        assert!(outcome.fainted);
        assert!(combatant.is_fainted());
        assert_eq!(combatant.hp().current(), 0);
    }

    #[test]
    fn fainted_iff_hp_zero() {
        let catalog = TestCatalog::with_attacks(&[1]);
        let mut combatant = spec(5, 25, &[1]).resolve(Side::Enemy, &catalog);
        assert!(!combatant.is_fainted());

        combatant.take_damage(4);
        assert!(!combatant.is_fainted());

        combatant.take_damage(1);
        assert!(combatant.is_fainted());
    }

    #[test]
    fn restore_hp_caps_at_maximum() {
        let catalog = TestCatalog::with_attacks(&[1]);
        let mut combatant = spec(10, 25, &[1]).resolve(Side::Player, &catalog);
        assert_eq!(combatant.restore_hp(100), 25);
        assert_eq!(combatant.hp().current(), 25);
    }

    #[test]
    fn pick_random_move_fails_loudly_without_attacks() {
        let catalog = TestCatalog::with_attacks(&[]);
        let combatant = spec(25, 25, &[7]).resolve(Side::Enemy, &catalog);
        let err = combatant.pick_random_move(&FixedRng(0), 1).unwrap_err();
        assert!(matches!(err, BattleError::NoAttacksAvailable { .. }));
    }

    #[test]
    fn pick_random_move_is_uniform_over_known_attacks() {
        let catalog = TestCatalog::with_attacks(&[1, 2, 3]);
        let combatant = spec(25, 25, &[1, 2, 3]).resolve(Side::Enemy, &catalog);
        assert_eq!(combatant.pick_random_move(&FixedRng(4), 0).unwrap(), 1);
        assert_eq!(combatant.pick_random_move(&FixedRng(5), 0).unwrap(), 2);
    }

    #[test]
    fn side_capabilities_restrict_enemy_menu() {
        assert!(Side::Player.capabilities().can_flee);
        assert!(Side::Player.capabilities().can_use_items);
        assert!(!Side::Enemy.capabilities().can_flee);
        assert!(!Side::Enemy.capabilities().can_use_items);
    }
}

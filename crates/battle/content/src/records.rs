//! Serde records mirroring the JSON content files.

use battle_core::{Attack, AttackId, CombatantSpec};
use serde::{Deserialize, Serialize};

use crate::error::ContentError;

/// One row of `attacks.json`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRecord {
    pub id: u32,
    pub name: String,
    pub animation: String,
    pub audio_key: String,
}

impl From<AttackRecord> for Attack {
    fn from(record: AttackRecord) -> Self {
        Attack {
            id: AttackId(record.id),
            name: record.name,
            animation: record.animation,
            audio_key: record.audio_key,
        }
    }
}

/// A character snapshot as stored in `party.json` (and embedded in
/// [`EnemyRecord`]): the shape the surrounding scenes persist between
/// battles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterRecord {
    pub name: String,
    pub asset_key: String,
    pub current_level: u32,
    pub max_hp: u32,
    pub current_hp: u32,
    pub base_attack: u32,
    pub attack_ids: Vec<u32>,
}

impl CharacterRecord {
    /// Check the content invariants a battle relies on.
    pub fn validate(&self) -> Result<(), ContentError> {
        if self.max_hp == 0 {
            return Err(ContentError::invalid(&self.name, "maxHp must be positive"));
        }
        if self.current_hp > self.max_hp {
            return Err(ContentError::invalid(
                &self.name,
                format!("currentHp {} exceeds maxHp {}", self.current_hp, self.max_hp),
            ));
        }
        if self.current_level == 0 {
            return Err(ContentError::invalid(
                &self.name,
                "currentLevel must be at least 1",
            ));
        }
        Ok(())
    }

    /// Convert into the battle-core snapshot, validating first.
    pub fn to_spec(&self) -> Result<CombatantSpec, ContentError> {
        self.validate()?;
        Ok(CombatantSpec {
            name: self.name.clone(),
            asset_key: self.asset_key.clone(),
            level: self.current_level,
            max_hp: self.max_hp,
            current_hp: self.current_hp,
            base_attack: self.base_attack,
            attack_ids: self.attack_ids.iter().map(|&id| AttackId(id)).collect(),
        })
    }
}

/// One row of `enemies.json`: a character record keyed by encounter id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnemyRecord {
    pub id: u32,
    #[serde(flatten)]
    pub character: CharacterRecord,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(current_hp: u32, max_hp: u32) -> CharacterRecord {
        CharacterRecord {
            name: "Carnodusk".into(),
            asset_key: "CARNODUSK".into(),
            current_level: 5,
            max_hp,
            current_hp,
            base_attack: 5,
            attack_ids: vec![1],
        }
    }

    #[test]
    fn valid_record_converts_to_spec() {
        let spec = record(20, 25).to_spec().unwrap();
        assert_eq!(spec.current_hp, 20);
        assert_eq!(spec.attack_ids, vec![AttackId(1)]);
    }

    #[test]
    fn current_hp_above_max_is_rejected() {
        let err = record(30, 25).to_spec().unwrap_err();
        assert!(matches!(err, ContentError::Invalid { .. }));
    }

    #[test]
    fn zero_max_hp_is_rejected() {
        assert!(record(0, 0).to_spec().is_err());
    }

    #[test]
    fn enemy_record_parses_flattened_character() {
        let json = r#"{
            "id": 1,
            "name": "Carnodusk",
            "assetKey": "CARNODUSK",
            "currentLevel": 5,
            "maxHp": 25,
            "currentHp": 25,
            "baseAttack": 5,
            "attackIds": [1]
        }"#;
        let enemy: EnemyRecord = serde_json::from_str(json).unwrap();
        assert_eq!(enemy.id, 1);
        assert_eq!(enemy.character.name, "Carnodusk");
    }
}

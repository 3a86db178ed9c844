//! Enemy roster and party file views over the character records.

use battle_core::RngOracle;

use crate::error::ContentError;
use crate::records::{CharacterRecord, EnemyRecord};

/// Wild enemy encounter table, keyed by enemy id.
#[derive(Clone, Debug, Default)]
pub struct EnemyRoster {
    enemies: Vec<EnemyRecord>,
}

impl EnemyRoster {
    pub fn from_records(enemies: Vec<EnemyRecord>) -> Result<Self, ContentError> {
        for enemy in &enemies {
            enemy.character.validate()?;
        }
        Ok(Self { enemies })
    }

    pub fn load_str(source: &str, origin: &str) -> Result<Self, ContentError> {
        let records: Vec<EnemyRecord> =
            serde_json::from_str(source).map_err(|e| ContentError::parse(origin, e))?;
        Self::from_records(records)
    }

    pub fn embedded() -> Result<Self, ContentError> {
        Self::load_str(include_str!("../data/enemies.json"), "data/enemies.json")
    }

    pub fn by_id(&self, id: u32) -> Result<&CharacterRecord, ContentError> {
        self.enemies
            .iter()
            .find(|enemy| enemy.id == id)
            .map(|enemy| &enemy.character)
            .ok_or(ContentError::UnknownEnemy(id))
    }

    /// Pick a random roster entry for a wild encounter.
    pub fn random_pick(
        &self,
        rng: &dyn RngOracle,
        seed: u64,
    ) -> Result<&CharacterRecord, ContentError> {
        if self.enemies.is_empty() {
            return Err(ContentError::invalid("enemies", "roster is empty"));
        }
        let index = rng.pick_index(seed, self.enemies.len());
        Ok(&self.enemies[index].character)
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}

/// The player's party list; index 0 is the active battle member.
#[derive(Clone, Debug)]
pub struct PartyFile {
    members: Vec<CharacterRecord>,
}

impl PartyFile {
    pub fn from_records(members: Vec<CharacterRecord>) -> Result<Self, ContentError> {
        if members.is_empty() {
            return Err(ContentError::EmptyParty);
        }
        for member in &members {
            member.validate()?;
        }
        Ok(Self { members })
    }

    pub fn load_str(source: &str, origin: &str) -> Result<Self, ContentError> {
        let records: Vec<CharacterRecord> =
            serde_json::from_str(source).map_err(|e| ContentError::parse(origin, e))?;
        Self::from_records(records)
    }

    pub fn embedded() -> Result<Self, ContentError> {
        Self::load_str(include_str!("../data/party.json"), "data/party.json")
    }

    /// The member sent into battle. The data model carries a whole list for
    /// future multi-member support; only index 0 battles today.
    pub fn active(&self) -> &CharacterRecord {
        &self.members[0]
    }

    pub fn members(&self) -> &[CharacterRecord] {
        &self.members
    }

    pub fn into_members(self) -> Vec<CharacterRecord> {
        self.members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use battle_core::PcgRng;

    #[test]
    fn embedded_roster_finds_enemy_by_id() {
        let roster = EnemyRoster::embedded().unwrap();
        let carnodusk = roster.by_id(1).unwrap();
        assert_eq!(carnodusk.name, "Carnodusk");
    }

    #[test]
    fn unknown_enemy_id_errors() {
        let roster = EnemyRoster::embedded().unwrap();
        assert!(matches!(
            roster.by_id(42),
            Err(ContentError::UnknownEnemy(42))
        ));
    }

    #[test]
    fn random_pick_stays_in_roster() {
        let roster = EnemyRoster::embedded().unwrap();
        let rng = PcgRng;
        for seed in 0..20 {
            let picked = roster.random_pick(&rng, seed).unwrap();
            assert!(roster.by_id(1).unwrap().name == picked.name || picked.name == "Iguanignite");
        }
    }

    #[test]
    fn empty_party_is_rejected() {
        assert!(matches!(
            PartyFile::from_records(vec![]),
            Err(ContentError::EmptyParty)
        ));
    }

    #[test]
    fn embedded_party_has_an_active_member() {
        let party = PartyFile::embedded().unwrap();
        assert_eq!(party.active().name, "Thor");
    }
}

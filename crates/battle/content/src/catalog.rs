//! The attack catalog: id-keyed lookup over the attack content table.

use std::collections::HashMap;

use battle_core::{Attack, AttackId, AttackOracle};

use crate::error::ContentError;
use crate::records::AttackRecord;

/// Preloaded attack table, shared read-only across combatants and battles.
#[derive(Clone, Debug, Default)]
pub struct AttackCatalog {
    attacks: HashMap<AttackId, Attack>,
}

impl AttackCatalog {
    pub fn from_records(records: Vec<AttackRecord>) -> Self {
        let attacks = records
            .into_iter()
            .map(Attack::from)
            .map(|attack| (attack.id, attack))
            .collect();
        Self { attacks }
    }

    /// Parse a catalog from JSON text.
    pub fn load_str(source: &str, origin: &str) -> Result<Self, ContentError> {
        let records: Vec<AttackRecord> =
            serde_json::from_str(source).map_err(|e| ContentError::parse(origin, e))?;
        Ok(Self::from_records(records))
    }

    /// Catalog built from the embedded default data file.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::load_str(include_str!("../data/attacks.json"), "data/attacks.json")
    }

    pub fn len(&self) -> usize {
        self.attacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = AttackId> + '_ {
        self.attacks.keys().copied()
    }
}

impl AttackOracle for AttackCatalog {
    fn attack(&self, id: AttackId) -> Option<&Attack> {
        self.attacks.get(&id)
    }
}

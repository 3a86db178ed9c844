//! Content loaders for the battle system.
//!
//! Parses the JSON data files (attack catalog, enemy roster, player party)
//! into `battle-core` types and validates them up front: malformed content
//! is a loud [`ContentError`], never a silently wrong battle.

pub mod catalog;
pub mod error;
pub mod factory;
pub mod records;
pub mod roster;

pub use catalog::AttackCatalog;
pub use error::ContentError;
pub use factory::{ContentFactory, EmbeddedContent, write_default_data};
pub use records::{AttackRecord, CharacterRecord, EnemyRecord};
pub use roster::{EnemyRoster, PartyFile};

/// Result alias for content loading.
pub type LoadResult<T> = Result<T, ContentError>;

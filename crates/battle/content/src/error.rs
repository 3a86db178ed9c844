//! Content loading errors.

/// Errors surfaced while loading or validating content data.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A record that parsed but breaks a content invariant (zero max HP,
    /// current HP above max, level zero). These are authoring mistakes and
    /// fail fast.
    #[error("invalid content record '{record}': {reason}")]
    Invalid { record: String, reason: String },

    #[error("enemy id {0} not found in the roster")]
    UnknownEnemy(u32),

    #[error("party file contains no members")]
    EmptyParty,
}

impl ContentError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn parse(path: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn invalid(record: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invalid {
            record: record.into(),
            reason: reason.into(),
        }
    }
}

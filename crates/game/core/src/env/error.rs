//! Oracle access errors.

use crate::error::{ErrorSeverity, GameError};

/// Errors that occur when a read-only collaborator is missing or incomplete.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OracleError {
    /// No monster factory was supplied to the environment.
    #[error("MonsterFactory not available")]
    MonstersNotAvailable,

    /// The factory does not know the requested template.
    #[error("monster template '{0}' not found")]
    MonsterTemplateNotFound(String),
}

impl GameError for OracleError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            OracleError::MonstersNotAvailable => ErrorSeverity::Internal,
            OracleError::MonsterTemplateNotFound(_) => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            OracleError::MonstersNotAvailable => "ORACLE_MONSTERS_NOT_AVAILABLE",
            OracleError::MonsterTemplateNotFound(_) => "ORACLE_MONSTER_TEMPLATE_NOT_FOUND",
        }
    }
}

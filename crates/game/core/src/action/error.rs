//! Action execution errors.
//!
//! Every variant describes a non-event: the action was rejected before any
//! state changed and an explanatory message was already pushed to the log.

use crate::action::AbilityKind;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{EntityId, ResourceKind};

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionError {
    /// Target farther than the action's reach.
    #[error("target {target} is out of range ({distance} > {range})")]
    OutOfRange {
        target: EntityId,
        distance: u32,
        range: u32,
    },

    /// An opaque tile lies between the actor and the target.
    #[error("no line of sight to {target}")]
    NoLineOfSight { target: EntityId },

    /// One of the ability's costs is not covered; nothing was deducted.
    #[error("{ability} needs {required} {resource}, only {available} available")]
    InsufficientResource {
        ability: AbilityKind,
        resource: ResourceKind,
        required: u32,
        available: u32,
    },

    /// Actor is stunned or dead.
    #[error("actor {actor} is incapacitated")]
    Incapacitated { actor: EntityId },

    /// Key does not name a catalog ability.
    #[error("unknown ability '{0}'")]
    UnknownAbility(String),

    #[error("actor {0} not found")]
    ActorNotFound(EntityId),

    #[error("target {0} is already dead")]
    TargetDead(EntityId),
}

impl GameError for ActionError {
    fn severity(&self) -> ErrorSeverity {
        use ActionError::*;
        match self {
            OutOfRange { .. }
            | NoLineOfSight { .. }
            | InsufficientResource { .. }
            | Incapacitated { .. } => ErrorSeverity::Recoverable,
            UnknownAbility(_) | TargetDead(_) => ErrorSeverity::Validation,
            ActorNotFound(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use ActionError::*;
        match self {
            OutOfRange { .. } => "ACTION_OUT_OF_RANGE",
            NoLineOfSight { .. } => "ACTION_NO_LINE_OF_SIGHT",
            InsufficientResource { .. } => "ACTION_INSUFFICIENT_RESOURCE",
            Incapacitated { .. } => "ACTION_INCAPACITATED",
            UnknownAbility(_) => "ACTION_UNKNOWN_ABILITY",
            ActorNotFound(_) => "ACTION_ACTOR_NOT_FOUND",
            TargetDead(_) => "ACTION_TARGET_DEAD",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallible_combat_conditions_are_recoverable() {
        let err = ActionError::OutOfRange {
            target: EntityId(3),
            distance: 4,
            range: 1,
        };
        assert!(err.severity().is_recoverable());
        assert_eq!(err.to_string(), "target #3 is out of range (4 > 1)");
        assert!(ActionError::ActorNotFound(EntityId(9)).severity().is_internal());
    }
}

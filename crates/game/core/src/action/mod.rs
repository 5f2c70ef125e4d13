//! Ability domain: the closed catalog and its execution pipeline.
//!
//! # Module Structure
//!
//! - `ability`: catalog entries (`AbilityKind`, costs, `TargetShape`)
//! - `error`: rejection reasons (`ActionError`)
//! - `execute`: validation, payment and effect procedures on `GameEngine`

pub mod ability;
pub mod error;
pub mod execute;

pub use ability::{Ability, AbilityKind, TargetShape};
pub use error::ActionError;
pub use execute::AbilityOutcome;

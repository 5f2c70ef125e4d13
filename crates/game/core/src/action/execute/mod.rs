//! Ability execution pipeline.
//!
//! Invoking an ability runs three steps:
//! 1. **Pre-validation**: the user can act, every cost is affordable, and the
//!    target is alive, in range and (for ranged and area shapes) in sight
//! 2. **Payment**: all costs are deducted together
//! 3. **Effects**: the ability's procedure runs (damage, statuses, heals)
//!
//! Step 1 is the only place an ability can fail, so a rejected ability never
//! leaves a partial deduction or partial damage behind.

mod effects;
mod validation;

use crate::action::{AbilityKind, ActionError};
use crate::engine::GameEngine;
use crate::env::MessageCategory;
use crate::state::EntityId;

/// Result of a successful ability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AbilityOutcome {
    pub ability: AbilityKind,
    /// Damage that reached hp, for single-target strikes.
    pub dealt: u32,
    /// Actors struck or blessed.
    pub targets_hit: u32,
    pub healed: u32,
}

impl GameEngine<'_> {
    /// Invokes `kind` as `user` against `target`.
    ///
    /// `target` is ignored by self and party abilities; area abilities are
    /// centred on the target's cell.
    ///
    /// # Errors
    ///
    /// - `ActorNotFound` / `TargetDead`: invalid handles
    /// - `Incapacitated`: the user is dead or stunned
    /// - `InsufficientResource`: the first unaffordable cost
    /// - `OutOfRange` / `NoLineOfSight`: target unreachable for the shape
    pub fn use_ability(
        &mut self,
        kind: AbilityKind,
        user: EntityId,
        target: EntityId,
    ) -> Result<AbilityOutcome, ActionError> {
        let ability = kind.ability();
        self.pre_validate(&ability, user, target)?;

        if let Some(caster) = self.state.actor_mut(user) {
            for &(resource, amount) in ability.costs {
                caster.resources.meter_mut(resource).drain(amount);
            }
        }

        let outcome = self.apply_effects(&ability, user, target);
        tracing::debug!(
            user = %user,
            target = %target,
            ability = kind.as_ref(),
            dealt = outcome.dealt,
            targets_hit = outcome.targets_hit,
            "ability used"
        );
        Ok(outcome)
    }

    /// Parses a snake_case ability key and invokes it.
    ///
    /// # Errors
    ///
    /// `UnknownAbility` when `key` names no catalog entry; otherwise as
    /// [`use_ability`](Self::use_ability).
    pub fn use_ability_by_key(
        &mut self,
        key: &str,
        user: EntityId,
        target: EntityId,
    ) -> Result<AbilityOutcome, ActionError> {
        let Ok(kind) = key.parse::<AbilityKind>() else {
            self.say(format!("Unknown ability: {key}"), MessageCategory::System);
            return Err(ActionError::UnknownAbility(key.to_owned()));
        };
        self.use_ability(kind, user, target)
    }
}

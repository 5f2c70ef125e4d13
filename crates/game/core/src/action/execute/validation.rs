//! Pre-validation: everything that can reject an ability before it costs anything.

use crate::action::{Ability, ActionError, TargetShape};
use crate::combat::attack::reach;
use crate::combat::has_line_of_sight;
use crate::engine::GameEngine;
use crate::env::MessageCategory;
use crate::state::{EntityId, StatusKind};

impl GameEngine<'_> {
    /// Checks, in order: the user can act, every cost is covered, and the
    /// target is valid and reachable for the ability's shape.
    ///
    /// On failure an explanatory message is pushed and nothing else changes.
    pub(super) fn pre_validate(
        &mut self,
        ability: &Ability,
        user: EntityId,
        target: EntityId,
    ) -> Result<(), ActionError> {
        let caster = self
            .state
            .actor(user)
            .ok_or(ActionError::ActorNotFound(user))?;
        if !caster.alive {
            return Err(ActionError::Incapacitated { actor: user });
        }
        if caster.status_effects.has(StatusKind::Stunned) {
            let text = format!("{} is stunned and cannot act!", caster.name);
            self.say(text, MessageCategory::Combat);
            return Err(ActionError::Incapacitated { actor: user });
        }

        for &(resource, required) in ability.costs {
            let available = caster.resources.meter(resource).current;
            if available < required {
                let text = format!(
                    "{} doesn't have enough {} for {}.",
                    caster.name, resource, ability.name
                );
                self.say(text, MessageCategory::Combat);
                return Err(ActionError::InsufficientResource {
                    ability: ability.kind,
                    resource,
                    required,
                    available,
                });
            }
        }

        let range = match ability.shape {
            TargetShape::SelfOnly | TargetShape::Party => return Ok(()),
            TargetShape::Melee => Some(1),
            TargetShape::Ranged { range } => Some(range),
            TargetShape::Area { .. } => None,
        };

        let victim = self
            .state
            .actor(target)
            .ok_or(ActionError::ActorNotFound(target))?;
        if !victim.alive {
            return Err(ActionError::TargetDead(target));
        }

        let distance = reach(caster, victim);
        if let Some(range) = range.filter(|&range| distance > range) {
            let text = if range <= 1 {
                format!("Too far for {}.", ability.name)
            } else {
                format!("Out of range for {}.", ability.name)
            };
            self.say(text, MessageCategory::Combat);
            return Err(ActionError::OutOfRange {
                target,
                distance,
                range,
            });
        }

        let needs_sight = !matches!(ability.shape, TargetShape::Melee);
        if needs_sight
            && (caster.floor != victim.floor
                || !has_line_of_sight(
                    self.env.map(),
                    caster.floor,
                    caster.position,
                    victim.position,
                ))
        {
            let text = format!("No line of sight for {}.", ability.name);
            self.say(text, MessageCategory::Combat);
            return Err(ActionError::NoLineOfSight { target });
        }

        Ok(())
    }
}

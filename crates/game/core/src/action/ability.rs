//! The closed ability catalog.
//!
//! Every ability is a hand-authored entry: display name, resource costs that
//! must all be affordable at once, and a [`TargetShape`]. The effect procedure
//! for each kind lives in `action::execute`.

use crate::state::ResourceKind;

/// Ability identifiers. Parses from and prints as snake_case keys (`"power_strike"`).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum AbilityKind {
    // Warrior
    PowerStrike,
    ShieldBash,
    WarCry,
    // Mage
    Fireball,
    IceShard,
    ArcaneShield,
    // Rogue
    Backstab,
    Evade,
    PoisonBlade,
    // Cleric
    Heal,
    Smite,
    DivineShield,
    // Monster
    VenomSpit,
    Rend,
    Hex,
}

/// Who or what an ability reaches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetShape {
    /// Affects the user only; the target argument is ignored.
    SelfOnly,
    /// Chebyshev distance of at most 1.
    Melee,
    /// Up to `range` tiles with line of sight.
    Ranged { range: u32 },
    /// Every living actor within `radius` of the target's cell; needs line of sight to it.
    Area { radius: u32, multiplier_pct: u32 },
    /// The user and all of its allies on the floor.
    Party,
}

/// Immutable catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ability {
    pub kind: AbilityKind,
    pub name: &'static str,
    pub costs: &'static [(ResourceKind, u32)],
    pub shape: TargetShape,
}

impl AbilityKind {
    pub const fn ability(self) -> Ability {
        use ResourceKind::{Mana, Stamina};
        use TargetShape::*;

        let (name, costs, shape): (&'static str, &'static [(ResourceKind, u32)], TargetShape) =
            match self {
                AbilityKind::PowerStrike => ("Power Strike", &[(Stamina, 20)], Melee),
                AbilityKind::ShieldBash => ("Shield Bash", &[(Stamina, 15)], Melee),
                AbilityKind::WarCry => ("War Cry", &[(Stamina, 25)], SelfOnly),
                AbilityKind::Fireball => (
                    "Fireball",
                    &[(Mana, 30)],
                    Area {
                        radius: 2,
                        multiplier_pct: 200,
                    },
                ),
                AbilityKind::IceShard => ("Ice Shard", &[(Mana, 15)], Ranged { range: 6 }),
                AbilityKind::ArcaneShield => ("Arcane Shield", &[(Mana, 25)], SelfOnly),
                AbilityKind::Backstab => ("Backstab", &[(Stamina, 20)], Melee),
                AbilityKind::Evade => ("Evade", &[(Stamina, 15)], SelfOnly),
                AbilityKind::PoisonBlade => ("Poison Blade", &[(Stamina, 25)], Melee),
                AbilityKind::Heal => ("Heal", &[(Mana, 30)], SelfOnly),
                AbilityKind::Smite => ("Smite", &[(Mana, 15)], Melee),
                AbilityKind::DivineShield => ("Divine Shield", &[(Mana, 30)], Party),
                AbilityKind::VenomSpit => ("Venom Spit", &[(Stamina, 15)], Ranged { range: 4 }),
                AbilityKind::Rend => ("Rend", &[(Stamina, 15)], Melee),
                AbilityKind::Hex => ("Hex", &[(Mana, 20), (Stamina, 10)], Ranged { range: 5 }),
            };

        Ability {
            kind: self,
            name,
            costs,
            shape,
        }
    }

    pub const fn name(self) -> &'static str {
        self.ability().name
    }

    pub const fn costs(self) -> &'static [(ResourceKind, u32)] {
        self.ability().costs
    }
}

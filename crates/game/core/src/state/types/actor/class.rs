use crate::action::AbilityKind;

/// Playable character classes.
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
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ClassKind {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

/// Level-1 stats and starting abilities of a class.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClassProfile {
    pub hp: u32,
    pub mana: u32,
    pub stamina: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub abilities: &'static [AbilityKind],
}

/// Per-turn regeneration while exploring.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegenRates {
    pub hp: u32,
    pub mana: u32,
    pub stamina: u32,
}

impl ClassKind {
    pub const fn profile(self) -> ClassProfile {
        use AbilityKind::*;
        match self {
            ClassKind::Warrior => ClassProfile {
                hp: 120,
                mana: 20,
                stamina: 100,
                attack: 14,
                defense: 12,
                speed: 8,
                abilities: &[PowerStrike, ShieldBash, WarCry],
            },
            ClassKind::Mage => ClassProfile {
                hp: 60,
                mana: 120,
                stamina: 60,
                attack: 6,
                defense: 4,
                speed: 10,
                abilities: &[Fireball, IceShard, ArcaneShield],
            },
            ClassKind::Rogue => ClassProfile {
                hp: 80,
                mana: 40,
                stamina: 120,
                attack: 12,
                defense: 6,
                speed: 14,
                abilities: &[Backstab, Evade, PoisonBlade],
            },
            ClassKind::Cleric => ClassProfile {
                hp: 90,
                mana: 80,
                stamina: 80,
                attack: 8,
                defense: 10,
                speed: 9,
                abilities: &[Heal, Smite, DivineShield],
            },
        }
    }

    pub const fn regen_rates(self) -> RegenRates {
        let (hp, mana, stamina) = match self {
            ClassKind::Warrior => (2, 0, 3),
            ClassKind::Mage => (1, 3, 1),
            ClassKind::Rogue => (1, 0, 3),
            ClassKind::Cleric => (2, 2, 2),
        };
        RegenRates { hp, mana, stamina }
    }
}

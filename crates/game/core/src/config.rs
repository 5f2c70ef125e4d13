/// Game configuration constants and tunable parameters.
///
/// Capacities that size fixed collections are compile-time constants; every
/// balance knob is a runtime field so content files can override it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    pub combat: CombatConfig,
    pub ai: AiConfig,
    pub boss: BossConfig,
    pub progression: ProgressionConfig,
}

impl GameConfig {
    // ===== compile-time constants used as type parameters =====
    /// One slot per status kind.
    pub const MAX_STATUS_EFFECTS: usize = 9;
    pub const MAX_ABILITIES: usize = 8;

    pub fn new() -> Self {
        Self {
            combat: CombatConfig::default(),
            ai: AiConfig::default(),
            boss: BossConfig::default(),
            progression: ProgressionConfig::default(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Damage roll and critical-hit tuning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Half-width of the symmetric variance added to base damage.
    pub damage_variance: i32,
    pub crit_bleed_duration: u32,
    pub crit_bleed_damage: u32,
}

impl CombatConfig {
    pub const DEFAULT_DAMAGE_VARIANCE: i32 = 2;
    pub const DEFAULT_CRIT_BLEED_DURATION: u32 = 3;
    pub const DEFAULT_CRIT_BLEED_DAMAGE: u32 = 2;
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            damage_variance: Self::DEFAULT_DAMAGE_VARIANCE,
            crit_bleed_duration: Self::DEFAULT_CRIT_BLEED_DURATION,
            crit_bleed_damage: Self::DEFAULT_CRIT_BLEED_DAMAGE,
        }
    }
}

/// Monster behaviour tuning. Chances are whole percentages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    /// Chebyshev radius around the player outside which monsters idle.
    pub detection_radius: u32,
    pub aggressive_ability_chance: u32,
    pub flanking_ability_chance: u32,
    pub cautious_ability_chance: u32,
    /// Cautious monsters disengage strictly below this hp percentage.
    pub cautious_hp_threshold_pct: u32,
    pub ranged_min_distance: u32,
    pub ranged_max_distance: u32,
}

impl AiConfig {
    pub const DEFAULT_DETECTION_RADIUS: u32 = 10;
    pub const DEFAULT_AGGRESSIVE_ABILITY_CHANCE: u32 = 30;
    pub const DEFAULT_FLANKING_ABILITY_CHANCE: u32 = 40;
    pub const DEFAULT_CAUTIOUS_ABILITY_CHANCE: u32 = 30;
    pub const DEFAULT_CAUTIOUS_HP_THRESHOLD_PCT: u32 = 30;
    pub const DEFAULT_RANGED_MIN_DISTANCE: u32 = 3;
    pub const DEFAULT_RANGED_MAX_DISTANCE: u32 = 6;
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            detection_radius: Self::DEFAULT_DETECTION_RADIUS,
            aggressive_ability_chance: Self::DEFAULT_AGGRESSIVE_ABILITY_CHANCE,
            flanking_ability_chance: Self::DEFAULT_FLANKING_ABILITY_CHANCE,
            cautious_ability_chance: Self::DEFAULT_CAUTIOUS_ABILITY_CHANCE,
            cautious_hp_threshold_pct: Self::DEFAULT_CAUTIOUS_HP_THRESHOLD_PCT,
            ranged_min_distance: Self::DEFAULT_RANGED_MIN_DISTANCE,
            ranged_max_distance: Self::DEFAULT_RANGED_MAX_DISTANCE,
        }
    }
}

/// Boss phase controller tuning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BossConfig {
    /// Monster template spawned by summon phases.
    pub summon_template: String,
    pub summons_per_trigger: u32,
    /// Cap on living minions of `summon_template` on the boss floor.
    pub max_active_minions: u32,
    pub enrage_speed_bonus: i32,
    /// Chance per turn (below half hp) to begin a telegraphed attack.
    pub telegraph_chance: u32,
    pub crush_multiplier_pct: u32,
    pub breath_radius: u32,
    pub breath_multiplier_pct: u32,
    pub breath_range: u32,
    pub nuke_min_distance: u32,
    pub nuke_max_distance: u32,
    pub power_strike_chance: u32,
}

impl BossConfig {
    pub const DEFAULT_SUMMON_TEMPLATE: &'static str = "dragon_whelp";
    pub const DEFAULT_SUMMONS_PER_TRIGGER: u32 = 2;
    pub const DEFAULT_MAX_ACTIVE_MINIONS: u32 = 4;
    pub const DEFAULT_ENRAGE_SPEED_BONUS: i32 = 4;
    pub const DEFAULT_TELEGRAPH_CHANCE: u32 = 25;
    pub const DEFAULT_CRUSH_MULTIPLIER_PCT: u32 = 300;
    pub const DEFAULT_BREATH_RADIUS: u32 = 2;
    pub const DEFAULT_BREATH_MULTIPLIER_PCT: u32 = 150;
    pub const DEFAULT_BREATH_RANGE: u32 = 5;
    pub const DEFAULT_NUKE_MIN_DISTANCE: u32 = 2;
    pub const DEFAULT_NUKE_MAX_DISTANCE: u32 = 5;
    pub const DEFAULT_POWER_STRIKE_CHANCE: u32 = 50;
}

impl Default for BossConfig {
    fn default() -> Self {
        Self {
            summon_template: Self::DEFAULT_SUMMON_TEMPLATE.to_owned(),
            summons_per_trigger: Self::DEFAULT_SUMMONS_PER_TRIGGER,
            max_active_minions: Self::DEFAULT_MAX_ACTIVE_MINIONS,
            enrage_speed_bonus: Self::DEFAULT_ENRAGE_SPEED_BONUS,
            telegraph_chance: Self::DEFAULT_TELEGRAPH_CHANCE,
            crush_multiplier_pct: Self::DEFAULT_CRUSH_MULTIPLIER_PCT,
            breath_radius: Self::DEFAULT_BREATH_RADIUS,
            breath_multiplier_pct: Self::DEFAULT_BREATH_MULTIPLIER_PCT,
            breath_range: Self::DEFAULT_BREATH_RANGE,
            nuke_min_distance: Self::DEFAULT_NUKE_MIN_DISTANCE,
            nuke_max_distance: Self::DEFAULT_NUKE_MAX_DISTANCE,
            power_strike_chance: Self::DEFAULT_POWER_STRIKE_CHANCE,
        }
    }
}

/// Experience curve.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProgressionConfig {
    /// XP needed to leave level `i + 1`. Its length caps the level.
    pub xp_per_level: Vec<u32>,
}

impl ProgressionConfig {
    /// `floor(50 * 1.25^i)` for twenty levels.
    pub const DEFAULT_XP_PER_LEVEL: [u32; 20] = [
        50, 62, 78, 97, 122, 152, 190, 238, 298, 372, 465, 582, 727, 909, 1136, 1421, 1776, 2220,
        2775, 3469,
    ];

    /// Highest reachable level.
    pub fn max_level(&self) -> u32 {
        self.xp_per_level.len() as u32
    }
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            xp_per_level: Self::DEFAULT_XP_PER_LEVEL.to_vec(),
        }
    }
}

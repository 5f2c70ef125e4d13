//! Actor records: the player, monsters and allied NPCs.
mod class;

pub use class::{ClassKind, ClassProfile, RegenRates};

use arrayvec::ArrayVec;
use bitflags::bitflags;

use crate::action::AbilityKind;
use crate::ai::Behavior;
use crate::config::GameConfig;
use crate::state::{BossState, EntityId, Position, ResourceMeter, StatKind, StatusEffects};

/// Who controls an actor.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ActorKind {
    Player,
    #[default]
    Monster,
    /// Ally of the player (receives party effects).
    Npc,
}

/// Spendable resources an ability may cost.
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
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum ResourceKind {
    Hp,
    Mana,
    Stamina,
}

bitflags! {
    /// Creature traits consulted by abilities and the boss controller.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActorTags: u8 {
        const UNDEAD = 1 << 0;
        const BOSS   = 1 << 1;
    }
}

/// Hit points, mana and stamina.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Resources {
    pub hp: ResourceMeter,
    pub mana: ResourceMeter,
    pub stamina: ResourceMeter,
}

impl Resources {
    pub fn full(hp: u32, mana: u32, stamina: u32) -> Self {
        Self {
            hp: ResourceMeter::full(hp),
            mana: ResourceMeter::full(mana),
            stamina: ResourceMeter::full(stamina),
        }
    }

    pub fn meter(&self, kind: ResourceKind) -> &ResourceMeter {
        match kind {
            ResourceKind::Hp => &self.hp,
            ResourceKind::Mana => &self.mana,
            ResourceKind::Stamina => &self.stamina,
        }
    }

    pub fn meter_mut(&mut self, kind: ResourceKind) -> &mut ResourceMeter {
        match kind {
            ResourceKind::Hp => &mut self.hp,
            ResourceKind::Mana => &mut self.mana,
            ResourceKind::Stamina => &mut self.stamina,
        }
    }
}

pub type AbilityList = ArrayVec<AbilityKind, { GameConfig::MAX_ABILITIES }>;

/// Complete record of one combatant.
///
/// `alive` is never derived from hp: death is the explicit [`Actor::kill`]
/// transition performed by the damage resolver and the status tick.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Actor {
    pub id: EntityId,
    pub name: String,
    pub kind: ActorKind,
    pub position: Position,
    pub floor: u32,
    pub alive: bool,
    pub resources: Resources,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub level: u32,
    pub xp: u32,
    /// Experience granted to the player who slays this actor.
    pub xp_value: u32,
    pub status_effects: StatusEffects,
    pub abilities: AbilityList,
    pub behavior: Behavior,
    pub tags: ActorTags,
    /// Monster template key this actor was spawned from.
    pub template: Option<String>,
    pub class: Option<ClassKind>,
    /// Present only on actors driven by the boss controller.
    pub boss: Option<BossState>,
}

impl Actor {
    /// Creates a living level-1 actor with zeroed stats; chain the builders to fill them in.
    pub fn new(id: EntityId, name: impl Into<String>, kind: ActorKind, position: Position) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            position,
            floor: 0,
            alive: true,
            resources: Resources::default(),
            attack: 0,
            defense: 0,
            speed: 0,
            level: 1,
            xp: 0,
            xp_value: 0,
            status_effects: StatusEffects::empty(),
            abilities: AbilityList::new(),
            behavior: Behavior::default(),
            tags: ActorTags::empty(),
            template: None,
            class: None,
            boss: None,
        }
    }

    /// Builds the player character for a class at level 1.
    pub fn player_from_class(class: ClassKind, name: impl Into<String>, position: Position) -> Self {
        let profile = class.profile();
        let mut actor = Self::new(EntityId::PLAYER, name, ActorKind::Player, position)
            .with_resources(profile.hp, profile.mana, profile.stamina)
            .with_combat_stats(profile.attack, profile.defense, profile.speed)
            .with_abilities(profile.abilities);
        actor.class = Some(class);
        actor
    }

    // ===== builders =====

    #[must_use]
    pub fn with_resources(mut self, hp: u32, mana: u32, stamina: u32) -> Self {
        self.resources = Resources::full(hp, mana, stamina);
        self
    }

    #[must_use]
    pub fn with_combat_stats(mut self, attack: i32, defense: i32, speed: i32) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.speed = speed;
        self
    }

    /// Extra entries beyond `MAX_ABILITIES` are ignored.
    #[must_use]
    pub fn with_abilities(mut self, abilities: &[AbilityKind]) -> Self {
        self.abilities = abilities
            .iter()
            .copied()
            .take(GameConfig::MAX_ABILITIES)
            .collect();
        self
    }

    #[must_use]
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        if behavior == Behavior::Boss && self.boss.is_none() {
            self.boss = Some(BossState::default());
        }
        self
    }

    #[must_use]
    pub fn with_tags(mut self, tags: ActorTags) -> Self {
        self.tags = tags;
        self
    }

    #[must_use]
    pub fn on_floor(mut self, floor: u32) -> Self {
        self.floor = floor;
        self
    }

    #[must_use]
    pub fn with_xp_value(mut self, xp_value: u32) -> Self {
        self.xp_value = xp_value;
        self
    }

    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }

    // ===== queries =====

    pub fn hp(&self) -> u32 {
        self.resources.hp.current
    }

    pub fn is_player(&self) -> bool {
        self.kind == ActorKind::Player
    }

    /// Rounded hp percentage used in combat messages.
    pub fn hp_percent(&self) -> u32 {
        self.resources.hp.percent()
    }

    /// `hp / max_hp <= percent / 100`, computed exactly.
    pub fn hp_at_or_below(&self, percent: u32) -> bool {
        self.resources.hp.at_or_below_percent(percent)
    }

    pub fn hp_below(&self, percent: u32) -> bool {
        self.resources.hp.below_percent(percent)
    }

    pub fn knows(&self, ability: AbilityKind) -> bool {
        self.abilities.contains(&ability)
    }

    /// True when every `(resource, amount)` cost is covered.
    pub fn can_afford(&self, costs: &[(ResourceKind, u32)]) -> bool {
        costs
            .iter()
            .all(|&(kind, amount)| self.resources.meter(kind).current >= amount)
    }

    pub fn stat_mut(&mut self, stat: StatKind) -> &mut i32 {
        match stat {
            StatKind::Attack => &mut self.attack,
            StatKind::Defense => &mut self.defense,
            StatKind::Speed => &mut self.speed,
        }
    }

    // ===== transitions =====

    /// Marks the actor dead and zeroes its hp. Returns true on the alive-to-dead edge.
    pub fn kill(&mut self) -> bool {
        self.resources.hp.set(0);
        std::mem::replace(&mut self.alive, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_player_starts_full() {
        let mage = Actor::player_from_class(ClassKind::Mage, "Ysolde", Position::new(1, 1));
        assert_eq!(mage.id, EntityId::PLAYER);
        assert_eq!(mage.resources.mana, ResourceMeter::full(120));
        assert_eq!(mage.attack, 6);
        assert!(mage.knows(AbilityKind::Fireball));
        assert_eq!(mage.class, Some(ClassKind::Mage));
    }

    #[test]
    fn kill_reports_edge_once() {
        let mut actor = Actor::new(EntityId(4), "Rat", ActorKind::Monster, Position::ORIGIN)
            .with_resources(6, 0, 0);
        assert!(actor.kill());
        assert!(!actor.kill());
        assert_eq!(actor.hp(), 0);
        assert!(!actor.alive);
    }

    #[test]
    fn affordability_checks_every_cost() {
        let actor = Actor::new(EntityId(1), "Hexer", ActorKind::Monster, Position::ORIGIN)
            .with_resources(10, 20, 5);
        assert!(actor.can_afford(&[(ResourceKind::Mana, 20)]));
        assert!(!actor.can_afford(&[(ResourceKind::Mana, 20), (ResourceKind::Stamina, 10)]));
    }

    #[test]
    fn boss_behavior_attaches_phase_state() {
        let boss = Actor::new(EntityId(9), "Dragon Lord", ActorKind::Monster, Position::ORIGIN)
            .with_behavior(Behavior::Boss);
        assert!(boss.boss.is_some());
    }
}

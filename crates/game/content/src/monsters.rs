//! Monster templates and the floor-scaled factory built from them.
//!
//! A [`MonsterTemplate`] holds floor-0 stats. Instantiating it on deeper
//! floors scales hit points, attack and defense by 15% per floor and the XP
//! reward by 30% per floor; speed never scales.

use std::collections::BTreeMap;

use crawler_core::{
    AbilityKind, Actor, ActorKind, ActorTags, Behavior, EntityId, GameRng, GameState, MapOracle,
    MonsterFactory, Position,
};

/// Base stats for one kind of monster before floor scaling.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonsterTemplate {
    pub name: String,
    pub hp: u32,
    pub attack: i32,
    pub defense: i32,
    pub speed: i32,
    pub behavior: Behavior,
    pub xp_value: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub tags: ActorTags,
    #[cfg_attr(feature = "serde", serde(default))]
    pub abilities: Vec<AbilityKind>,
    /// Floors this template may spawn on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub floors: Vec<u32>,
}

impl MonsterTemplate {
    pub const STAT_SCALING_PCT_PER_FLOOR: i64 = 15;
    pub const XP_SCALING_PCT_PER_FLOOR: i64 = 30;
    /// Mana pool given to ranged casters and bosses.
    pub const CASTER_MANA: u32 = 60;
    pub const STAMINA: u32 = 50;

    pub fn is_boss(&self) -> bool {
        self.behavior == Behavior::Boss
    }

    pub fn spawns_on(&self, floor: u32) -> bool {
        self.floors.contains(&floor)
    }

    pub fn scaled_hp(&self, floor: u32) -> u32 {
        scale(i64::from(self.hp), floor, Self::STAT_SCALING_PCT_PER_FLOOR)
            .try_into()
            .unwrap_or(u32::MAX)
    }

    pub fn scaled_attack(&self, floor: u32) -> i32 {
        clamp_i32(scale(
            i64::from(self.attack),
            floor,
            Self::STAT_SCALING_PCT_PER_FLOOR,
        ))
    }

    pub fn scaled_defense(&self, floor: u32) -> i32 {
        clamp_i32(scale(
            i64::from(self.defense),
            floor,
            Self::STAT_SCALING_PCT_PER_FLOOR,
        ))
    }

    pub fn scaled_xp(&self, floor: u32) -> u32 {
        scale(i64::from(self.xp_value), floor, Self::XP_SCALING_PCT_PER_FLOOR)
            .try_into()
            .unwrap_or(u32::MAX)
    }

    fn mana(&self) -> u32 {
        match self.behavior {
            Behavior::Ranged | Behavior::Boss => Self::CASTER_MANA,
            _ => 0,
        }
    }

    /// Builds a living monster from this template, scaled for `floor`.
    pub fn instantiate(&self, key: &str, id: EntityId, floor: u32, position: Position) -> Actor {
        let tags = if self.is_boss() {
            self.tags | ActorTags::BOSS
        } else {
            self.tags
        };

        Actor::new(id, self.name.as_str(), ActorKind::Monster, position)
            .with_resources(self.scaled_hp(floor), self.mana(), Self::STAMINA)
            .with_combat_stats(
                self.scaled_attack(floor),
                self.scaled_defense(floor),
                self.speed,
            )
            .with_abilities(&self.abilities)
            .with_behavior(self.behavior)
            .with_tags(tags)
            .with_xp_value(self.scaled_xp(floor))
            .with_template(key)
            .on_floor(floor)
    }
}

/// `base × (1 + pct·floor / 100)`, rounded toward negative infinity.
fn scale(base: i64, floor: u32, pct_per_floor: i64) -> i64 {
    (base * (100 + pct_per_floor * i64::from(floor))).div_euclid(100)
}

fn clamp_i32(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Keyed collection of monster templates.
///
/// Iteration is in key order so floor spawns replay identically for a seed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MonsterCatalog {
    templates: BTreeMap<String, MonsterTemplate>,
}

impl MonsterCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a template, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        template: MonsterTemplate,
    ) -> Option<MonsterTemplate> {
        self.templates.insert(key.into(), template)
    }

    pub fn get(&self, key: &str) -> Option<&MonsterTemplate> {
        self.templates.get(key)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MonsterTemplate)> {
        self.templates.iter().map(|(key, t)| (key.as_str(), t))
    }

    /// Every template listing `floor`, bosses included.
    pub fn templates_for_floor(
        &self,
        floor: u32,
    ) -> impl Iterator<Item = (&str, &MonsterTemplate)> {
        self.iter().filter(move |(_, t)| t.spawns_on(floor))
    }

    /// Populates `floor` with monsters placed on `spawn_points`.
    ///
    /// A boss listing this floor is placed on the last spawn point. Regular
    /// monsters then fill up to a floor-dependent head count; picks that land
    /// on a blocked or occupied tile are skipped rather than retried.
    pub fn spawn_for_floor(
        &self,
        state: &mut GameState,
        map: &dyn MapOracle,
        floor: u32,
        spawn_points: &[Position],
        rng: &mut GameRng,
    ) -> Vec<EntityId> {
        let templates: Vec<(&str, &MonsterTemplate)> = self.templates_for_floor(floor).collect();
        if templates.is_empty() {
            return Vec::new();
        }

        let floor_i = floor as i32;
        let count = rng.range(3 + floor_i * 6 / 10, 5 + floor_i * 8 / 10).max(0) as usize;
        let mut spawned = Vec::with_capacity(count);

        let boss = templates.iter().find(|(_, t)| t.is_boss());
        if let (Some(&(key, _)), Some(&position)) = (boss, spawn_points.last()) {
            spawned.extend(self.place(state, map, key, floor, position));
        }

        let regular: Vec<&str> = templates
            .iter()
            .filter(|(_, t)| !t.is_boss())
            .map(|&(key, _)| key)
            .collect();
        if regular.is_empty() || spawn_points.is_empty() {
            return spawned;
        }

        for _ in spawned.len()..count {
            let Some(&position) = rng.choose(spawn_points) else {
                break;
            };
            let Some(&key) = rng.choose(&regular) else {
                break;
            };
            if let Some(id) = self.place(state, map, key, floor, position) {
                spawned.push(id);
            }
        }

        tracing::debug!(floor, spawned = spawned.len(), "populated floor");
        spawned
    }

    fn place(
        &self,
        state: &mut GameState,
        map: &dyn MapOracle,
        key: &str,
        floor: u32,
        position: Position,
    ) -> Option<EntityId> {
        if !map.is_walkable(floor, position) || state.is_occupied(floor, position) {
            return None;
        }
        let id = state.allocate_entity_id();
        let monster = self.create_monster(key, id, floor, position)?;
        state.add_actor(monster);
        Some(id)
    }
}

impl FromIterator<(String, MonsterTemplate)> for MonsterCatalog {
    fn from_iter<I: IntoIterator<Item = (String, MonsterTemplate)>>(iter: I) -> Self {
        Self {
            templates: iter.into_iter().collect(),
        }
    }
}

impl MonsterFactory for MonsterCatalog {
    fn create_monster(
        &self,
        template: &str,
        id: EntityId,
        floor: u32,
        position: Position,
    ) -> Option<Actor> {
        let Some(entry) = self.templates.get(template) else {
            tracing::warn!(template, "unknown monster template");
            return None;
        };
        Some(entry.instantiate(template, id, floor, position))
    }
}

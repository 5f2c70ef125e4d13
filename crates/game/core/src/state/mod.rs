//! Authoritative simulation state.
//!
//! This module owns the actor table and turn bookkeeping. Callers query it
//! freely but mutate combatants through the engine so that deaths, kill
//! rewards and messages stay consistent.
pub mod types;

use std::collections::BTreeMap;

pub use types::{
    AbilityList, Actor, ActorKind, ActorTags, BossPhase, BossState, ClassKind, ClassProfile,
    ENRAGE_THRESHOLD_PCT, EffectPayload, EntityId, Position, RegenRates, ResourceKind,
    ResourceMeter, Resources, StatKind, StatusEffect, StatusEffects, StatusKind, Telegraph,
    TelegraphKind, TurnState,
};

/// Every actor of the run, keyed by id, plus the turn counter.
///
/// Dead actors stay in the table so kill bookkeeping can still read them; all
/// spatial queries skip them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    /// Sequential entity ID allocator (monotonically increasing, never reused).
    next_entity_id: u32,

    pub turn: TurnState,

    actors: BTreeMap<EntityId, Actor>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            next_entity_id: 1, // 0 is reserved for PLAYER
            turn: TurnState::new(),
            actors: BTreeMap::new(),
        }
    }

    /// Allocates a new unique EntityId.
    pub fn allocate_entity_id(&mut self) -> EntityId {
        if self.next_entity_id == EntityId::PLAYER.0 {
            self.next_entity_id += 1;
        }
        let id = EntityId(self.next_entity_id);
        self.next_entity_id = self.next_entity_id.saturating_add(1);
        id
    }

    /// Inserts an actor under its own id, returning any actor it replaced.
    ///
    /// The allocator is bumped past the id so later allocations never collide.
    pub fn add_actor(&mut self, actor: Actor) -> Option<Actor> {
        if actor.id.0 >= self.next_entity_id {
            self.next_entity_id = actor.id.0.saturating_add(1);
        }
        self.actors.insert(actor.id, actor)
    }

    /// Allocates an id for `actor` and inserts it.
    pub fn spawn(&mut self, mut actor: Actor) -> EntityId {
        let id = self.allocate_entity_id();
        actor.id = id;
        self.actors.insert(id, actor);
        id
    }

    pub fn actor(&self, id: EntityId) -> Option<&Actor> {
        self.actors.get(&id)
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut Actor> {
        self.actors.get_mut(&id)
    }

    pub fn player(&self) -> Option<&Actor> {
        self.actor(EntityId::PLAYER)
    }

    pub fn player_mut(&mut self) -> Option<&mut Actor> {
        self.actor_mut(EntityId::PLAYER)
    }

    /// All actors in id order, dead ones included.
    pub fn actors(&self) -> impl Iterator<Item = &Actor> {
        self.actors.values()
    }

    /// Living actors on `floor`, in id order.
    pub fn actors_on_floor(&self, floor: u32) -> impl Iterator<Item = &Actor> {
        self.actors
            .values()
            .filter(move |actor| actor.alive && actor.floor == floor)
    }

    /// The living actor standing on `position` of `floor`, if any.
    pub fn actor_at(&self, floor: u32, position: Position) -> Option<&Actor> {
        self.actors_on_floor(floor)
            .find(|actor| actor.position == position)
    }

    pub fn is_occupied(&self, floor: u32, position: Position) -> bool {
        self.actor_at(floor, position).is_some()
    }

    /// Living actors spawned from `template` on `floor`.
    pub fn count_living_from_template(&self, floor: u32, template: &str) -> usize {
        self.actors_on_floor(floor)
            .filter(|actor| actor.template.as_deref() == Some(template))
            .count()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

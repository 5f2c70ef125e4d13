//! Read-only collaborators and the message stream.
//!
//! Oracles expose the static tile layout and monster templates. The [`Env`]
//! aggregate bundles them so the engine can access everything it needs without
//! hard coupling to concrete implementations.
mod error;
mod log;
mod map;
mod npc;
mod rng;

pub use error::OracleError;
pub use log::{Message, MessageCategory, MessageLog, MessageSink, TracingSink};
pub use map::{GridMap, GridParseError, MapDimensions, MapOracle, TileKind};
pub use npc::MonsterFactory;
pub use rng::GameRng;

use crate::state::{Actor, EntityId, Position};

/// Aggregates read-only oracles required by combat and AI.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    map: &'a dyn MapOracle,
    monsters: Option<&'a dyn MonsterFactory>,
}

impl<'a> Env<'a> {
    pub fn new(map: &'a dyn MapOracle) -> Self {
        Self {
            map,
            monsters: None,
        }
    }

    /// Attaches a monster factory (builder pattern).
    pub fn with_monsters(mut self, monsters: &'a dyn MonsterFactory) -> Self {
        self.monsters = Some(monsters);
        self
    }

    pub fn map(&self) -> &'a dyn MapOracle {
        self.map
    }

    /// Returns the MonsterFactory, or an error if not available.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MonstersNotAvailable` if no factory was provided.
    pub fn monsters(&self) -> Result<&'a dyn MonsterFactory, OracleError> {
        self.monsters.ok_or(OracleError::MonstersNotAvailable)
    }

    /// Instantiates `template` through the monster factory.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::MonstersNotAvailable` without a factory and
    /// `OracleError::MonsterTemplateNotFound` for a key it does not know.
    pub fn spawn_monster(
        &self,
        template: &str,
        id: EntityId,
        floor: u32,
        position: Position,
    ) -> Result<Actor, OracleError> {
        self.monsters()?
            .create_monster(template, id, floor, position)
            .ok_or_else(|| OracleError::MonsterTemplateNotFound(template.to_owned()))
    }
}

impl core::fmt::Debug for Env<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Env")
            .field("dimensions", &self.map.dimensions())
            .field("monsters", &self.monsters.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Kennel;

    impl MonsterFactory for Kennel {
        fn create_monster(
            &self,
            template: &str,
            id: EntityId,
            floor: u32,
            position: Position,
        ) -> Option<Actor> {
            (template == "jackal").then(|| {
                Actor::new(id, "Jackal", crate::state::ActorKind::Monster, position)
                    .with_template(template)
                    .on_floor(floor)
            })
        }
    }

    #[test]
    fn spawn_monster_reports_missing_pieces() {
        let map = GridMap::open(4, 4);
        let at = Position::new(1, 1);

        assert_eq!(
            Env::new(&map).spawn_monster("jackal", EntityId(5), 0, at).err(),
            Some(OracleError::MonstersNotAvailable)
        );

        let env = Env::new(&map).with_monsters(&Kennel);
        assert_eq!(
            env.spawn_monster("wyvern", EntityId(5), 0, at).err(),
            Some(OracleError::MonsterTemplateNotFound("wyvern".into()))
        );
        let jackal = env.spawn_monster("jackal", EntityId(5), 2, at);
        assert_eq!(jackal.map(|a| (a.id, a.floor)), Ok((EntityId(5), 2)));
    }
}

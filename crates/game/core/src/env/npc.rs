use crate::state::{Actor, EntityId, Position};

/// Instantiates monsters by template key.
///
/// Used by summon effects; the engine allocates the id and inserts the
/// returned actor into the state.
pub trait MonsterFactory: Send + Sync {
    /// Returns `None` for an unknown template.
    fn create_monster(
        &self,
        template: &str,
        id: EntityId,
        floor: u32,
        position: Position,
    ) -> Option<Actor>;
}

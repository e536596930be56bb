//! Reap system - removes dead entities from the world.
//!
//! Damage sources (hypoxia, starvation) only drive health to zero; actual
//! removal happens here, once per tick, and the despawned entities are
//! reported to the caller.

use crate::components::Health;
use hecs::{Entity, World};

pub fn reap_system(world: &mut World) -> Vec<Entity> {
    let dead: Vec<Entity> = world
        .query::<&Health>()
        .iter()
        .filter(|(_, health)| !health.is_alive())
        .map(|(entity, _)| entity)
        .collect();

    for &entity in &dead {
        let _ = world.despawn(entity);
    }

    dead
}

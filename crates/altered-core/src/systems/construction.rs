//! Construction system - advances build progress, commissions finished
//! structures.

use crate::components::UnderConstruction;
use hecs::{Entity, World};

/// Advance every in-progress build by `dt` seconds. Completed structures
/// lose their `UnderConstruction` component and join the simulation from
/// the next system onward. Returns the commissioned entities.
pub fn construction_system(world: &mut World, dt: f32) -> Vec<Entity> {
    let mut completed = Vec::new();

    for (entity, build) in world.query_mut::<&mut UnderConstruction>() {
        if build.progress.advance(dt) {
            completed.push(entity);
        }
    }

    for &entity in &completed {
        let _ = world.remove_one::<UnderConstruction>(entity);
    }

    completed
}

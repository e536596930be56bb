//! Oxygen system - bridges the ECS to the oxygen field.
//!
//! Gathers per-tile breather occupancy and life-support generation, runs one
//! field step, then applies the reported hypoxia damage to the occupants.
//! Entities that die from it are left for the reap system; the field never
//! destroys anything.

use crate::components::{Breather, Health, LifeSupport, Position, Structure, UnderConstruction};
use crate::tilemap::TileMap;
use altered_logic::oxygen::OxygenField;
use hecs::{Entity, World};
use std::collections::HashMap;

/// Advance the oxygen field one tick and damage breathers on critical
/// tiles. Returns the (entity, damage) pairs applied.
pub fn oxygen_system(
    world: &mut World,
    field: &mut OxygenField,
    map: &TileMap,
    dt: f32,
) -> Vec<(Entity, f32)> {
    let dims = field.dims();
    let area = dims.area();

    let mut occupants = vec![0u32; area];
    let mut by_tile: HashMap<usize, Vec<Entity>> = HashMap::new();
    for (entity, position) in world.query::<&Position>().with::<&Breather>().iter() {
        if dims.contains(position.tile) {
            let idx = dims.index(position.tile);
            occupants[idx] += 1;
            by_tile.entry(idx).or_default().push(entity);
        }
    }

    let mut generation = vec![0.0f32; area];
    for (_, (structure, life_support)) in world
        .query_mut::<(&Structure, &mut LifeSupport)>()
        .without::<&UnderConstruction>()
    {
        life_support.active = life_support.powered;
        if !life_support.powered {
            continue;
        }
        for tile in structure.tiles() {
            if dims.contains(tile) && map.is_interior(tile) {
                generation[dims.index(tile)] += life_support.generation_rate;
            }
        }
    }

    let exposures = field.step(&occupants, &generation, &map.oxygen_blocked(), dt);

    let mut applied = Vec::new();
    for exposure in exposures {
        let idx = dims.index(exposure.tile);
        let Some(entities) = by_tile.get(&idx) else {
            continue;
        };
        for &entity in entities {
            if let Ok(mut health) = world.get::<&mut Health>(entity) {
                health.take_damage(exposure.damage);
                applied.push((entity, exposure.damage));
            }
        }
    }

    applied
}

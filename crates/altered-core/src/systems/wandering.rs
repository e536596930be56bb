//! Wandering system - idle drift to adjacent walkable tiles.
//!
//! No pathfinding: a wanderer whose cooldown expires picks one of its four
//! neighbors at random and steps there if the tile is walkable.

use crate::components::{Position, Wander};
use crate::tilemap::TileMap;
use hecs::World;
use rand::Rng;

pub fn wander_system(world: &mut World, map: &TileMap, dt: f32) {
    let mut rng = rand::thread_rng();

    for (_, (position, wander)) in world.query_mut::<(&mut Position, &mut Wander)>() {
        wander.cooldown -= dt;
        if wander.cooldown > 0.0 {
            continue;
        }
        wander.cooldown = rng.gen_range(0.5..3.0);

        let neighbors = position.tile.neighbors4();
        let pick = neighbors[rng.gen_range(0..neighbors.len())];
        if map.is_walkable(pick) {
            position.tile = pick;
        }
    }
}

//! Colony generation - carves a hull into the map and populates it.

use crate::components::{StructureKind, UnderConstruction};
use crate::engine::SimulationEngine;
use crate::tilemap::TileKind;
use altered_logic::grid::TilePos;
use rand::Rng;

/// Configuration for a generated colony.
#[derive(Debug, Clone)]
pub struct ColonyConfig {
    pub name: String,
    /// Map dimensions in tiles.
    pub width: u32,
    pub height: u32,
    /// Crew members to spawn on interior floor.
    pub crew: u32,
    /// Whether the starting structures are already built or still under
    /// construction.
    pub prebuilt: bool,
}

impl Default for ColonyConfig {
    fn default() -> Self {
        Self {
            name: "Colony".to_string(),
            width: 40,
            height: 28,
            crew: 6,
            prebuilt: true,
        }
    }
}

/// Carve a rectangular hull (wall ring, floor interior, barrier exterior),
/// place a reactor, a conduit run, and a life support unit, and spawn crew.
pub fn generate_colony(
    engine: &mut SimulationEngine,
    config: &ColonyConfig,
    rng: &mut impl Rng,
) {
    let dims = engine.tilemap.dims();
    assert!(
        config.width >= 16 && config.height >= 12,
        "colony map must be at least 16x12"
    );

    // Exterior space
    for pos in dims.iter() {
        engine.tilemap.set_kind(pos, TileKind::Barrier);
    }

    // Hull: wall ring with floor inside, inset from the map edge
    let margin = 2;
    let min_x = margin;
    let min_y = margin;
    let max_x = dims.width as i32 - 1 - margin;
    let max_y = dims.height as i32 - 1 - margin;

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let pos = TilePos::new(x, y);
            let on_ring = x == min_x || x == max_x || y == min_y || y == max_y;
            if on_ring {
                engine.tilemap.set_kind(pos, TileKind::Wall);
            } else if rng.gen_bool(0.15) {
                engine.tilemap.set_kind(pos, TileKind::Dirt);
            } else {
                engine.tilemap.set_kind(pos, TileKind::Floor);
            }
        }
    }

    // Starting infrastructure along the hull midline: reactor west, life
    // support east, conduits between them.
    let mid_y = (min_y + max_y) / 2;
    let reactor_origin = TilePos::new(min_x + 2, mid_y - 1);
    let life_support_origin = TilePos::new(max_x - 3, mid_y - 1);

    let mut placed = Vec::new();
    placed.push(
        engine
            .place_structure(StructureKind::Reactor, reactor_origin)
            .expect("reactor placement inside generated hull"),
    );
    for x in (reactor_origin.x + 2)..life_support_origin.x {
        placed.push(
            engine
                .place_structure(StructureKind::Conduit, TilePos::new(x, mid_y))
                .expect("conduit placement inside generated hull"),
        );
    }
    placed.push(
        engine
            .place_structure(StructureKind::LifeSupport, life_support_origin)
            .expect("life support placement inside generated hull"),
    );

    if config.prebuilt {
        for entity in placed {
            let _ = engine.world.remove_one::<UnderConstruction>(entity);
        }
    }

    // Crew on random interior floor tiles
    let mut spawned = 0;
    let mut attempts = 0;
    while spawned < config.crew && attempts < config.crew * 100 {
        attempts += 1;
        let tile = TilePos::new(
            rng.gen_range(min_x + 1..max_x),
            rng.gen_range(min_y + 1..max_y),
        );
        if engine.tilemap.is_walkable(tile) {
            engine.spawn_breather(tile);
            spawned += 1;
        }
    }
}

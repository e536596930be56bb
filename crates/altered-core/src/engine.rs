//! Simulation engine - fixed-step loop and world ownership.

use crate::components::*;
use crate::generation::{generate_colony, ColonyConfig};
use crate::systems::*;
use crate::tilemap::TileMap;
use altered_logic::grid::{GridDims, TilePos};
use altered_logic::oxygen::OxygenField;
use hecs::{Entity, World};

/// Fixed simulation step in seconds. Frame time is accumulated and consumed
/// in whole ticks, independent of render rate.
pub const TICK_SECONDS: f32 = 0.1;

/// What happened during one `advance` call.
#[derive(Debug, Default)]
pub struct TickReport {
    /// Fixed ticks actually run.
    pub ticks: u32,
    /// Hypoxia damage applied, per entity per tick.
    pub hypoxia_damage: Vec<(Entity, f32)>,
    /// Entities that died and were despawned this call. The caller owns any
    /// further bookkeeping.
    pub deaths: Vec<Entity>,
}

/// Structure placement failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    OutOfBounds(TilePos),
    Obstructed(TilePos),
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::OutOfBounds(tile) => {
                write!(f, "footprint tile ({}, {}) is outside the map", tile.x, tile.y)
            }
            PlacementError::Obstructed(tile) => {
                write!(f, "footprint tile ({}, {}) is obstructed", tile.x, tile.y)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Main simulation engine.
///
/// Owns the ECS world, the tile map, and the oxygen field. All mutation of
/// the oxygen field happens inside the fixed tick; between ticks the grid
/// state is stable for readouts.
pub struct SimulationEngine {
    /// ECS world containing all entities
    pub world: World,
    /// Ground and structure-occupancy layers
    pub tilemap: TileMap,
    /// Oxygen scalar field over the same grid
    pub oxygen: OxygenField,
    /// Simulation time in seconds since start
    sim_time: f64,
    time_scale: f32,
    accumulator: f32,
}

impl SimulationEngine {
    /// Create an empty simulation over a bare-floor map.
    pub fn new(dims: GridDims) -> Self {
        Self {
            world: World::new(),
            tilemap: TileMap::new(dims),
            oxygen: OxygenField::new(dims),
            sim_time: 0.0,
            time_scale: 1.0,
            accumulator: 0.0,
        }
    }

    /// Create and populate a colony from a config.
    pub fn from_config(config: &ColonyConfig) -> Self {
        let mut engine = Self::new(GridDims::new(config.width, config.height));
        let mut rng = rand::thread_rng();
        generate_colony(&mut engine, config, &mut rng);
        engine
    }

    /// Advance by a frame's worth of real time. Runs zero or more fixed
    /// ticks depending on the accumulator; leftover time carries over.
    pub fn advance(&mut self, frame_seconds: f32) -> TickReport {
        let mut report = TickReport::default();
        self.accumulator += frame_seconds.max(0.0) * self.time_scale;

        while self.accumulator >= TICK_SECONDS {
            self.accumulator -= TICK_SECONDS;
            self.tick(TICK_SECONDS, &mut report);
        }

        report
    }

    /// Run exactly `n` fixed ticks, ignoring the accumulator. Headless
    /// driving for tests and tools.
    pub fn run_ticks(&mut self, n: u32) -> TickReport {
        let mut report = TickReport::default();
        for _ in 0..n {
            self.tick(TICK_SECONDS, &mut report);
        }
        report
    }

    /// One fixed tick. Order matters: builds finish before power routes,
    /// power routes before life support breathes, and the dead are reaped
    /// last so every system saw them alive this tick.
    fn tick(&mut self, dt: f32, report: &mut TickReport) {
        construction_system(&mut self.world, dt);
        power_system(&mut self.world);
        let damage = oxygen_system(&mut self.world, &mut self.oxygen, &self.tilemap, dt);
        report.hypoxia_damage.extend(damage);
        hunger_system(&mut self.world, dt);
        wander_system(&mut self.world, &self.tilemap, dt);
        report.deaths.extend(reap_system(&mut self.world));

        self.sim_time += dt as f64;
        report.ticks += 1;
    }

    /// Place a structure with its footprint's top-left corner at `origin`.
    /// The structure starts under construction. Fails if any footprint tile
    /// is out of bounds or not free, leaving the world untouched.
    pub fn place_structure(
        &mut self,
        kind: StructureKind,
        origin: TilePos,
    ) -> Result<Entity, PlacementError> {
        let structure = Structure::new(kind, origin);

        for tile in structure.tiles() {
            if !self.tilemap.dims().contains(tile) {
                return Err(PlacementError::OutOfBounds(tile));
            }
            if !self.tilemap.is_walkable(tile) {
                return Err(PlacementError::Obstructed(tile));
            }
        }

        if kind.blocks_movement() {
            for tile in structure.tiles() {
                self.tilemap.set_blocked(tile, true);
            }
        }

        let progress = UnderConstruction::for_kind(kind);
        let entity = match kind {
            StructureKind::Reactor => self.world.spawn((structure, Reactor::default(), progress)),
            StructureKind::LifeSupport => {
                self.world.spawn((structure, LifeSupport::default(), progress))
            }
            StructureKind::Conduit => self.world.spawn((structure, Conduit, progress)),
        };

        Ok(entity)
    }

    /// Spawn an oxygen-breathing crew member on a tile.
    pub fn spawn_breather(&mut self, tile: TilePos) -> Entity {
        self.world.spawn((
            Position { tile },
            Breather,
            Health::default(),
            Hunger::default(),
            Wander::default(),
        ))
    }

    /// Set time scale (1.0 = real-time, 2.0 = 2x speed, etc.)
    pub fn set_time_scale(&mut self, scale: f32) {
        self.time_scale = scale.max(0.0);
    }

    pub fn time_scale(&self) -> f32 {
        self.time_scale
    }

    /// Simulation time in seconds.
    pub fn sim_time(&self) -> f64 {
        self.sim_time
    }

    /// Ship-wide mean oxygen over interior tiles, for the HUD readout.
    pub fn average_oxygen(&self) -> f32 {
        self.oxygen.average(&self.tilemap.oxygen_blocked())
    }

    /// Oxygen level at a tile, `None` out of bounds. Per-tile debug overlay
    /// hook.
    pub fn oxygen_at(&self, tile: TilePos) -> Option<f32> {
        if self.oxygen.dims().contains(tile) {
            Some(self.oxygen.level(tile))
        } else {
            None
        }
    }

    pub fn breather_count(&self) -> usize {
        self.world.query::<&Breather>().iter().count()
    }

    pub fn structure_count(&self) -> usize {
        self.world.query::<&Structure>().iter().count()
    }

    /// Save simulation state to a writer
    pub fn save<W: std::io::Write>(&self, writer: W) -> Result<(), crate::persistence::SaveError> {
        crate::persistence::save_simulation(
            writer,
            &self.world,
            self.sim_time,
            self.time_scale,
            &self.tilemap,
            &self.oxygen,
        )
    }

    /// Load simulation state from a reader
    pub fn load<R: std::io::Read>(
        &mut self,
        reader: R,
    ) -> Result<(), crate::persistence::SaveError> {
        let loaded = crate::persistence::load_simulation(reader)?;

        self.world = loaded.world;
        self.tilemap = loaded.tilemap;
        self.oxygen = loaded.oxygen;
        self.sim_time = loaded.sim_time;
        self.time_scale = loaded.time_scale;
        self.accumulator = 0.0;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_creation() {
        let engine = SimulationEngine::new(GridDims::new(8, 8));
        assert_eq!(engine.breather_count(), 0);
        assert_eq!(engine.sim_time(), 0.0);
        assert_eq!(engine.average_oxygen(), 1.0);
    }

    #[test]
    fn test_accumulator_runs_fixed_ticks() {
        let mut engine = SimulationEngine::new(GridDims::new(4, 4));

        // Half a tick of frame time: nothing runs yet
        let report = engine.advance(TICK_SECONDS * 0.5);
        assert_eq!(report.ticks, 0);

        // The second half completes one tick
        let report = engine.advance(TICK_SECONDS * 0.5);
        assert_eq!(report.ticks, 1);
        assert!((engine.sim_time() - TICK_SECONDS as f64).abs() < 1e-6);

        // A long frame runs several ticks at once
        let report = engine.advance(TICK_SECONDS * 3.0);
        assert_eq!(report.ticks, 3);
    }

    #[test]
    fn test_time_scale() {
        let mut engine = SimulationEngine::new(GridDims::new(4, 4));
        engine.set_time_scale(2.0);

        let report = engine.advance(TICK_SECONDS);
        assert_eq!(report.ticks, 2);
    }

    #[test]
    fn test_placement_validation() {
        let mut engine = SimulationEngine::new(GridDims::new(8, 8));

        let reactor = engine
            .place_structure(StructureKind::Reactor, TilePos::new(1, 1))
            .unwrap();
        assert!(engine.world.contains(reactor));
        assert!(!engine.tilemap.is_walkable(TilePos::new(1, 1)));
        assert!(!engine.tilemap.is_walkable(TilePos::new(2, 2)));

        // Overlapping footprint is rejected
        let err = engine
            .place_structure(StructureKind::LifeSupport, TilePos::new(2, 2))
            .unwrap_err();
        assert_eq!(err, PlacementError::Obstructed(TilePos::new(2, 2)));

        // Footprint hanging off the map edge is rejected
        let err = engine
            .place_structure(StructureKind::Reactor, TilePos::new(7, 7))
            .unwrap_err();
        assert_eq!(err, PlacementError::OutOfBounds(TilePos::new(8, 7)));
    }

    #[test]
    fn test_conduit_stays_walkable() {
        let mut engine = SimulationEngine::new(GridDims::new(8, 8));
        engine
            .place_structure(StructureKind::Conduit, TilePos::new(3, 3))
            .unwrap();
        assert!(engine.tilemap.is_walkable(TilePos::new(3, 3)));
    }

    #[test]
    fn test_breather_dies_without_oxygen_and_is_reported() {
        let dims = GridDims::new(2, 2);
        let mut engine = SimulationEngine::new(dims);
        for pos in dims.iter() {
            engine.oxygen.set_level(pos, 0.0);
        }
        let crew = engine.spawn_breather(TilePos::new(0, 0));

        // 5.0 damage/s against 100 health: dead within ~20 seconds
        let report = engine.run_ticks(250);
        assert!(report.deaths.contains(&crew));
        assert_eq!(engine.breather_count(), 0);
        assert!(report.hypoxia_damage.iter().any(|(e, _)| *e == crew));
    }
}

//! Save/Load functionality for persisting simulation state
//!
//! Uses bincode for efficient binary serialization of the entire simulation.
//! Components are serialized individually then reconstructed on load.
//! Derived state (powered/active flags) is not trusted from the save; the
//! power system recomputes it on the first tick after loading.

use hecs::World;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::*;
use crate::tilemap::TileMap;
use altered_logic::oxygen::OxygenField;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the simulation state
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Simulation time in seconds
    pub sim_time: f64,
    /// Time scale
    pub time_scale: f32,
    /// Ground and structure-occupancy layers
    pub tilemap: TileMap,
    /// Oxygen scalar field
    pub oxygen: OxygenField,
    /// All entities with their components
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    // Creatures
    pub position: Option<Position>,
    pub breather: Option<Breather>,
    pub health: Option<Health>,
    pub hunger: Option<Hunger>,
    pub wander: Option<Wander>,

    // Structures
    pub structure: Option<Structure>,
    pub reactor: Option<Reactor>,
    pub life_support: Option<LifeSupport>,
    pub conduit: Option<Conduit>,
    pub under_construction: Option<UnderConstruction>,
}

/// Extract all entities from a world into serializable form
fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();

    for entity in world.iter() {
        let mut se = SerializableEntity::default();

        if let Some(c) = entity.get::<&Position>() {
            se.position = Some(*c);
        }
        if let Some(c) = entity.get::<&Breather>() {
            se.breather = Some(*c);
        }
        if let Some(c) = entity.get::<&Health>() {
            se.health = Some(*c);
        }
        if let Some(c) = entity.get::<&Hunger>() {
            se.hunger = Some(*c);
        }
        if let Some(c) = entity.get::<&Wander>() {
            se.wander = Some(*c);
        }
        if let Some(c) = entity.get::<&Structure>() {
            se.structure = Some(*c);
        }
        if let Some(c) = entity.get::<&Reactor>() {
            se.reactor = Some(*c);
        }
        if let Some(c) = entity.get::<&LifeSupport>() {
            se.life_support = Some(*c);
        }
        if let Some(c) = entity.get::<&Conduit>() {
            se.conduit = Some(*c);
        }
        if let Some(c) = entity.get::<&UnderConstruction>() {
            se.under_construction = Some(*c);
        }

        entities.push(se);
    }

    entities
}

/// Rebuild a world from serialized entities
fn deserialize_entities(world: &mut World, entities: Vec<SerializableEntity>) {
    for se in entities {
        spawn_entity(world, se);
    }
}

/// Spawn an entity with all its components
fn spawn_entity(world: &mut World, se: SerializableEntity) {
    let entity = world.spawn(());

    if let Some(c) = se.position {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.breather {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.health {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.hunger {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.wander {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.structure {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.reactor {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.life_support {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.conduit {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.under_construction {
        let _ = world.insert_one(entity, c);
    }
}

/// Save the complete simulation to a writer
pub fn save_simulation<W: Write>(
    writer: W,
    world: &World,
    sim_time: f64,
    time_scale: f32,
    tilemap: &TileMap,
    oxygen: &OxygenField,
) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        sim_time,
        time_scale,
        tilemap: tilemap.clone(),
        oxygen: oxygen.clone(),
        entities: serialize_entities(world),
    };

    bincode::serialize_into(writer, &save_data)?;
    Ok(())
}

/// Load a simulation from a reader
pub fn load_simulation<R: Read>(reader: R) -> Result<LoadedSimulation, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    // Grid-shaped data must agree with its declared dimensions before
    // anything indexes into it.
    if !save_data.tilemap.layers_match_dims() {
        return Err(SaveError::Corrupt(
            "tile layer size does not match map dimensions",
        ));
    }
    if save_data.oxygen.dims() != save_data.tilemap.dims() {
        return Err(SaveError::Corrupt(
            "oxygen grid dimensions do not match the map",
        ));
    }
    if save_data.oxygen.levels().len() != save_data.oxygen.dims().area() {
        return Err(SaveError::Corrupt(
            "oxygen level count does not match grid dimensions",
        ));
    }

    let mut world = World::new();
    deserialize_entities(&mut world, save_data.entities);

    Ok(LoadedSimulation {
        world,
        sim_time: save_data.sim_time,
        time_scale: save_data.time_scale,
        tilemap: save_data.tilemap,
        oxygen: save_data.oxygen,
    })
}

/// Result of loading a simulation
pub struct LoadedSimulation {
    pub world: World,
    pub sim_time: f64,
    pub time_scale: f32,
    pub tilemap: TileMap,
    pub oxygen: OxygenField,
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
    Corrupt(&'static str),
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
            SaveError::Corrupt(detail) => write!(f, "Corrupt save: {}", detail),
        }
    }
}

impl std::error::Error for SaveError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SimulationEngine;
    use crate::generation::ColonyConfig;
    use altered_logic::grid::TilePos;

    #[test]
    fn test_save_load_roundtrip() {
        let mut engine = SimulationEngine::from_config(&ColonyConfig::default());
        engine.run_ticks(20);

        let original_time = engine.sim_time();
        let original_crew = engine.breather_count();
        let original_structures = engine.structure_count();
        let original_average = engine.average_oxygen();

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let mut loaded = SimulationEngine::new(engine.oxygen.dims());
        loaded.load(&save_buffer[..]).expect("Load failed");

        assert!((loaded.sim_time() - original_time).abs() < 1e-9);
        assert_eq!(loaded.breather_count(), original_crew);
        assert_eq!(loaded.structure_count(), original_structures);
        assert!((loaded.average_oxygen() - original_average).abs() < 1e-6);

        // The loaded world keeps simulating
        let report = loaded.run_ticks(5);
        assert_eq!(report.ticks, 5);
    }

    #[test]
    fn test_version_mismatch_rejected() {
        let engine = SimulationEngine::new(altered_logic::grid::GridDims::new(4, 4));
        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        // Corrupt the leading version field
        save_buffer[0] = 99;

        let result = load_simulation(&save_buffer[..]);
        assert!(matches!(
            result,
            Err(SaveError::VersionMismatch { found: 99, .. })
        ));
    }

    #[test]
    fn test_mismatched_layer_sizes_rejected() {
        let engine = SimulationEngine::new(altered_logic::grid::GridDims::new(4, 4));
        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        // Shrink the declared map width (first field after version, sim_time
        // and time_scale); the layer vectors keep their 4x4 sizes.
        save_buffer[16] = 3;

        let result = load_simulation(&save_buffer[..]);
        assert!(matches!(result, Err(SaveError::Corrupt(_))));
    }

    #[test]
    fn test_oxygen_levels_survive_roundtrip() {
        let mut engine = SimulationEngine::new(altered_logic::grid::GridDims::new(4, 4));
        engine.oxygen.set_level(TilePos::new(1, 2), 0.42);

        let mut save_buffer = Vec::new();
        engine.save(&mut save_buffer).expect("Save failed");

        let loaded = load_simulation(&save_buffer[..]).expect("Load failed");
        assert!((loaded.oxygen.level(TilePos::new(1, 2)) - 0.42).abs() < 1e-6);
    }
}

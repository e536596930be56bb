//! Altered Core - Colony Simulation Engine
//!
//! An ECS-based simulation of a small colony fighting for breathable air:
//! a tile map with a hull, an oxygen scalar field, reactors feeding life
//! support over conduit runs, and crew who breathe, hunger, wander, and die.
//!
//! # Architecture
//!
//! The simulation uses an Entity Component System (ECS) architecture via `hecs`:
//! - **Entities**: Crew, structures (reactors, life support, conduits)
//! - **Components**: Pure data attached to entities (Position, Health, Structure, etc.)
//! - **Systems**: Logic that queries and updates components once per fixed tick
//!
//! The numeric simulation itself (oxygen diffusion, power routing, build
//! progress, vitals) lives in `altered-logic` as plain-data functions; this
//! crate wires those into the ECS and the fixed-step loop.
//!
//! # Example
//!
//! ```rust,no_run
//! use altered_core::prelude::*;
//! use altered_core::generation::ColonyConfig;
//!
//! let mut engine = SimulationEngine::from_config(&ColonyConfig::default());
//!
//! // Run simulation
//! loop {
//!     engine.advance(1.0 / 60.0); // 60 FPS frame times, fixed ticks inside
//! }
//! ```

pub mod components;
pub mod engine;
pub mod generation;
pub mod persistence;
pub mod systems;
pub mod tilemap;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::{SimulationEngine, TickReport, TICK_SECONDS};
    pub use crate::tilemap::{TileKind, TileMap};
    pub use altered_logic::grid::{GridDims, TilePos};
}

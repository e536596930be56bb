//! Per-tile oxygen field simulation.
//!
//! The field owns one scalar per tile (0.0 = vacuum, 1.0 = full oxygen) and
//! advances once per fixed simulation tick. A tick applies consumption from
//! occupants, generation from life support, diffusion toward the 4-connected
//! neighbor average, and a clamp to [0.0, 1.0]. All effects read a snapshot
//! of the pre-tick levels, so the result is a pure function of the previous
//! full-field state plus placement, and diffusion is order-independent
//! within a tick.
//!
//! The field never touches entities. Tiles that ended the tick below the
//! critical threshold with occupants on them are reported back to the caller
//! as [`TileExposure`] records; applying the damage is the entity layer's
//! job.

use crate::grid::{GridDims, TilePos};
use serde::{Deserialize, Serialize};

/// Oxygen consumed per occupant per second.
pub const CONSUMPTION_PER_ENTITY: f32 = 0.05;
/// Oxygen generated by one life support source per second.
pub const GENERATION_PER_SOURCE: f32 = 0.2;
/// Fraction of the neighbor differential equalized per second.
pub const DIFFUSION_RATE: f32 = 0.1;
/// Level below which occupants start taking damage.
pub const CRITICAL_OXYGEN: f32 = 0.3;
/// Damage per second dealt to each occupant of a critical tile.
pub const DAMAGE_RATE: f32 = 5.0;
/// Level below which a readout should warn, above the critical threshold.
pub const LOW_OXYGEN: f32 = 0.5;

/// Readout classification of a single oxygen level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OxygenHazard {
    Normal,
    Low,
    Critical,
}

impl OxygenHazard {
    pub fn from_level(level: f32) -> Self {
        if level < CRITICAL_OXYGEN {
            Self::Critical
        } else if level < LOW_OXYGEN {
            Self::Low
        } else {
            Self::Normal
        }
    }
}

/// An occupied tile that ended the tick below the critical threshold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileExposure {
    pub tile: TilePos,
    pub occupants: u32,
    /// Damage to apply to each occupant this tick.
    pub damage: f32,
}

/// The oxygen scalar field over a fixed-size tile grid.
///
/// Levels are mutated only by [`OxygenField::step`] (and the explicit
/// [`OxygenField::set_level`] editor hook); every tile stays within
/// [0.0, 1.0] at all times.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OxygenField {
    dims: GridDims,
    levels: Vec<f32>,
    /// Pre-tick snapshot buffer, rebuilt every step.
    #[serde(skip)]
    snapshot: Vec<f32>,
}

impl OxygenField {
    /// Create a field with every tile at full oxygen.
    pub fn new(dims: GridDims) -> Self {
        Self::with_level(dims, 1.0)
    }

    /// Create a field with every tile at the given level.
    pub fn with_level(dims: GridDims, level: f32) -> Self {
        let area = dims.area();
        Self {
            dims,
            levels: vec![level.clamp(0.0, 1.0); area],
            snapshot: Vec::new(),
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Level at a tile. Panics on out-of-bounds access.
    pub fn level(&self, tile: TilePos) -> f32 {
        self.levels[self.dims.index(tile)]
    }

    /// Raw per-tile levels in row-major order.
    pub fn levels(&self) -> &[f32] {
        &self.levels
    }

    /// Force a tile to a level. Scenario setup and editor hook; simulation
    /// itself only mutates levels through [`OxygenField::step`]. Levels are
    /// meaningful in [0.0, 1.0] only — debug builds assert, release builds
    /// clamp.
    pub fn set_level(&mut self, tile: TilePos, level: f32) {
        debug_assert!(
            (0.0..=1.0).contains(&level),
            "oxygen level {level} outside [0.0, 1.0]"
        );
        let idx = self.dims.index(tile);
        self.levels[idx] = level.clamp(0.0, 1.0);
    }

    /// Mean level over unblocked tiles, for ship-wide readouts.
    pub fn average(&self, blocked: &[bool]) -> f32 {
        assert_eq!(blocked.len(), self.levels.len(), "blocked mask size mismatch");
        let mut sum = 0.0;
        let mut count = 0u32;
        for (level, b) in self.levels.iter().zip(blocked) {
            if !b {
                sum += level;
                count += 1;
            }
        }
        if count == 0 {
            0.0
        } else {
            sum / count as f32
        }
    }

    /// Advance the field one fixed tick of `dt` seconds.
    ///
    /// `occupants` counts oxygen-consuming entities per tile, `generation`
    /// is the per-tile injection rate per second (one life support source
    /// contributes [`GENERATION_PER_SOURCE`]), and `blocked` marks tiles
    /// outside the hull, which hold no oxygen and do not participate in
    /// diffusion. All three are row-major slices of the grid area; a length
    /// mismatch is a programming error and panics.
    pub fn step(
        &mut self,
        occupants: &[u32],
        generation: &[f32],
        blocked: &[bool],
        dt: f32,
    ) -> Vec<TileExposure> {
        let area = self.dims.area();
        assert_eq!(occupants.len(), area, "occupancy slice size mismatch");
        assert_eq!(generation.len(), area, "generation slice size mismatch");
        assert_eq!(blocked.len(), area, "blocked mask size mismatch");

        self.snapshot.clear();
        self.snapshot.extend_from_slice(&self.levels);

        let mut exposures = Vec::new();

        for i in 0..area {
            if blocked[i] {
                self.levels[i] = 0.0;
                continue;
            }

            let before = self.snapshot[i];
            let mut level = before;

            // Consumption and generation, from the pre-tick level
            level -= CONSUMPTION_PER_ENTITY * occupants[i] as f32 * dt;
            level += generation[i] * dt;

            // Diffusion toward the open-neighbor average of the snapshot
            let pos = self.dims.pos_of(i);
            let mut neighbor_sum = 0.0;
            let mut neighbor_count = 0u32;
            for n in pos.neighbors4() {
                if self.dims.contains(n) && !blocked[self.dims.index(n)] {
                    neighbor_sum += self.snapshot[self.dims.index(n)];
                    neighbor_count += 1;
                }
            }
            if neighbor_count > 0 {
                let neighbor_avg = neighbor_sum / neighbor_count as f32;
                level += DIFFUSION_RATE * dt * (neighbor_avg - before);
            }

            level = level.clamp(0.0, 1.0);
            self.levels[i] = level;

            if level < CRITICAL_OXYGEN && occupants[i] > 0 {
                exposures.push(TileExposure {
                    tile: pos,
                    occupants: occupants[i],
                    damage: DAMAGE_RATE * dt,
                });
            }
        }

        exposures
    }
}

//! Structure components: reactors, life support, conduits, construction.

use altered_logic::construction::{
    BuildProgress, CONDUIT_BUILD_SECONDS, LIFE_SUPPORT_BUILD_SECONDS, REACTOR_BUILD_SECONDS,
};
use altered_logic::grid::TilePos;
use altered_logic::oxygen::GENERATION_PER_SOURCE;
use altered_logic::power::{LIFE_SUPPORT_DEMAND, REACTOR_OUTPUT};
use serde::{Deserialize, Serialize};

/// Kinds of placeable structures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StructureKind {
    Reactor,
    LifeSupport,
    Conduit,
}

impl StructureKind {
    /// Footprint in tiles (width, height).
    pub fn footprint(self) -> (u32, u32) {
        match self {
            StructureKind::Reactor | StructureKind::LifeSupport => (2, 2),
            StructureKind::Conduit => (1, 1),
        }
    }

    pub fn build_seconds(self) -> f32 {
        match self {
            StructureKind::Reactor => REACTOR_BUILD_SECONDS,
            StructureKind::LifeSupport => LIFE_SUPPORT_BUILD_SECONDS,
            StructureKind::Conduit => CONDUIT_BUILD_SECONDS,
        }
    }

    /// Conduits run under foot traffic; everything else blocks the tile.
    pub fn blocks_movement(self) -> bool {
        !matches!(self, StructureKind::Conduit)
    }
}

/// Placement of a structure on the map. The footprint's top-left corner is
/// `origin`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Structure {
    pub kind: StructureKind,
    pub origin: TilePos,
    pub width: u32,
    pub height: u32,
}

impl Structure {
    pub fn new(kind: StructureKind, origin: TilePos) -> Self {
        let (width, height) = kind.footprint();
        Self {
            kind,
            origin,
            width,
            height,
        }
    }

    /// All tiles the footprint covers, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = TilePos> + '_ {
        let origin = self.origin;
        let width = self.width as i32;
        (0..self.height as i32)
            .flat_map(move |dy| (0..width).map(move |dx| TilePos::new(origin.x + dx, origin.y + dy)))
    }
}

/// Power source.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Reactor {
    pub output: f32,
}

impl Default for Reactor {
    fn default() -> Self {
        Self {
            output: REACTOR_OUTPUT,
        }
    }
}

/// Oxygen generator; needs power from a reactor to run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LifeSupport {
    /// Oxygen injected per footprint tile per second while active.
    pub generation_rate: f32,
    /// Power demanded from the network.
    pub demand: f32,
    /// Set by the power system each tick.
    pub powered: bool,
    /// Whether it generated oxygen last tick.
    pub active: bool,
}

impl Default for LifeSupport {
    fn default() -> Self {
        Self {
            generation_rate: GENERATION_PER_SOURCE,
            demand: LIFE_SUPPORT_DEMAND,
            powered: false,
            active: false,
        }
    }
}

/// Marker component for power-carrying conduit tiles.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Conduit;

/// Present while a structure is being built; removed on completion.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnderConstruction {
    pub progress: BuildProgress,
}

impl UnderConstruction {
    pub fn for_kind(kind: StructureKind) -> Self {
        Self {
            progress: BuildProgress::new(kind.build_seconds()),
        }
    }
}

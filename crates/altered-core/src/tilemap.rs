//! Tile map: ground layer plus a structure-occupancy layer.
//!
//! `Barrier` tiles are the space outside the hull; they hold no oxygen and
//! are excluded from diffusion. Everything else (including walls) counts as
//! interior. Walkability is the ground kind minus any structure footprint.

use altered_logic::grid::{GridDims, TilePos};
use serde::{Deserialize, Serialize};

/// Ground tile variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileKind {
    Floor,
    Grass,
    Dirt,
    Wall,
    Barrier,
}

impl TileKind {
    pub fn walkable(self) -> bool {
        !matches!(self, TileKind::Wall | TileKind::Barrier)
    }

    /// Whether the tile is inside the hull and participates in the oxygen
    /// simulation.
    pub fn is_interior(self) -> bool {
        !matches!(self, TileKind::Barrier)
    }
}

/// Fixed-size tile map. Dimensions are set at creation and never change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileMap {
    dims: GridDims,
    ground: Vec<TileKind>,
    /// Tiles occupied by a structure footprint.
    blocked: Vec<bool>,
}

impl TileMap {
    /// A map of bare floor.
    pub fn new(dims: GridDims) -> Self {
        Self::filled(dims, TileKind::Floor)
    }

    pub fn filled(dims: GridDims, kind: TileKind) -> Self {
        let area = dims.area();
        Self {
            dims,
            ground: vec![kind; area],
            blocked: vec![false; area],
        }
    }

    pub fn dims(&self) -> GridDims {
        self.dims
    }

    /// Ground kind at a tile, `None` out of bounds.
    pub fn kind(&self, pos: TilePos) -> Option<TileKind> {
        if self.dims.contains(pos) {
            Some(self.ground[self.dims.index(pos)])
        } else {
            None
        }
    }

    /// Set the ground kind. Out-of-bounds writes are ignored.
    pub fn set_kind(&mut self, pos: TilePos, kind: TileKind) {
        if self.dims.contains(pos) {
            let idx = self.dims.index(pos);
            self.ground[idx] = kind;
        }
    }

    /// Mark or clear a structure footprint tile. Out-of-bounds writes are
    /// ignored.
    pub fn set_blocked(&mut self, pos: TilePos, blocked: bool) {
        if self.dims.contains(pos) {
            let idx = self.dims.index(pos);
            self.blocked[idx] = blocked;
        }
    }

    pub fn is_blocked(&self, pos: TilePos) -> bool {
        self.dims.contains(pos) && self.blocked[self.dims.index(pos)]
    }

    /// Whether an entity can stand on this tile.
    pub fn is_walkable(&self, pos: TilePos) -> bool {
        match self.kind(pos) {
            Some(kind) => kind.walkable() && !self.blocked[self.dims.index(pos)],
            None => false,
        }
    }

    /// Whether the tile is inside the hull (false out of bounds).
    pub fn is_interior(&self, pos: TilePos) -> bool {
        self.kind(pos).is_some_and(TileKind::is_interior)
    }

    /// Row-major mask of tiles that hold no oxygen, for the field step.
    pub fn oxygen_blocked(&self) -> Vec<bool> {
        self.ground.iter().map(|kind| !kind.is_interior()).collect()
    }

    /// Whether the layer vectors match the declared dimensions. Maps built
    /// through the constructors always do; deserialized ones may not.
    pub fn layers_match_dims(&self) -> bool {
        self.ground.len() == self.dims.area() && self.blocked.len() == self.dims.area()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walkability() {
        let mut map = TileMap::new(GridDims::new(4, 4));
        assert!(map.is_walkable(TilePos::new(1, 1)));

        map.set_kind(TilePos::new(1, 1), TileKind::Wall);
        assert!(!map.is_walkable(TilePos::new(1, 1)));

        map.set_blocked(TilePos::new(2, 2), true);
        assert!(!map.is_walkable(TilePos::new(2, 2)));
        map.set_blocked(TilePos::new(2, 2), false);
        assert!(map.is_walkable(TilePos::new(2, 2)));

        assert!(!map.is_walkable(TilePos::new(-1, 0)));
        assert!(!map.is_walkable(TilePos::new(4, 0)));
    }

    #[test]
    fn test_out_of_bounds_writes_ignored() {
        let mut map = TileMap::new(GridDims::new(2, 2));
        map.set_kind(TilePos::new(5, 5), TileKind::Wall);
        map.set_blocked(TilePos::new(-1, -1), true);
        assert_eq!(map.kind(TilePos::new(5, 5)), None);
        assert!(!map.is_blocked(TilePos::new(-1, -1)));
    }

    #[test]
    fn test_oxygen_mask_excludes_only_barrier() {
        let mut map = TileMap::new(GridDims::new(2, 1));
        map.set_kind(TilePos::new(0, 0), TileKind::Wall);
        map.set_kind(TilePos::new(1, 0), TileKind::Barrier);
        assert_eq!(map.oxygen_blocked(), vec![false, true]);
    }
}

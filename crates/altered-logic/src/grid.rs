//! Tile grid primitives shared by every simulation layer.

use serde::{Deserialize, Serialize};

/// Integer tile coordinate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The four edge-adjacent neighbors. May be out of bounds — callers
    /// filter with [`GridDims::contains`].
    pub fn neighbors4(self) -> [TilePos; 4] {
        [
            TilePos::new(self.x, self.y - 1),
            TilePos::new(self.x, self.y + 1),
            TilePos::new(self.x - 1, self.y),
            TilePos::new(self.x + 1, self.y),
        ]
    }

    /// Manhattan distance to another tile.
    pub fn manhattan(self, other: TilePos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

/// Fixed grid dimensions, set once at map creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub width: u32,
    pub height: u32,
}

impl GridDims {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    /// Row-major index of a tile.
    ///
    /// Panics on out-of-bounds coordinates: an unchecked out-of-bounds tile
    /// access is a programming error, not a recoverable condition.
    pub fn index(self, pos: TilePos) -> usize {
        assert!(
            self.contains(pos),
            "tile ({}, {}) outside {}x{} grid",
            pos.x,
            pos.y,
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    /// Inverse of [`GridDims::index`].
    pub fn pos_of(self, index: usize) -> TilePos {
        let w = self.width as usize;
        TilePos::new((index % w) as i32, (index / w) as i32)
    }

    /// Iterate all tile positions in row-major order.
    pub fn iter(self) -> impl Iterator<Item = TilePos> {
        let w = self.width as i32;
        let h = self.height as i32;
        (0..h).flat_map(move |y| (0..w).map(move |x| TilePos::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_roundtrip() {
        let dims = GridDims::new(10, 8);
        for pos in dims.iter() {
            assert_eq!(dims.pos_of(dims.index(pos)), pos);
        }
    }

    #[test]
    fn test_contains() {
        let dims = GridDims::new(4, 3);
        assert!(dims.contains(TilePos::new(0, 0)));
        assert!(dims.contains(TilePos::new(3, 2)));
        assert!(!dims.contains(TilePos::new(4, 0)));
        assert!(!dims.contains(TilePos::new(0, 3)));
        assert!(!dims.contains(TilePos::new(-1, 1)));
    }

    #[test]
    #[should_panic(expected = "outside")]
    fn test_out_of_bounds_index_panics() {
        GridDims::new(4, 4).index(TilePos::new(4, 0));
    }

    #[test]
    fn test_neighbors4() {
        let n = TilePos::new(2, 2).neighbors4();
        assert_eq!(n.len(), 4);
        for p in n {
            assert_eq!(p.manhattan(TilePos::new(2, 2)), 1);
        }
    }
}

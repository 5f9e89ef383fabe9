//! Uniform grid used to localise proximity checks.
//!
//! Every cell in the world's range, plus a one-cell halo, is allocated up
//! front in a dense row-major table. Cells are emptied between ticks but never
//! removed, so a lookup for an in-range key always succeeds. Each insert fans
//! the entity out into the 3x3 block around its own cell, which guarantees that
//! any two overlapping entities share at least one bucket.

use hecs::Entity;

use contagion_core::constants::GRID_MARGIN_CELLS;
use contagion_core::types::{Position, WorldBounds};

/// Integer grid-cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellKey {
    pub x: i32,
    pub y: i32,
}

impl CellKey {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The key itself and its 8 edge and corner neighbours.
    pub fn neighborhood(self) -> impl Iterator<Item = CellKey> {
        (-1..=1).flat_map(move |dy| (-1..=1).map(move |dx| CellKey::new(self.x + dx, self.y + dy)))
    }
}

/// Dense grid of entity buckets, rebuilt every tick.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    cell_size: f64,
    /// Lowest key in the allocated range (halo included).
    min: CellKey,
    /// Highest key in the allocated range (halo included).
    max: CellKey,
    cols: usize,
    cells: Vec<Vec<Entity>>,
}

impl SpatialIndex {
    /// Build an index covering `bounds`.
    ///
    /// The cell side is `ceil(width / cell_divisions)`, raised if needed so
    /// it always exceeds the entity diameter.
    pub fn new(bounds: &WorldBounds, cell_divisions: u32, radius: f64) -> Self {
        let target = (bounds.width() / f64::from(cell_divisions.max(1))).ceil();
        let above_diameter = (2.0 * radius).floor() + 1.0;
        let cell_size = target.max(above_diameter);

        let min = CellKey::new(
            (bounds.min_x / cell_size).floor() as i32 - GRID_MARGIN_CELLS,
            (bounds.min_y / cell_size).floor() as i32 - GRID_MARGIN_CELLS,
        );
        let max = CellKey::new(
            (bounds.max_x / cell_size).floor() as i32 + GRID_MARGIN_CELLS,
            (bounds.max_y / cell_size).floor() as i32 + GRID_MARGIN_CELLS,
        );
        let cols = (max.x - min.x + 1) as usize;
        let rows = (max.y - min.y + 1) as usize;

        Self {
            cell_size,
            min,
            max,
            cols,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    /// Side length of one cell in world units.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// Number of allocated cells, halo included.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cell containing `pos`.
    pub fn cell_key_for(&self, pos: &Position) -> CellKey {
        CellKey::new(
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    pub fn contains_key(&self, key: CellKey) -> bool {
        (self.min.x..=self.max.x).contains(&key.x) && (self.min.y..=self.max.y).contains(&key.y)
    }

    /// Every allocated key, row by row.
    pub fn keys(&self) -> impl Iterator<Item = CellKey> + '_ {
        (self.min.y..=self.max.y)
            .flat_map(move |y| (self.min.x..=self.max.x).map(move |x| CellKey::new(x, y)))
    }

    /// Empty every bucket in place. Keys and allocations are kept.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    /// Append `entity` to the 9 buckets centred on `key`.
    ///
    /// Panics if any of those cells lies outside the allocated range; that
    /// means an entity escaped the world far enough to break the halo.
    pub fn insert(&mut self, key: CellKey, entity: Entity) {
        for cell in key.neighborhood() {
            let slot = self.slot(cell);
            self.cells[slot].push(entity);
        }
    }

    /// Entities resident in one cell, in insertion order.
    pub fn bucket(&self, key: CellKey) -> &[Entity] {
        &self.cells[self.slot(key)]
    }

    /// All buckets, empty ones included.
    pub fn buckets(&self) -> impl Iterator<Item = &[Entity]> + '_ {
        self.cells.iter().map(Vec::as_slice)
    }

    fn slot(&self, key: CellKey) -> usize {
        assert!(
            self.contains_key(key),
            "cell {key:?} outside spatial index range {:?}..={:?}",
            self.min,
            self.max
        );
        (key.y - self.min.y) as usize * self.cols + (key.x - self.min.x) as usize
    }
}

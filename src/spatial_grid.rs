/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct used by the grid neighbor scan.
 * It divides the world into square cells at least as large as the furthest
 * view range, so every boid within range of a position sits in the 3x3 block
 * of cells around it.
 *
 * The flock keeps the grid current during a tick by relocating each boid
 * right after it moves, which preserves the in-order update semantics.
 */

use glam::Vec2;

use crate::boundary::Boundary;

// Upper bound on the number of cells; larger worlds get coarser cells
pub const MAX_CELLS: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub cell_size: f32,
    pub columns: usize,
    pub rows: usize,
    grid: Vec<Vec<usize>>,
}

impl SpatialGrid {
    // Cells are never smaller than `cell_size`, but grow as needed to keep
    // the grid within MAX_CELLS
    pub fn new(cell_size: f32, boundary: &Boundary) -> Self {
        let mut cell_size = cell_size.max(f32::MIN_POSITIVE);
        let (mut columns, mut rows) = Self::dimensions(cell_size, boundary);
        while columns * rows > MAX_CELLS as f64 {
            cell_size *= 2.0;
            (columns, rows) = Self::dimensions(cell_size, boundary);
        }

        let (columns, rows) = (columns as usize, rows as usize);
        Self {
            cell_size,
            columns,
            rows,
            grid: vec![Vec::new(); columns * rows],
        }
    }

    // Column and row counts covering the boundary, at least one each
    fn dimensions(cell_size: f32, boundary: &Boundary) -> (f64, f64) {
        let count = |extent: f32| (f64::from(extent.min(f32::MAX)) / f64::from(cell_size)).ceil().max(1.0);
        (count(boundary.width), count(boundary.height))
    }

    // Build a grid holding every position under its roster index
    pub fn from_positions<I>(cell_size: f32, boundary: &Boundary, positions: I) -> Self
    where
        I: IntoIterator<Item = Vec2>,
    {
        let mut grid = Self::new(cell_size, boundary);
        for (index, position) in positions.into_iter().enumerate() {
            grid.insert(index, position);
        }
        grid
    }

    // Column and row of the cell containing a position, clamped to the grid
    #[inline]
    fn cell_coords(&self, position: Vec2) -> (usize, usize) {
        let column = (position.x / self.cell_size).floor().clamp(0.0, (self.columns - 1) as f32);
        let row = (position.y / self.cell_size).floor().clamp(0.0, (self.rows - 1) as f32);
        (column as usize, row as usize)
    }

    #[inline]
    fn cell_index(&self, position: Vec2) -> usize {
        let (column, row) = self.cell_coords(position);
        row * self.columns + column
    }

    #[inline]
    pub fn insert(&mut self, index: usize, position: Vec2) {
        let cell = self.cell_index(position);
        self.grid[cell].push(index);
    }

    // Move an entry after its boid changed position
    pub fn relocate(&mut self, index: usize, from: Vec2, to: Vec2) {
        let old_cell = self.cell_index(from);
        let new_cell = self.cell_index(to);
        if old_cell == new_cell {
            return;
        }

        let cell = &mut self.grid[old_cell];
        if let Some(slot) = cell.iter().position(|&i| i == index) {
            cell.swap_remove(slot);
        }
        self.grid[new_cell].push(index);
    }

    // Indices in the cell containing the position and its eight neighbours,
    // ascending so callers see them in roster order
    pub fn nearby_indices(&self, position: Vec2) -> Vec<usize> {
        let (column, row) = self.cell_coords(position);
        let mut result = Vec::new();

        for check_row in row.saturating_sub(1)..=(row + 1).min(self.rows - 1) {
            let row_start = check_row * self.columns;
            for check_column in column.saturating_sub(1)..=(column + 1).min(self.columns - 1) {
                result.extend_from_slice(&self.grid[row_start + check_column]);
            }
        }

        result.sort_unstable();
        result
    }

    pub fn len(&self) -> usize {
        self.grid.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.iter().all(Vec::is_empty)
    }
}

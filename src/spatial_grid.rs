/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for neighbour lookups. The world
 * is divided into `columns x rows` cells and every boid handle lives in the
 * bucket of the cell containing its position. A neighbour query only visits
 * the buckets of cells near the boid's own cell, so its cost follows local
 * occupancy instead of the whole population.
 *
 * Invariant: each live boid is in exactly one bucket between ticks.
 */

use slotmap::SlotMap;

use crate::boid::{Boid, BoidId};
use crate::error::{SimError, SimResult};
use crate::vector::Vector2;

pub type Cell = (usize, usize);

#[derive(Debug, Clone)]
pub struct SpatialGrid {
    pub cell_size: Vector2,
    columns: usize,
    rows: usize,
    // Column-major: the bucket of (cx, cy) is at cx * rows + cy
    buckets: Vec<Vec<BoidId>>,
}

impl SpatialGrid {
    pub fn new(world_size: Vector2, cell_size: Vector2) -> Self {
        let columns = ((world_size.x / cell_size.x).ceil() as usize).max(1);
        let rows = ((world_size.y / cell_size.y).ceil() as usize).max(1);

        Self {
            cell_size,
            columns,
            rows,
            buckets: vec![Vec::new(); columns * rows],
        }
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    fn index(&self, (cx, cy): Cell) -> usize {
        cx * self.rows + cy
    }

    // Convert world coordinates to a cell, clamping anything out of range
    #[inline]
    pub fn cell_of(&self, position: Vector2) -> Cell {
        let cx = (position.x / self.cell_size.x).floor();
        let cy = (position.y / self.cell_size.y).floor();

        // NaN casts to 0, negatives saturate to 0
        let cx = (cx as usize).min(self.columns - 1);
        let cy = (cy as usize).min(self.rows - 1);
        (cx, cy)
    }

    pub fn bucket(&self, cell: Cell) -> &[BoidId] {
        &self.buckets[self.index(cell)]
    }

    pub fn insert(&mut self, id: BoidId, position: Vector2) -> Cell {
        let cell = self.cell_of(position);
        let index = self.index(cell);
        self.buckets[index].push(id);
        cell
    }

    // Move a handle between buckets; a move within one cell is a no-op
    pub fn move_agent(&mut self, id: BoidId, old_cell: Cell, new_cell: Cell) -> SimResult<()> {
        if old_cell == new_cell {
            return Ok(());
        }

        let old_index = self.index(old_cell);
        let bucket = &mut self.buckets[old_index];
        let slot = bucket
            .iter()
            .position(|&other| other == id)
            .ok_or(SimError::NotInBucket { id, cell: old_cell })?;
        bucket.swap_remove(slot);

        let new_index = self.index(new_cell);
        self.buckets[new_index].push(id);
        Ok(())
    }

    /// Cells whose cell-space distance to `cell` is at most `radius`, visited
    /// column by column.
    pub fn neighbors_within_cell_radius(&self, cell: Cell, radius: f32) -> Vec<Cell> {
        // No cell lies further than the larger grid dimension
        let reach = (radius.max(0.0).floor() as usize).min(self.columns.max(self.rows));
        let (cx, cy) = cell;
        let radius_sq = radius * radius;

        let x_range = cx.saturating_sub(reach)..=(cx + reach).min(self.columns - 1);
        let y_range = cy.saturating_sub(reach)..=(cy + reach).min(self.rows - 1);

        let mut cells = Vec::with_capacity(x_range.clone().count() * y_range.clone().count());
        for x in x_range {
            for y in y_range.clone() {
                let dx = x as f32 - cx as f32;
                let dy = y as f32 - cy as f32;
                if dx * dx + dy * dy <= radius_sq {
                    cells.push((x, y));
                }
            }
        }
        cells
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Check that every boid in `boids` sits in exactly one bucket and that no
    /// bucket holds an unknown handle.
    pub fn is_consistent_with(&self, boids: &SlotMap<BoidId, Boid>) -> bool {
        let mut seen = slotmap::SecondaryMap::with_capacity(boids.len());
        for id in self.buckets.iter().flatten() {
            if !boids.contains_key(*id) || seen.insert(*id, ()).is_some() {
                return false;
            }
        }
        seen.len() == boids.len()
    }
}

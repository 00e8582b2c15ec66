/*
 * Roster Module
 *
 * The roster is the flock as seen by one boid while it moves: every other
 * boid in roster order, the world boundary and the neighbor scan policy.
 * The moving boid itself is split off so it can be mutated while the rest
 * of the flock is read, which makes updates from boids earlier in the same
 * tick visible to later ones.
 */

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use crate::boid::Boid;
use crate::boundary::Boundary;
use crate::spatial_grid::SpatialGrid;

// Which roster entries a boid considers when looking for neighbors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeighborScan {
    // First `len - len / 2` entries in roster order. This is the reference
    // behavior and gives asymmetric, order-dependent neighbor sets.
    #[default]
    Prefix,
    // Every entry
    Full,
    // Entries near the boid according to a spatial grid. Same neighbors as Full.
    Grid,
}

impl NeighborScan {
    pub const ALL: [NeighborScan; 3] = [NeighborScan::Prefix, NeighborScan::Full, NeighborScan::Grid];

    pub fn name(self) -> &'static str {
        match self {
            NeighborScan::Prefix => "prefix",
            NeighborScan::Full => "full",
            NeighborScan::Grid => "grid",
        }
    }
}

impl fmt::Display for NeighborScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NeighborScan {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NeighborScan::ALL
            .into_iter()
            .find(|scan| scan.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("unknown neighbor scan {s:?}, expected prefix, full or grid"))
    }
}

// Runtime state behind a NeighborScan, owned by the flock
#[derive(Debug, Clone)]
pub enum NeighborIndex {
    Prefix,
    Full,
    Grid(SpatialGrid),
}

impl NeighborIndex {
    pub fn build(scan: NeighborScan, boids: &[Boid], boundary: &Boundary) -> Self {
        match scan {
            NeighborScan::Prefix => NeighborIndex::Prefix,
            NeighborScan::Full => NeighborIndex::Full,
            NeighborScan::Grid => {
                // Cells must cover the furthest view range of any boid
                let cell_size = boids
                    .iter()
                    .map(|boid| boid.rules().max_view_range())
                    .fold(1.0_f32, f32::max);
                NeighborIndex::Grid(SpatialGrid::from_positions(
                    cell_size,
                    boundary,
                    boids.iter().map(Boid::position),
                ))
            }
        }
    }

    pub fn scan(&self) -> NeighborScan {
        match self {
            NeighborIndex::Prefix => NeighborScan::Prefix,
            NeighborIndex::Full => NeighborScan::Full,
            NeighborIndex::Grid(_) => NeighborScan::Grid,
        }
    }

    // Keep the index in step with a boid that just moved
    pub fn relocate(&mut self, index: usize, from: Vec2, to: Vec2) {
        if let NeighborIndex::Grid(grid) = self {
            grid.relocate(index, from, to);
        }
    }
}

// Roster indices a boid should test for neighborhood
pub enum Candidates {
    Range(Range<usize>),
    Listed(std::vec::IntoIter<usize>),
}

impl Iterator for Candidates {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match self {
            Candidates::Range(range) => range.next(),
            Candidates::Listed(indices) => indices.next(),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Roster<'a> {
    index: usize,
    before: &'a [Boid],
    after: &'a [Boid],
    boundary: &'a Boundary,
    neighbor_index: &'a NeighborIndex,
}

impl<'a> Roster<'a> {
    // `before` and `after` are the boids on either side of the moving boid at `before.len()`
    pub fn new(
        before: &'a [Boid],
        after: &'a [Boid],
        boundary: &'a Boundary,
        neighbor_index: &'a NeighborIndex,
    ) -> Self {
        Self {
            index: before.len(),
            before,
            after,
            boundary,
            neighbor_index,
        }
    }

    // Roster seen by the boid at `index` of an unsplit flock
    pub fn around(
        boids: &'a [Boid],
        index: usize,
        boundary: &'a Boundary,
        neighbor_index: &'a NeighborIndex,
    ) -> Self {
        let index = index.min(boids.len());
        let after = boids.get(index + 1..).unwrap_or(&[]);
        Self::new(&boids[..index], after, boundary, neighbor_index)
    }

    // Size of the whole roster, the moving boid included
    pub fn len(&self) -> usize {
        self.before.len() + 1 + self.after.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    // Position of the moving boid in the roster
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn boundary(&self) -> &'a Boundary {
        self.boundary
    }

    // Another boid by roster index. The moving boid's own slot is None.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&'a Boid> {
        if index < self.index {
            self.before.get(index)
        } else if index == self.index {
            None
        } else {
            self.after.get(index - self.index - 1)
        }
    }

    pub fn candidates(&self, position: Vec2) -> Candidates {
        let len = self.len();
        match self.neighbor_index {
            NeighborIndex::Prefix => Candidates::Range(0..len - len / 2),
            NeighborIndex::Full => Candidates::Range(0..len),
            NeighborIndex::Grid(grid) => Candidates::Listed(grid.nearby_indices(position).into_iter()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BoidRules;

    fn boid_at(id: usize, x: f32, y: f32) -> Boid {
        Boid::with_state(id, 1.0, Vec2::new(x, y), Vec2::ZERO, BoidRules::default())
    }

    #[test]
    fn parses_scan_names() {
        assert_eq!("grid".parse::<NeighborScan>().unwrap(), NeighborScan::Grid);
        assert_eq!("FULL".parse::<NeighborScan>().unwrap(), NeighborScan::Full);
        assert!("quadtree".parse::<NeighborScan>().is_err());
        assert_eq!(NeighborScan::default().to_string(), "prefix");
    }

    #[test]
    fn get_skips_moving_boid() {
        let boids: Vec<Boid> = (0..4).map(|id| boid_at(id, id as f32, 0.0)).collect();
        let boundary = Boundary::new(100.0, 100.0);
        let index = NeighborIndex::Full;
        let roster = Roster::around(&boids, 1, &boundary, &index);

        assert_eq!(roster.len(), 4);
        assert_eq!(roster.index(), 1);
        assert_eq!(roster.get(0).map(Boid::id), Some(0));
        assert!(roster.get(1).is_none());
        assert_eq!(roster.get(2).map(Boid::id), Some(2));
        assert_eq!(roster.get(3).map(Boid::id), Some(3));
        assert!(roster.get(4).is_none());
    }

    #[test]
    fn prefix_scans_first_half_rounded_up() {
        let boundary = Boundary::new(100.0, 100.0);
        let index = NeighborIndex::Prefix;
        for (len, expected) in [(1, 1), (2, 1), (5, 3), (1000, 500)] {
            let boids: Vec<Boid> = (0..len).map(|id| boid_at(id, 0.0, 0.0)).collect();
            let roster = Roster::around(&boids, 0, &boundary, &index);
            assert_eq!(roster.candidates(Vec2::ZERO).count(), expected, "len {len}");
        }
    }

    #[test]
    fn grid_candidates_are_sorted_and_local() {
        let boundary = Boundary::new(500.0, 500.0);
        let boids = vec![
            boid_at(0, 10.0, 10.0),
            boid_at(1, 400.0, 400.0),
            boid_at(2, 30.0, 20.0),
        ];
        let index = NeighborIndex::build(NeighborScan::Grid, &boids, &boundary);
        let roster = Roster::around(&boids, 2, &boundary, &index);

        let candidates: Vec<usize> = roster.candidates(boids[2].position()).collect();
        assert_eq!(candidates, vec![0, 2]);
        assert_eq!(index.scan(), NeighborScan::Grid);
    }
}

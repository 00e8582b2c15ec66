/*
 * Flock Module
 *
 * The flock owns every boid, the world boundary, the neighbor index and the
 * random generator. A tick moves the boids one after another in roster
 * order, in place: a boid moving later in the tick already sees the new
 * position and heading of the boids that moved before it.
 */

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use std::ops::RangeInclusive;

use crate::boid::Boid;
use crate::boundary::Boundary;
use crate::params::{BoidRules, SimulationParams};
use crate::roster::{NeighborIndex, NeighborScan, Roster};

pub struct Flock {
    boids: Vec<Boid>,
    boundary: Boundary,
    neighbor_index: NeighborIndex,
    rng: ChaCha12Rng,
    ticks: u64,
}

// Aggregate view of the flock, used for logging and the control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlockSummary {
    pub boids: usize,
    // Boids that have started moving
    pub moving: usize,
    // Length of the mean unit heading of moving boids, from 0 (disordered) to 1 (aligned)
    pub polarization: f32,
    pub mean_neighbors: f32,
    pub centroid: Vec2,
}

// Generator for a run, reproducible when a seed is given
pub fn make_rng(seed: Option<u64>) -> ChaCha12Rng {
    match seed {
        Some(seed) => ChaCha12Rng::seed_from_u64(seed),
        None => ChaCha12Rng::from_entropy(),
    }
}

impl Flock {
    // Create `count` boids with ids 0..count, each placed and sped up at random
    pub fn create(
        count: usize,
        speed_range: RangeInclusive<u32>,
        boundary: Boundary,
        rules: BoidRules,
        scan: NeighborScan,
        mut rng: ChaCha12Rng,
    ) -> Self {
        let boids: Vec<Boid> = (0..count)
            .map(|id| Boid::new(id, speed_range.clone(), &boundary, rules, &mut rng))
            .collect();

        log::debug!(
            "created flock of {count} boids, speeds {speed_range:?}, boundary {}x{}, {scan} scan",
            boundary.width,
            boundary.height
        );

        Self::from_boids(boids, boundary, scan, rng)
    }

    pub fn from_params(params: &SimulationParams, rng: ChaCha12Rng) -> Self {
        Self::create(
            params.num_boids,
            params.speed_range(),
            params.boundary,
            params.rules,
            params.neighbor_scan,
            rng,
        )
    }

    // Build a flock around boids that already exist. Roster order is slice order.
    pub fn from_boids(boids: Vec<Boid>, boundary: Boundary, scan: NeighborScan, rng: ChaCha12Rng) -> Self {
        let neighbor_index = NeighborIndex::build(scan, &boids, &boundary);
        Self {
            boids,
            boundary,
            neighbor_index,
            rng,
            ticks: 0,
        }
    }

    pub fn boids(&self) -> &[Boid] {
        &self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn boundary(&self) -> &Boundary {
        &self.boundary
    }

    pub fn neighbor_scan(&self) -> NeighborScan {
        self.neighbor_index.scan()
    }

    // Completed ticks since creation
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_neighbor_scan(&mut self, scan: NeighborScan) {
        if scan == self.neighbor_scan() {
            return;
        }
        log::info!("switching neighbor scan from {} to {scan}", self.neighbor_scan());
        self.neighbor_index = NeighborIndex::build(scan, &self.boids, &self.boundary);
    }

    // The roster the boid at `index` would see if it moved now
    pub fn roster_for(&self, index: usize) -> Roster<'_> {
        Roster::around(&self.boids, index, &self.boundary, &self.neighbor_index)
    }

    // Move every boid once, in roster order, without snapshotting.
    // An empty flock is left untouched.
    pub fn tick(&mut self) {
        if self.boids.is_empty() {
            return;
        }

        for index in 0..self.boids.len() {
            let (before, rest) = self.boids.split_at_mut(index);
            let Some((boid, after)) = rest.split_first_mut() else {
                break;
            };

            let from = boid.position();
            let roster = Roster::new(before, after, &self.boundary, &self.neighbor_index);
            boid.advance(&roster, &mut self.rng);
            let to = boid.position();

            self.neighbor_index.relocate(index, from, to);
        }

        self.ticks += 1;
    }

    pub fn summary(&self) -> FlockSummary {
        let mut heading_sum = Vec2::ZERO;
        let mut position_sum = Vec2::ZERO;
        let mut neighbor_sum = 0usize;
        let mut moving = 0usize;

        for boid in &self.boids {
            position_sum += boid.position();
            neighbor_sum += boid.neighbors().len();
            if boid.direction() != Vec2::ZERO {
                heading_sum += boid.direction().normalize();
                moving += 1;
            }
        }

        let count = self.boids.len();
        let per_boid = |total: f32| if count > 0 { total / count as f32 } else { 0.0 };

        FlockSummary {
            boids: count,
            moving,
            polarization: if moving > 0 { heading_sum.length() / moving as f32 } else { 0.0 },
            mean_neighbors: per_boid(neighbor_sum as f32),
            centroid: if count > 0 { position_sum / count as f32 } else { Vec2::ZERO },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(seed: u64) -> ChaCha12Rng {
        ChaCha12Rng::seed_from_u64(seed)
    }

    #[test]
    fn create_assigns_sequential_ids() {
        let flock = Flock::create(
            25,
            3..=6,
            Boundary::new(300.0, 200.0),
            BoidRules::default(),
            NeighborScan::Prefix,
            seeded(1),
        );

        assert_eq!(flock.len(), 25);
        for (index, boid) in flock.boids().iter().enumerate() {
            assert_eq!(boid.id(), index);
        }
        assert_eq!(flock.ticks(), 0);
    }

    #[test]
    fn empty_flock_ticks_without_boids() {
        let mut flock = Flock::from_params(
            &SimulationParams {
                num_boids: 0,
                ..SimulationParams::default()
            },
            seeded(2),
        );

        flock.tick();

        assert!(flock.is_empty());
        assert!(flock.boids().is_empty());
        assert_eq!(flock.ticks(), 0);
        assert_eq!(flock.summary().polarization, 0.0);
        assert_eq!(flock.summary().centroid, Vec2::ZERO);
    }

    #[test]
    fn first_tick_starts_every_boid() {
        let mut flock = Flock::from_params(&SimulationParams::default(), seeded(3));
        assert_eq!(flock.summary().moving, 0);

        flock.tick();

        let summary = flock.summary();
        assert_eq!(summary.moving, flock.len());
        assert_eq!(summary.mean_neighbors, 0.0);
    }

    #[test]
    fn set_neighbor_scan_rebuilds_index() {
        let mut flock = Flock::from_params(&SimulationParams::default(), seeded(4));
        flock.set_neighbor_scan(NeighborScan::Grid);
        assert_eq!(flock.neighbor_scan(), NeighborScan::Grid);
        flock.tick();
        flock.set_neighbor_scan(NeighborScan::Full);
        assert_eq!(flock.neighbor_scan(), NeighborScan::Full);
    }

    #[test]
    fn roster_for_excludes_the_boid() {
        let flock = Flock::from_params(
            &SimulationParams {
                num_boids: 3,
                ..SimulationParams::default()
            },
            seeded(5),
        );
        let roster = flock.roster_for(2);
        assert_eq!(roster.len(), 3);
        assert!(roster.get(2).is_none());
        assert_eq!(roster.get(1).map(Boid::id), Some(1));
    }

    #[test]
    fn polarization_of_aligned_flock_is_one() {
        let boids = (0..4)
            .map(|id| {
                Boid::with_state(
                    id,
                    2.0,
                    Vec2::new(id as f32 * 100.0, 50.0),
                    Vec2::new(0.0, 2.0),
                    BoidRules::default(),
                )
            })
            .collect();
        let flock = Flock::from_boids(boids, Boundary::new(500.0, 100.0), NeighborScan::Full, seeded(6));

        let summary = flock.summary();
        assert!((summary.polarization - 1.0).abs() < 1e-6);
        assert_eq!(summary.centroid, Vec2::new(150.0, 50.0));
    }
}

/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each boid follows three rules against the neighbors it can see:
 * 1. Alignment: Steer towards the average heading of neighbors
 * 2. Cohesion: Steer towards the average position of neighbors
 * 3. Separation: Steer away from the average position of close neighbors
 *
 * A boid only ever mutates itself. Other boids are read through the roster
 * for the duration of its move.
 */

use glam::Vec2;
use rand::Rng;
use std::ops::RangeInclusive;

use crate::boundary::Boundary;
use crate::params::BoidRules;
use crate::roster::Roster;
use crate::vector::{distance, normalize};

// Display color, three channels derived from the boid id. Channels are
// non-negative but not clamped to any pixel format.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoidColor {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
}

impl BoidColor {
    pub fn from_id(id: usize) -> Self {
        let band = id % 255;
        if band < 100 {
            let shifted = ((id + 10) % 255) as f32;
            Self {
                red: shifted / 2.0,
                green: shifted / 3.0,
                blue: ((id + 100) % 255) as f32,
            }
        } else {
            let band = band as f32;
            Self {
                red: band / 2.0,
                green: band / 3.0,
                blue: band,
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Boid {
    id: usize,
    speed: f32,
    position: Vec2,
    // Zero until the first move, then always `speed` long
    direction: Vec2,
    color: BoidColor,
    rules: BoidRules,
    // Roster indices found at the start of the current move
    neighbors: Vec<usize>,
}

impl Boid {
    // A boid at a random position with a random speed from `speed_range`.
    // An inverted range is read with its bounds swapped.
    pub fn new<R: Rng + ?Sized>(
        id: usize,
        speed_range: RangeInclusive<u32>,
        boundary: &Boundary,
        rules: BoidRules,
        rng: &mut R,
    ) -> Self {
        let (start, end) = speed_range.into_inner();
        let speed = rng.gen_range(start.min(end)..=start.max(end)) as f32;
        let position = boundary.random_position(rng);
        Self::with_state(id, speed, position, Vec2::ZERO, rules)
    }

    // A boid with fully specified kinematics
    pub fn with_state(id: usize, speed: f32, position: Vec2, direction: Vec2, rules: BoidRules) -> Self {
        Self {
            id,
            speed,
            position,
            direction,
            color: BoidColor::from_id(id),
            rules,
            neighbors: Vec::new(),
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    pub fn color(&self) -> BoidColor {
        self.color
    }

    pub fn rules(&self) -> &BoidRules {
        &self.rules
    }

    pub fn neighbors(&self) -> &[usize] {
        &self.neighbors
    }

    // Collect the other boids closer than the furthest view range.
    // Which roster entries are examined depends on the roster's scan policy.
    pub fn find_neighbors(&mut self, roster: &Roster) {
        let max_view_range = self.rules.max_view_range();
        self.neighbors.clear();

        for index in roster.candidates(self.position) {
            if let Some(other) = roster.get(index) {
                if other.id != self.id && distance(self.position, other.position) < max_view_range {
                    self.neighbors.push(index);
                }
            }
        }
    }

    // Mean of `value` over cached neighbors closer than `view_range`
    fn neighbor_mean<F>(&self, roster: &Roster, view_range: f32, value: F) -> Option<Vec2>
    where
        F: Fn(&Boid) -> Vec2,
    {
        let mut sum = Vec2::ZERO;
        let mut total = 0usize;

        for other in self.neighbors.iter().filter_map(|&index| roster.get(index)) {
            if other.id != self.id && distance(self.position, other.position) < view_range {
                sum += value(other);
                total += 1;
            }
        }

        (total > 0).then(|| sum / total as f32)
    }

    // Blend the average neighbor heading into the current one.
    // Without neighbors in range the boid keeps going straight.
    pub fn alignment(&self, roster: &Roster) -> Vec2 {
        match self.neighbor_mean(roster, self.rules.alignment.view_range, Boid::direction) {
            Some(average) => normalize(average + self.direction) * self.speed,
            None => self.direction,
        }
    }

    // Steer towards the center of nearby boids (not rescaled)
    pub fn cohesion(&self, roster: &Roster) -> Vec2 {
        match self.neighbor_mean(roster, self.rules.cohesion.view_range, Boid::position) {
            Some(center) => center - self.position,
            None => self.direction,
        }
    }

    // Steer away from the center of boids that are too close (not rescaled)
    pub fn separation(&self, roster: &Roster) -> Vec2 {
        match self.neighbor_mean(roster, self.rules.separation.view_range, Boid::position) {
            Some(center) => self.position - center,
            None => self.direction,
        }
    }

    // Refresh neighbors and combine the three rules, each divided by its weakness
    pub fn calculate_direction(&mut self, roster: &Roster) -> Vec2 {
        self.find_neighbors(roster);

        let blended = self.alignment(roster) / self.rules.alignment.weakness
            + self.cohesion(roster) / self.rules.cohesion.weakness
            + self.separation(roster) / self.rules.separation.weakness;

        normalize(blended) * self.speed
    }

    // Random heading of length `speed`, each axis flipped with probability 1/2
    pub fn random_direction<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let mut heading = Vec2::new(rng.gen::<f32>(), rng.gen::<f32>());
        if rng.gen::<bool>() {
            heading.x = -heading.x;
        }
        if rng.gen::<bool>() {
            heading.y = -heading.y;
        }
        normalize(heading) * self.speed
    }

    // Advance one tick: pick a direction, integrate and wrap at the borders
    pub fn advance<R: Rng + ?Sized>(&mut self, roster: &Roster, rng: &mut R) {
        self.direction = if self.direction == Vec2::ZERO {
            // First motion does not look at neighbors
            self.neighbors.clear();
            let heading = self.random_direction(rng);
            log::trace!("boid {} starts heading {heading}", self.id);
            heading
        } else {
            self.calculate_direction(roster)
        };

        self.position = roster.boundary().wrap(self.position + self.direction);
    }
}

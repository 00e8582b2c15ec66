/*
 * Boundary Module
 *
 * The rectangular world the flock lives in. The origin is the top-left
 * corner and both axes grow towards width/height, matching screen space.
 * A boundary never changes once the flock is created.
 */

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Boundary {
    pub width: f32,
    pub height: f32,
}

impl Default for Boundary {
    fn default() -> Self {
        Self {
            width: 1435.0,
            height: 1000.0,
        }
    }
}

impl Boundary {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    // Uniformly random point inside the boundary, edges included
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec2 {
        let x = rng.gen_range(0.0..=self.width);
        let y = rng.gen_range(0.0..=self.height);
        Vec2::new(x, y)
    }

    // Teleport a position that left the world to the opposite edge.
    // Overshoot is discarded: anything past an edge lands exactly on the other one.
    pub fn wrap(&self, mut position: Vec2) -> Vec2 {
        if position.x < 0.0 {
            position.x = self.width;
        } else if position.x > self.width {
            position.x = 0.0;
        }

        if position.y < 0.0 {
            position.y = self.height;
        } else if position.y > self.height {
            position.y = 0.0;
        }

        position
    }

    pub fn contains(&self, position: Vec2) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }
}

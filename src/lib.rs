/*
 * Boid Flocking Simulation - Module Definitions
 *
 * This file defines the module structure for the boid simulation.
 * The simulation core has no graphics dependency; the windowed viewer
 * lives behind the `gui` feature.
 */

// Re-export key components for easier access
pub use boid::{Boid, BoidColor};
pub use boundary::Boundary;
pub use flock::{make_rng, Flock, FlockSummary};
pub use params::{BoidRules, RuleParams, SimulationParams};
pub use roster::{NeighborScan, Roster};
pub use spatial_grid::SpatialGrid;

// Define modules
pub mod boid;
pub mod boundary;
pub mod flock;
pub mod params;
pub mod roster;
pub mod spatial_grid;
pub mod vector;

#[cfg(feature = "gui")]
pub mod app;
#[cfg(feature = "gui")]
pub mod debug;
#[cfg(feature = "gui")]
pub mod renderer;
#[cfg(feature = "gui")]
pub mod ui;

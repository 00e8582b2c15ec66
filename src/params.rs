/*
 * Simulation Parameters Module
 *
 * This module defines the per-boid rule parameters and the SimulationParams
 * struct holding everything needed to build a flock. Parameters can be
 * loaded from a TOML file, are validated before use and can be overridden
 * from the command line or the control panel.
 */

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{fmt::Debug, fs, ops::RangeBounds, path::Path};

use crate::boundary::Boundary;
use crate::roster::NeighborScan;

// View range and inverse weight of one steering rule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleParams {
    pub view_range: f32,
    // Divides the rule's contribution, so larger means weaker
    pub weakness: f32,
}

impl RuleParams {
    pub const fn new(view_range: f32, weakness: f32) -> Self {
        Self { view_range, weakness }
    }
}

// The three rules every boid carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoidRules {
    pub alignment: RuleParams,
    pub cohesion: RuleParams,
    pub separation: RuleParams,
}

impl Default for BoidRules {
    fn default() -> Self {
        Self {
            alignment: RuleParams::new(50.0, 1.0),
            cohesion: RuleParams::new(50.0, 120.0),
            separation: RuleParams::new(20.0, 11.0),
        }
    }
}

impl BoidRules {
    // Furthest distance any rule looks at
    pub fn max_view_range(&self) -> f32 {
        self.alignment
            .view_range
            .max(self.cohesion.view_range)
            .max(self.separation.view_range)
    }

    fn validate(&self) -> Result<()> {
        for (name, rule) in [
            ("alignment", self.alignment),
            ("cohesion", self.cohesion),
            ("separation", self.separation),
        ] {
            check_positive(rule.view_range).with_context(|| format!("invalid {name} view range"))?;
            check_positive(rule.weakness).with_context(|| format!("invalid {name} weakness"))?;
        }
        Ok(())
    }
}

// Parameters for the whole simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimulationParams {
    pub num_boids: usize,
    pub min_speed: u32,
    pub max_speed: u32,
    // Ticks per second when running in the viewer
    pub frame_rate: f32,
    pub neighbor_scan: NeighborScan,
    pub seed: Option<u64>,
    pub boundary: Boundary,
    pub rules: BoidRules,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            num_boids: 1000,
            min_speed: 3,
            max_speed: 6,
            frame_rate: 50.0,
            neighbor_scan: NeighborScan::default(),
            seed: None,
            boundary: Boundary::default(),
            rules: BoidRules::default(),
        }
    }
}

impl SimulationParams {
    // Load parameters from a TOML file. Missing keys fall back to the defaults.
    pub fn from_file<P: AsRef<Path>>(file: P) -> Result<Self> {
        let file = file.as_ref();
        let contents =
            fs::read_to_string(file).with_context(|| format!("failed to read {file:?}"))?;

        let params = Self::from_toml(&contents).with_context(|| format!("invalid config {file:?}"))?;

        Ok(params)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let params: SimulationParams =
            toml::from_str(contents).context("failed to deserialize parameters")?;

        params.validate().context("failed to validate parameters")?;

        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        check_num(self.num_boids, Self::get_num_boids_range()).context("invalid number of boids")?;
        check_num(self.min_speed, Self::get_speed_range()).context("invalid minimum speed")?;
        check_num(self.max_speed, self.min_speed..=*Self::get_speed_range().end())
            .context("invalid maximum speed")?;
        check_num(self.frame_rate, Self::get_frame_rate_range()).context("invalid frame rate")?;
        check_num(self.boundary.width, Self::get_boundary_range()).context("invalid boundary width")?;
        check_num(self.boundary.height, Self::get_boundary_range()).context("invalid boundary height")?;
        self.rules.validate()?;
        Ok(())
    }

    pub fn speed_range(&self) -> std::ops::RangeInclusive<u32> {
        self.min_speed..=self.max_speed
    }

    // Parameter ranges shared by validation and the control panel
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        0..=100_000
    }

    pub fn get_speed_range() -> std::ops::RangeInclusive<u32> {
        1..=100
    }

    pub fn get_frame_rate_range() -> std::ops::RangeInclusive<f32> {
        1.0..=240.0
    }

    pub fn get_boundary_range() -> std::ops::RangeInclusive<f32> {
        1.0..=1_000_000.0
    }
}

fn check_num<T, R>(num: T, range: R) -> Result<()>
where
    T: PartialOrd + Debug,
    R: RangeBounds<T> + Debug,
{
    if !range.contains(&num) {
        bail!("number must be in the range {range:?}, but is {num:?}");
    }
    Ok(())
}

fn check_positive(num: f32) -> Result<()> {
    if !(num.is_finite() && num > 0.0) {
        bail!("number must be positive and finite, but is {num:?}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = SimulationParams::default();
        params.validate().unwrap();
        assert_eq!(params.rules.max_view_range(), 50.0);
        assert_eq!(params.speed_range(), 3..=6);
    }

    #[test]
    fn empty_toml_gives_defaults() {
        assert_eq!(SimulationParams::from_toml("").unwrap(), SimulationParams::default());
    }

    #[test]
    fn partial_toml_overrides_only_named_keys() {
        let params = SimulationParams::from_toml(
            "num_boids = 12\n\
             neighbor_scan = \"grid\"\n\
             seed = 9\n\
             [boundary]\n\
             width = 300.0\n\
             height = 200.0\n\
             [rules.separation]\n\
             view_range = 30.0\n\
             weakness = 4.0\n",
        )
        .unwrap();

        assert_eq!(params.num_boids, 12);
        assert_eq!(params.neighbor_scan, NeighborScan::Grid);
        assert_eq!(params.seed, Some(9));
        assert_eq!(params.boundary, Boundary::new(300.0, 200.0));
        assert_eq!(params.rules.separation, RuleParams::new(30.0, 4.0));
        assert_eq!(params.rules.alignment, BoidRules::default().alignment);
        assert_eq!(params.max_speed, 6);
    }

    #[test]
    fn rejects_inverted_speed_range() {
        let err = SimulationParams::from_toml("min_speed = 8\nmax_speed = 4\n").unwrap_err();
        assert!(format!("{err:#}").contains("invalid maximum speed"));
    }

    #[test]
    fn rejects_zero_weakness() {
        let err = SimulationParams::from_toml("[rules.cohesion]\nview_range = 50.0\nweakness = 0.0\n")
            .unwrap_err();
        assert!(format!("{err:#}").contains("invalid cohesion weakness"));
    }

    #[test]
    fn rejects_oversized_boundary() {
        let err = SimulationParams::from_toml(
            "neighbor_scan = \"grid\"\n[boundary]\nwidth = 1e12\nheight = 1e12\n",
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("invalid boundary width"));

        let err = SimulationParams::from_toml("[boundary]\nwidth = 500.0\nheight = 0.5\n").unwrap_err();
        assert!(format!("{err:#}").contains("invalid boundary height"));
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(SimulationParams::from_toml("boid_count = 5\n").is_err());
    }
}

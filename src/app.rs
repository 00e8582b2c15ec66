/*
 * Application Module
 *
 * This module defines the nannou model for the windowed viewer and its
 * update loop. The flock advances on a fixed timestep driven by the
 * configured tick rate, independent of how fast frames are drawn.
 */

use anyhow::{anyhow, Result};
use nannou::prelude::*;
use nannou_egui::Egui;
use std::sync::OnceLock;
use std::time::Duration;

use crate::debug::DebugInfo;
use crate::flock::{make_rng, Flock};
use crate::params::SimulationParams;
use crate::renderer;
use crate::ui::{self, Controls};

// Upper bound on catch-up ticks in a single frame
const MAX_TICKS_PER_FRAME: usize = 5;

// nannou builds the model from a plain function, so parameters are handed over here
static PARAMS: OnceLock<SimulationParams> = OnceLock::new();

pub struct Model {
    pub flock: Flock,
    pub params: SimulationParams,
    pub controls: Controls,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub tick_accumulator: Duration,
}

// Open the viewer and block until the window closes
pub fn run(params: SimulationParams) -> Result<()> {
    PARAMS
        .set(params)
        .map_err(|_| anyhow!("viewer parameters were already set"))?;

    nannou::app(model).update(update).run();

    Ok(())
}

fn model(app: &App) -> Model {
    let params = PARAMS.get().cloned().unwrap_or_default();

    // Window matches the world so every boid is on screen
    let window_id = app
        .new_window()
        .title("Boids")
        .size(params.boundary.width as u32, params.boundary.height as u32)
        .view(renderer::view)
        .raw_event(raw_window_event)
        .build()
        .expect("failed to build window");

    let window = app.window(window_id).expect("window was just built");
    let egui = Egui::from_window(&window);

    let flock = Flock::from_params(&params, make_rng(params.seed));
    log::info!("viewer started with {} boids", flock.len());

    Model {
        flock,
        controls: Controls::from_params(&params),
        params,
        egui,
        debug_info: DebugInfo::default(),
        tick_accumulator: Duration::ZERO,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let actions = ui::update_ui(&mut model.egui, &mut model.controls, &model.debug_info, model.flock.ticks());

    if actions.reset {
        reset_flock(model);
    }

    model.flock.set_neighbor_scan(model.controls.neighbor_scan);

    let mut ticks_this_frame = 0;
    if model.controls.paused {
        model.tick_accumulator = Duration::ZERO;
        if actions.step {
            model.flock.tick();
            ticks_this_frame = 1;
        }
    } else {
        let tick_interval = Duration::from_secs_f32(1.0 / model.controls.frame_rate);
        model.tick_accumulator += update.since_last;

        while model.tick_accumulator >= tick_interval {
            if ticks_this_frame == MAX_TICKS_PER_FRAME {
                // Too far behind, drop the backlog instead of spiraling
                let backlog = model.tick_accumulator.as_secs_f64() / tick_interval.as_secs_f64();
                model.debug_info.skipped_ticks += backlog as u64;
                model.tick_accumulator = Duration::ZERO;
                break;
            }
            model.flock.tick();
            model.tick_accumulator -= tick_interval;
            ticks_this_frame += 1;
        }
    }

    model.debug_info.ticks_per_frame = ticks_this_frame;
    model.debug_info.summary = Some(model.flock.summary());
}

// Rebuild the flock from the original parameters. A seeded run restarts identically.
fn reset_flock(model: &mut Model) {
    model.flock = Flock::from_params(&model.params, make_rng(model.params.seed));
    model.tick_accumulator = Duration::ZERO;
    model.debug_info.skipped_ticks = 0;
    log::info!("flock reset");
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

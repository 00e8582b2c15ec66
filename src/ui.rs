/*
 * UI Module
 *
 * This module builds the control panel with nannou_egui. The panel edits
 * the viewer controls in place and reports one-shot actions (reset, step)
 * back to the update loop.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::roster::NeighborScan;

// Viewer state the panel can change
pub struct Controls {
    pub paused: bool,
    pub show_debug: bool,
    pub frame_rate: f32,
    pub neighbor_scan: NeighborScan,
}

impl Controls {
    pub fn from_params(params: &SimulationParams) -> Self {
        Self {
            paused: false,
            show_debug: false,
            frame_rate: params.frame_rate,
            neighbor_scan: params.neighbor_scan,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct UiActions {
    pub reset: bool,
    pub step: bool,
}

pub fn update_ui(egui: &mut Egui, controls: &mut Controls, debug_info: &DebugInfo, total_ticks: u64) -> UiActions {
    let mut actions = UiActions::default();

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                ui.checkbox(&mut controls.paused, "Pause");
                if ui.button("Step").clicked() {
                    actions.step = true;
                }
                if ui.button("Reset Flock").clicked() {
                    actions.reset = true;
                }
            });

            ui.add(
                egui::Slider::new(&mut controls.frame_rate, SimulationParams::get_frame_rate_range())
                    .text("Ticks per second"),
            );

            ui.collapsing("Neighbor Scan", |ui| {
                for scan in NeighborScan::ALL {
                    ui.radio_value(&mut controls.neighbor_scan, scan, scan.name());
                }
            });

            ui.separator();

            for line in debug_info.lines(total_ticks) {
                ui.label(line);
            }

            ui.checkbox(&mut controls.show_debug, "Show Debug Overlay");
        });

    actions
}

/*
 * Debug Information Module
 *
 * Frame and simulation metrics listed in the control panel.
 */

use std::time::Duration;

use crate::flock::FlockSummary;

pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks_per_frame: usize,
    // Ticks dropped because the frame fell too far behind
    pub skipped_ticks: u64,
    pub summary: Option<FlockSummary>,
}

impl Default for DebugInfo {
    fn default() -> Self {
        Self {
            fps: 0.0,
            frame_time: Duration::ZERO,
            ticks_per_frame: 0,
            skipped_ticks: 0,
            summary: None,
        }
    }
}

impl DebugInfo {
    // Lines shown in the overlay and the panel
    pub fn lines(&self, total_ticks: u64) -> Vec<String> {
        let mut lines = vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks: {total_ticks} ({} this frame)", self.ticks_per_frame),
        ];

        if self.skipped_ticks > 0 {
            lines.push(format!("Skipped ticks: {}", self.skipped_ticks));
        }

        if let Some(summary) = &self.summary {
            lines.push(format!("Boids: {} ({} moving)", summary.boids, summary.moving));
            lines.push(format!("Polarization: {:.3}", summary.polarization));
            lines.push(format!("Mean neighbors: {:.2}", summary.mean_neighbors));
        }

        lines
    }
}

/*
 * Renderer Module
 *
 * This module draws the flock. Each boid is a triangle pointing along its
 * direction, built in world space (origin top-left, y down) and mapped to
 * nannou's window space (origin center, y up).
 */

use ::glam::Vec2 as WorldPoint;
use nannou::prelude::*;

use crate::app::Model;
use crate::boid::{Boid, BoidColor};
use crate::boundary::Boundary;

const BACKGROUND: (u8, u8, u8) = (10, 10, 50);

// Triangle vertices for a boid at `position` heading along `direction`
pub fn orientation(position: WorldPoint, direction: WorldPoint) -> [WorldPoint; 3] {
    [
        WorldPoint::new(position.x - direction.y / 1.5, position.y + direction.x / 1.5),
        position + direction * 2.0,
        WorldPoint::new(position.x + direction.y / 1.5, position.y - direction.x / 1.5),
    ]
}

// World coordinates to window coordinates, with the world centered in the window
pub fn world_to_window(point: WorldPoint, boundary: &Boundary) -> Point2 {
    pt2(point.x - boundary.width / 2.0, boundary.height / 2.0 - point.y)
}

fn boid_color(color: BoidColor) -> Rgb {
    rgb(color.red / 255.0, color.green / 255.0, color.blue / 255.0)
}

fn draw_boid(draw: &Draw, boid: &Boid, boundary: &Boundary) {
    let points = orientation(boid.position(), boid.direction()).map(|p| world_to_window(p, boundary));

    draw.polygon().color(boid_color(boid.color())).points(points);
}

// View ranges and heading of the first boid
fn draw_view_ranges(draw: &Draw, boid: &Boid, boundary: &Boundary) {
    let center = world_to_window(boid.position(), boundary);
    let rules = boid.rules();

    for (range, color) in [
        (rules.separation.view_range, RED),
        (rules.alignment.view_range, GREEN),
        (rules.cohesion.view_range, BLUE),
    ] {
        draw.ellipse()
            .xy(center)
            .radius(range)
            .no_fill()
            .stroke(color)
            .stroke_weight(1.0);
    }

    let tip = world_to_window(boid.position() + boid.direction() * 5.0, boundary);
    if tip != center {
        draw.arrow()
            .start(center)
            .end(tip)
            .color(YELLOW)
            .stroke_weight(2.0);
    }
}

pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    let (r, g, b) = BACKGROUND;
    draw.background().color(rgb(r, g, b));

    let boundary = model.flock.boundary();

    draw.rect()
        .x_y(0.0, 0.0)
        .w_h(boundary.width, boundary.height)
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    for boid in model.flock.boids() {
        draw_boid(&draw, boid, boundary);
    }

    if model.controls.show_debug {
        if let Some(first) = model.flock.boids().first() {
            draw_view_ranges(&draw, first, boundary);
        }
    }

    draw.to_frame(app, &frame).unwrap();

    model.egui.draw_to_frame(&frame).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_points_along_direction() {
        let [left, tip, right] = orientation(WorldPoint::new(10.0, 10.0), WorldPoint::new(3.0, 0.0));
        assert_eq!(tip, WorldPoint::new(16.0, 10.0));
        assert_eq!(left, WorldPoint::new(10.0, 12.0));
        assert_eq!(right, WorldPoint::new(10.0, 8.0));
    }

    #[test]
    fn world_corners_map_to_window_corners() {
        let boundary = Boundary::new(200.0, 100.0);
        assert_eq!(world_to_window(WorldPoint::ZERO, &boundary), pt2(-100.0, 50.0));
        assert_eq!(world_to_window(WorldPoint::new(200.0, 100.0), &boundary), pt2(100.0, -50.0));
    }
}

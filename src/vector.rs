/*
 * Vector Math Module
 *
 * Small helpers over glam's Vec2 used by the steering rules.
 * Both functions are pure and total.
 */

use glam::Vec2;

// Scale a vector to unit length. A zero vector divides by 1 instead,
// so zero in gives zero out.
#[inline]
pub fn normalize(v: Vec2) -> Vec2 {
    let mut length = v.length();
    if length == 0.0 {
        length = 1.0;
    }
    v / length
}

// Euclidean distance between two points
#[inline]
pub fn distance(p1: Vec2, p2: Vec2) -> f32 {
    (p1 - p2).length()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(normalize(Vec2::ZERO), Vec2::ZERO);
    }

    #[test]
    fn normalize_has_unit_length() {
        let n = normalize(Vec2::new(3.0, -4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
        assert!((n.y + 0.8).abs() < 1e-6);
    }

    #[test]
    fn distance_is_a_metric() {
        let p = Vec2::new(12.5, -3.0);
        let q = Vec2::new(-1.0, 7.25);
        assert_eq!(distance(p, p), 0.0);
        assert_eq!(distance(p, q), distance(q, p));
        assert!((distance(Vec2::ZERO, Vec2::new(3.0, 4.0)) - 5.0).abs() < 1e-6);
    }
}

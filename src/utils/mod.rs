extern crate nalgebra as na;
use na::{Point2, Vector2};

pub type Float = f64;
pub type P2 = Point2<Float>;
pub type V2 = Vector2<Float>;
pub const EPSILON: Float = 0.000_001;

pub fn between(num: Float, a: Float, b: Float) -> bool {
    (num >= a) && (num <= b)
}

/// halves a length the way the quadtree splits its bounds:
/// the first half is floored, the second half takes the remainder
pub fn split_length(len: Float) -> (Float, Float) {
    let first = (len * 0.5).floor();
    (first, len - first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_even_and_odd() {
        assert_eq!(split_length(600.0), (300.0, 300.0));
        assert_eq!(split_length(361.0), (180.0, 181.0));
        assert_eq!(split_length(1.0), (0.0, 1.0));
    }

    #[test]
    fn between_is_inclusive() {
        assert!(between(0.0, 0.0, 1.0));
        assert!(between(1.0, 0.0, 1.0));
        assert!(!between(1.0 + EPSILON, 0.0, 1.0));
    }
}

extern crate nalgebra as na;

use super::*;

pub trait HasOrigin {
    fn get_origin(&self) -> P2;
    fn set_origin(&mut self, origin: P2);
}

impl HasOrigin for P2 {
    fn get_origin(&self) -> P2 {
        *self
    }
    fn set_origin(&mut self, origin: P2) {
        self.x = origin.x;
        self.y = origin.y;
    }
}

/// whether a shape contains a point
pub trait Contains {
    fn contains(&self, p: &P2) -> bool;
}

pub trait Intersect<T> {
    type Intersection;

    fn intersect(&self, other: &T) -> Option<Self::Intersection>;

    fn does_collide(&self, other: &T) -> bool {
        self.intersect(other).is_some()
    }
}

/// anything that occupies an axis aligned box in the playfield
pub trait HasAabb {
    fn get_aabb(&self) -> AABB;
}

impl HasAabb for AABB {
    fn get_aabb(&self) -> AABB {
        *self
    }
}

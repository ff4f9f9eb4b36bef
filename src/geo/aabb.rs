use super::*;
use serde::{Deserialize, Serialize};

/// axis aligned box in screen coordinates (y grows downwards)
#[derive(Copy, Clone, PartialEq, Debug, Serialize, Deserialize)]
pub struct AABB {
    // origin is the top left corner
    pub origin: P2,
    pub width: Float,
    pub height: Float,
}

impl AABB {
    pub fn new(origin: P2, width: Float, height: Float) -> AABB {
        AABB {
            origin,
            width,
            height,
        }
    }

    pub fn from_xywh(x: Float, y: Float, width: Float, height: Float) -> AABB {
        AABB::new(P2::new(x, y), width, height)
    }

    pub fn left(&self) -> Float {
        self.origin.x
    }

    pub fn right(&self) -> Float {
        self.origin.x + self.width
    }

    pub fn top(&self) -> Float {
        self.origin.y
    }

    pub fn bottom(&self) -> Float {
        self.origin.y + self.height
    }

    pub fn center(&self) -> P2 {
        P2::new(
            self.origin.x + self.width * 0.5,
            self.origin.y + self.height * 0.5,
        )
    }

    /// finite coordinates and a non negative extent
    pub fn is_valid(&self) -> bool {
        self.origin.x.is_finite()
            && self.origin.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// wether `other` lies completely inside of self, borders included
    pub fn contains_aabb(&self, other: &AABB) -> bool {
        between(other.left(), self.left(), self.right())
            && between(other.right(), self.left(), self.right())
            && between(other.top(), self.top(), self.bottom())
            && between(other.bottom(), self.top(), self.bottom())
    }
}

impl Intersect<AABB> for AABB {
    /// the overlapping region
    type Intersection = AABB;

    // all four tests are strict: boxes that only share an edge do not collide
    fn intersect(&self, other: &AABB) -> Option<AABB> {
        if self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
        {
            let left = self.left().max(other.left());
            let top = self.top().max(other.top());
            Some(AABB::from_xywh(
                left,
                top,
                self.right().min(other.right()) - left,
                self.bottom().min(other.bottom()) - top,
            ))
        } else {
            None
        }
    }
}

impl HasOrigin for AABB {
    fn get_origin(&self) -> P2 {
        self.origin
    }
    fn set_origin(&mut self, origin: P2) {
        self.origin = origin;
    }
}

impl Contains for AABB {
    fn contains(&self, p: &P2) -> bool {
        between(p.x, self.left(), self.right()) && between(p.y, self.top(), self.bottom())
    }
}

impl Distribution<AABB> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> AABB {
        AABB {
            origin: rng.gen(),
            width: rng.gen(),
            height: rng.gen(),
        }
    }
}

pub mod aabb;
pub mod traits;

pub use crate::utils::*;
pub use aabb::*;
pub use rand::distributions::{Distribution, Standard};
pub use rand::Rng;
pub use traits::*;

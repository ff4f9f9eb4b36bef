pub mod behavior;
pub mod collision_system;
pub mod config;
pub mod entity;
pub mod error;
pub mod game;
pub mod geo;
pub mod pool;
pub mod utils;

pub use collision_system::{run_collision_pass, CollisionSystem, EntitySource, QuadTree};
pub use config::GameConfig;
pub use entity::{Entity, EntityKind};
pub use error::{Error, Result};
pub use game::{FrameReport, Game};
pub use pool::Pool;

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

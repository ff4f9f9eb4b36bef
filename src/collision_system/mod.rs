pub mod detector;
pub mod quadtree;

pub use detector::*;
pub use quadtree::*;

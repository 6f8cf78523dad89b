pub use dir::Dir;
pub use grid_point::{BoardDim, GridPoint};
pub use point::Point;

pub mod board;
mod dir;
mod grid_point;
mod point;

//! 2D bin packing: geometry primitives, the Bottom-Left/Guillotine/MAXRECTS
//! sheet managers and the dispatcher that ties them together (§4.5–§4.9).

pub mod bottom_left;
pub mod geometry;
pub mod guillotine;
pub mod maxrects;
pub mod orchestrator;

pub use orchestrator::optimize_2d;

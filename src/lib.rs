//! Deterministic greedy engine for 1D/2D stock cutting and bin-packing
//! optimization.
//!
//! The engine is a pure function `(Pieces, Stock, Options) -> Result`: no
//! I/O, no shared mutable state across calls, single-threaded per call. The
//! two entry points, [`optimize_1d`] and [`optimize_2d`], are the only way
//! callers (CLI, HTTP surface, or any other collaborator) reach it.

pub mod error;
pub mod expand;
pub mod oned;
pub mod render;
pub mod stats;
pub mod stock;
pub mod twod;
pub mod types;
pub mod unplaced;

pub use error::{EngineError, EngineResult};
pub use oned::optimize_1d;
pub use twod::optimize_2d;
pub use types::{
    Algorithm1D, Algorithm2D, BarResult, Cut, ExpandedPiece1D, ExpandedPiece2D, FreeRect, GrainDirection, Heuristic,
    Options1D, Options2D, PieceInput1D, PieceInput2D, Placement, Result1D, Result2D, SheetResult, SortStrategy,
    Statistics1D, Statistics2D, StockInput1D, StockInput2D, UsableOffcut,
};

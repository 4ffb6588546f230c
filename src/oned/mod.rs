//! 1D bin packing: active-bar state (§4.3) and the FFD/BFD dispatcher (§4.4).

pub mod bin;
pub mod dispatch;

pub use dispatch::optimize_1d;

//! Report module - regression summary parsing and run summaries

pub mod ols;
pub mod selection_export;
pub mod summary;

pub use ols::*;
pub use selection_export::*;
pub use summary::*;

//! Pipeline module - cleaning, compression and feature selection steps

pub mod clean;
pub mod columns;
pub mod compress;
pub mod dependence;
pub mod dropper;
pub mod error;
pub mod frame;
pub mod loader;
pub mod regression;
pub mod transform;

pub use clean::*;
pub use columns::*;
pub use compress::{compress, compress_cleaned, Bucketing, Compression, COMPRESSIONS};
pub use dependence::*;
pub use dropper::*;
pub use error::*;
pub use loader::*;
pub use regression::*;
pub use transform::*;

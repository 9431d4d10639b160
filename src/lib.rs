//! amesprep: Ames Housing Preparation Library
//!
//! Cleaning, category compression and dependence-based feature selection
//! for the Ames housing sale records, plus parsers for regression summaries.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;

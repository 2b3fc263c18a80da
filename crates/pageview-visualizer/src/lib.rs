//! # Page-View Visualizer
//!
//! Command-line entry point that renders the line, bar and box charts of the
//! daily page-view export in the working directory.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod app;
pub mod error;

pub use app::*;
pub use error::*;

//! # Page-View Config
//!
//! Type-safe configuration for the page-view visualizer.
//!
//! The built-in defaults reproduce the fixed input file, output paths and
//! canvas sizes of the tool. Embedding callers may load overrides from a
//! TOML, YAML or JSON document; every loaded configuration is validated.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;

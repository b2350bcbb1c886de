//! Helpers shared by all commands
//!
//! - [`cargo`] - cargo invocation wrappers
//! - [`crates`] - workspace member discovery and `msntp` feature sets
//! - [`demos`] - demo application discovery
//! - [`output`] - colored terminal output

pub mod cargo;
pub mod crates;
pub mod demos;
pub mod output;

pub use cargo::*;
pub use crates::*;
pub use demos::*;
pub use output::*;

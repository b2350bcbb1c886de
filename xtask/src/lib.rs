//! # xtask - Build Automation for msntp
//!
//! Build, test, lint and format the `msntp` workspace crates and the standalone demo
//! applications under `demos/` following the [xtask pattern](https://github.com/matklad/cargo-xtask).
//!
//! ```no_run
//! use xtask::{commands, Result};
//!
//! fn main() -> Result<()> {
//!     commands::build::build_demos()?;
//!     commands::test::run_tests()?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`commands`] - build, test, check, clippy, format and clean commands
//! - [`utils`] - cargo invocation, workspace/demo discovery and output helpers

pub mod commands;
pub mod utils;

pub use anyhow::{Context, Result};
pub use colored::Colorize;
pub use utils::FeatureSet;

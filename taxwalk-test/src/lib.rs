//! Test utilities for the taxwalk workspace
//!
//! Holds the taxdump fixtures shared by unit, integration and CLI tests,
//! plus an isolated on-disk environment that writes them out.

pub mod environment;
pub mod fixtures;

// Re-export commonly used items
pub use environment::TestEnvironment;
pub use fixtures::{DIVISION_DMP, NAMES_DMP, NODES_DMP};

// Re-export test dependencies for convenience
pub use anyhow::{Context, Result};
pub use tempfile;

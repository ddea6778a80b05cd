//! Test environment management
//!
//! Provides isolated on-disk taxdump directories with automatic cleanup using RAII.

use anyhow::{Context, Result};
use flate2::write::GzEncoder;
use flate2::Compression;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::fixtures::{DIVISION_DMP, NAMES_DMP, NODES_DMP};

/// Isolated directory holding names.dmp, nodes.dmp and division.dmp
pub struct TestEnvironment {
    temp_dir: TempDir,
}

impl TestEnvironment {
    /// Create an environment populated with the standard fixtures
    pub fn new() -> Result<Self> {
        Self::with_dumps(NAMES_DMP, NODES_DMP, DIVISION_DMP)
    }

    /// Create an environment with custom dump contents
    pub fn with_dumps(names: &str, nodes: &str, divisions: &str) -> Result<Self> {
        let temp_dir = TempDir::with_prefix("taxwalk-test")
            .context("Failed to create temporary directory")?;

        let env = Self { temp_dir };
        env.write_file("names.dmp", names)?;
        env.write_file("nodes.dmp", nodes)?;
        env.write_file("division.dmp", divisions)?;
        Ok(env)
    }

    /// Root of the environment
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn names_path(&self) -> PathBuf {
        self.path().join("names.dmp")
    }

    pub fn nodes_path(&self) -> PathBuf {
        self.path().join("nodes.dmp")
    }

    pub fn division_path(&self) -> PathBuf {
        self.path().join("division.dmp")
    }

    /// Write a file relative to the environment root
    pub fn write_file(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        std::fs::write(&path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Write a gzip-compressed file relative to the environment root
    pub fn write_gzip(&self, name: &str, contents: &str) -> Result<PathBuf> {
        let path = self.path().join(name);
        let file = std::fs::File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut encoder = GzEncoder::new(file, Compression::default());
        encoder.write_all(contents.as_bytes())?;
        encoder.finish()?;
        Ok(path)
    }
}

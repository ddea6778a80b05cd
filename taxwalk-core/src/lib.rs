//! Core utilities and types shared across all taxwalk crates

pub mod config;
pub mod error;
pub mod system;

// Re-export commonly used types
pub use config::{load_config, load_or_default, save_config, Config, OutputFormat};
pub use error::{TaxwalkError, TaxwalkResult};

// Re-export system utilities
pub use system::{taxwalk_config_path, taxwalk_home};

pub mod paths;

pub use paths::{taxwalk_config_path, taxwalk_home};

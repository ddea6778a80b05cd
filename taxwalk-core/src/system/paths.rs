use std::path::PathBuf;
use std::sync::OnceLock;

// Cache the home path to avoid repeated environment lookups
static TAXWALK_HOME: OnceLock<PathBuf> = OnceLock::new();

/// Get the taxwalk home directory
/// Checks TAXWALK_HOME environment variable, falls back to ${HOME}/.taxwalk
pub fn taxwalk_home() -> PathBuf {
    TAXWALK_HOME
        .get_or_init(|| {
            if let Ok(path) = std::env::var("TAXWALK_HOME") {
                PathBuf::from(path)
            } else {
                let home = std::env::var("HOME").unwrap_or_else(|_| {
                    std::env::var("USERPROFILE").unwrap_or_else(|_| ".".to_string())
                });
                PathBuf::from(home).join(".taxwalk")
            }
        })
        .clone()
}

/// Location of the user config file: TAXWALK_HOME/config.toml
pub fn taxwalk_config_path() -> PathBuf {
    taxwalk_home().join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_path_lives_under_home() {
        let config = taxwalk_config_path();
        assert!(config.starts_with(taxwalk_home()));
        assert_eq!(config.file_name().unwrap(), "config.toml");
    }
}

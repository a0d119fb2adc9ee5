//! Configuration schema for excov
//!
//! Config lives at `.config/excov/config.yaml` relative to the working
//! directory:
//!
//! ```yaml
//! validations:
//!   - name: network-module
//!     examples_dir: ../../examples
//!     tests_dir: ../../tests
//!     filter: _test.tftest.hcl
//! ```
//!
//! Relative directories resolve against the directory holding the config
//! file.

use eyre::{Result, WrapErr};
use facet::Facet;
use std::path::{Path, PathBuf};

/// Default config location, relative to the working directory
pub const DEFAULT_CONFIG_PATH: &str = ".config/excov/config.yaml";

/// Root configuration for excov
#[derive(Debug, Clone, Facet)]
pub struct Config {
    /// Example/test directory pairs to check
    #[facet(default)]
    pub validations: Vec<ValidationConfig>,
}

/// One examples directory checked against one tests directory
#[derive(Debug, Clone, Facet)]
pub struct ValidationConfig {
    /// Name shown in reports
    pub name: String,

    /// Directory whose subdirectories are the examples
    pub examples_dir: String,

    /// Directory holding the test files
    pub tests_dir: String,

    /// Substring a test file name must contain to be scanned
    pub filter: String,

    /// Skip unreadable test files instead of failing
    #[facet(default)]
    pub lenient: bool,
}

impl ValidationConfig {
    /// Examples directory, resolved against `base`
    pub fn examples_path(&self, base: &Path) -> PathBuf {
        base.join(&self.examples_dir)
    }

    /// Tests directory, resolved against `base`
    pub fn tests_path(&self, base: &Path) -> PathBuf {
        base.join(&self.tests_dir)
    }
}

impl Config {
    /// Parse a config from YAML
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        facet_yaml::from_str(yaml).map_err(|e| eyre::eyre!("Failed to parse config YAML: {}", e))
    }

    /// Load a config file
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            eyre::bail!(
                "Config file not found at {}\n\n\
                 Create a config file with your validation setup:\n\n\
                 validations:\n  \
                   - name: my-module\n    \
                     examples_dir: ../../examples\n    \
                     tests_dir: ../../tests\n    \
                     filter: _test",
                path.display()
            );
        }

        let content = std::fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml(&content)
            .wrap_err_with(|| format!("Failed to parse config file: {}", path.display()))?;

        if config.validations.is_empty() {
            eyre::bail!("Config file {} defines no validations", path.display());
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config = Config::from_yaml(
            r#"
validations:
  - name: network
    examples_dir: ../examples
    tests_dir: ../tests
    filter: _test.cfg
  - name: storage
    examples_dir: storage/examples
    tests_dir: storage/tests
    filter: .tftest.hcl
    lenient: true
"#,
        )
        .unwrap();

        assert_eq!(config.validations.len(), 2);
        let network = &config.validations[0];
        assert_eq!(network.name, "network");
        assert_eq!(network.filter, "_test.cfg");
        assert!(!network.lenient);
        assert!(config.validations[1].lenient);
    }

    #[test]
    fn test_paths_resolve_against_base() {
        let validation = ValidationConfig {
            name: "network".to_string(),
            examples_dir: "../examples".to_string(),
            tests_dir: "tests".to_string(),
            filter: "_test".to_string(),
            lenient: false,
        };

        let base = Path::new("/repo/.config/excov");
        assert_eq!(
            validation.examples_path(base),
            PathBuf::from("/repo/.config/excov/../examples")
        );
        assert_eq!(
            validation.tests_path(base),
            PathBuf::from("/repo/.config/excov/tests")
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_paths_win() {
        let validation = ValidationConfig {
            name: "abs".to_string(),
            examples_dir: "/srv/examples".to_string(),
            tests_dir: "/srv/tests".to_string(),
            filter: "_test".to_string(),
            lenient: false,
        };

        let base = Path::new("/repo");
        assert_eq!(
            validation.examples_path(base),
            PathBuf::from("/srv/examples")
        );
    }

    #[test]
    fn test_default_location_reaches_module_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("examples/basic")).unwrap();
        std::fs::create_dir_all(dir.path().join("tests")).unwrap();
        let config_path = dir.path().join(DEFAULT_CONFIG_PATH);
        std::fs::create_dir_all(config_path.parent().unwrap()).unwrap();
        std::fs::write(
            &config_path,
            "validations:\n  - name: module\n    examples_dir: ../../examples\n    tests_dir: ../../tests\n    filter: _test\n",
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        let base = config_path.parent().unwrap();
        let validation = &config.validations[0];
        assert!(validation.examples_path(base).join("basic").is_dir());
        assert!(validation.tests_path(base).is_dir());
    }

    #[test]
    fn test_missing_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(&dir.path().join("config.yaml")).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_empty_config_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "validations: []\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("defines no validations"));
    }
}

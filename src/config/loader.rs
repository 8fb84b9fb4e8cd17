//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading policy
//! profiles from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};
use crate::models::Policy;

use super::types::PoliciesConfig;

/// Loads and provides access to policy profiles.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// └── policies.yaml   # Named policy profiles + default profile
/// ```
///
/// # Example
///
/// ```no_run
/// use attendance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let policy = loader.profile("strict_daily").unwrap();
/// println!("Cycle: {:?}", policy.cycle);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PoliciesConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if `policies.yaml` is missing, contains invalid
    /// YAML, or its `default_profile` does not name an existing profile.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let policies_path = path.join("policies.yaml");
        let config = Self::load_yaml::<PoliciesConfig>(&policies_path)?;

        if !config.profiles.contains_key(&config.default_profile) {
            return Err(EngineError::PolicyNotFound {
                profile: config.default_profile.clone(),
            });
        }

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a policy profile by name.
    pub fn profile(&self, name: &str) -> EngineResult<&Policy> {
        self.config
            .profiles
            .get(name)
            .ok_or_else(|| EngineError::PolicyNotFound {
                profile: name.to_string(),
            })
    }

    /// Gets the default policy profile.
    ///
    /// Presence is checked at load time, so this only fails when the
    /// loader was constructed from an inconsistent config.
    pub fn default_profile(&self) -> EngineResult<&Policy> {
        self.profile(&self.config.default_profile)
    }

    /// Names of all loaded profiles.
    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.config.profiles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AttendanceMode, CalcCycle, DaysInMonthPolicy};

    fn config_path() -> &'static str {
        "./config/default"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
    }

    #[test]
    fn test_default_profile_resolves() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.default_profile().unwrap();
        assert_eq!(policy.mode, AttendanceMode::Flexible);
        assert_eq!(policy.cycle, CalcCycle::Daily);
    }

    #[test]
    fn test_strict_profiles_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();

        let daily = loader.profile("strict_daily").unwrap();
        assert_eq!(daily.mode, AttendanceMode::Strict);
        assert_eq!(daily.cycle, CalcCycle::Daily);
        assert!(daily.overtime_enabled);

        let monthly = loader.profile("strict_monthly").unwrap();
        assert_eq!(monthly.cycle, CalcCycle::Monthly);
        assert_eq!(
            monthly.days_in_month_policy,
            DaysInMonthPolicy::CalendarMonth
        );
    }

    #[test]
    fn test_na_profile_loaded() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.profile("not_applicable").unwrap();
        assert_eq!(policy.mode, AttendanceMode::Na);
        assert!(!policy.overtime_enabled);
    }

    #[test]
    fn test_unknown_profile_returns_error() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let result = loader.profile("unknown");
        match result {
            Err(EngineError::PolicyNotFound { profile }) => assert_eq!(profile, "unknown"),
            _ => panic!("Expected PolicyNotFound error"),
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("policies.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }
}

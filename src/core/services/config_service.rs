use crate::AppError;
use crate::error::{CliError, ConfigError};
use crate::storage::config::{Config, Profile};
use crate::utils::validation::validate_url;
use std::path::PathBuf;

/// Configuration service for managing application configuration
pub struct ConfigService {
    config: Config,
}

impl ConfigService {
    /// Create new ConfigService instance
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Get profile by name
    pub fn get_profile(&self, name: &str) -> Option<&Profile> {
        self.config.profiles.get(name)
    }

    /// Get default profile name
    pub fn get_default_profile(&self) -> Option<&String> {
        self.config.default_profile.as_ref()
    }

    /// Set profile field value
    pub fn set_profile_field(
        &mut self,
        profile: &str,
        field: &str,
        value: &str,
    ) -> Result<(), AppError> {
        // Validate before touching the profile so a bad value never creates an entry
        let timeout = match field {
            "url" => {
                validate_url(value)?;
                None
            }
            "timeout" => Some(value.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                field: field.to_string(),
                value: value.to_string(),
                reason: "timeout must be a whole number of seconds".to_string(),
            })?),
            _ => {
                return Err(AppError::Cli(CliError::InvalidArguments(format!(
                    "Unknown field: {}. Use 'url' or 'timeout'",
                    field
                ))));
            }
        };

        let profile_entry = self
            .config
            .profiles
            .entry(profile.to_string())
            .or_default();

        match timeout {
            Some(0) => profile_entry.timeout_seconds = None,
            Some(secs) => profile_entry.timeout_seconds = Some(secs),
            None => profile_entry.url = value.trim_end_matches('/').to_string(),
        }

        if self.config.default_profile.is_none() {
            self.config.default_profile = Some(profile.to_string());
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save_config(&self, path: Option<PathBuf>) -> Result<(), AppError> {
        self.config.save(path).map_err(|e| e.into())
    }

    /// List all profiles, sorted by name
    pub fn list_profiles(&self) -> Vec<(&String, &Profile)> {
        let mut profiles: Vec<_> = self.config.profiles.iter().collect();
        profiles.sort_by(|a, b| a.0.cmp(b.0));
        profiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_get_profile_on_empty_config() {
        let service = ConfigService::new(Config::default());
        assert!(service.get_profile("default").is_none());
        assert!(service.get_default_profile().is_none());
        assert!(service.list_profiles().is_empty());
    }

    #[test]
    fn test_set_profile_url() {
        let mut service = ConfigService::new(Config::default());

        let result = service.set_profile_field("default", "url", "http://localhost:9090/");
        assert!(result.is_ok());

        let profile = service.get_profile("default").expect("profile created");
        assert_eq!(profile.url, "http://localhost:9090");
        assert_eq!(profile.timeout_seconds, None);
        // First profile written becomes the default
        assert_eq!(service.get_default_profile(), Some(&"default".to_string()));
    }

    #[test]
    fn test_set_profile_timeout() {
        let mut service = ConfigService::new(Config::default());

        service
            .set_profile_field("staging", "timeout", "15")
            .expect("timeout accepted");
        let profile = service.get_profile("staging").expect("profile created");
        assert_eq!(profile.timeout_seconds, Some(15));
        assert_eq!(profile.url, "http://localhost:8080");

        // Zero clears the timeout
        service
            .set_profile_field("staging", "timeout", "0")
            .expect("timeout accepted");
        assert_eq!(service.get_profile("staging").unwrap().timeout_seconds, None);
    }

    #[test]
    fn test_set_profile_field_rejects_bad_input() {
        let mut service = ConfigService::new(Config::default());

        let result = service.set_profile_field("test", "host", "http://example.com");
        assert!(format!("{:?}", result).contains("Unknown field: host"));

        let result = service.set_profile_field("test", "url", "example.com");
        assert!(result.is_err());

        let result = service.set_profile_field("test", "timeout", "soon");
        assert!(matches!(
            result,
            Err(AppError::Config(ConfigError::InvalidValue { .. }))
        ));

        // Rejected values never create the profile
        assert!(service.get_profile("test").is_none());
    }

    #[test]
    fn test_save_config_round_trip() {
        let temp_dir = tempdir().expect("Failed to create temp dir");
        let path = temp_dir.path().join("config.toml");

        let mut service = ConfigService::new(Config::default());
        service
            .set_profile_field("local", "url", "http://127.0.0.1:8080")
            .unwrap();
        service.save_config(Some(path.clone())).expect("saved");

        let reloaded = Config::load(Some(path)).expect("loaded");
        assert_eq!(reloaded.default_profile.as_deref(), Some("local"));
        assert_eq!(reloaded.get_profile("local").unwrap().url, "http://127.0.0.1:8080");
    }
}

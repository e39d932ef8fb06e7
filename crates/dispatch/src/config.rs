use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::error::Result;

/// Event manifest listing accessors to register up front
///
/// ```json
/// { "events": ["user.created", "user.deleted"] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    /// Event accessors to register
    #[serde(default)]
    pub events: Vec<String>,
}

impl DispatcherConfig {
    /// Read the manifest, falling back to defaults when it is missing or invalid
    pub fn read(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "Config file does not exist, using defaults");
            return Self::default();
        }

        match Self::load(path) {
            Ok(config) => {
                debug!(path = %path.display(), events = config.events.len(), "Config loaded successfully");
                config
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Read the manifest, surfacing IO and parse errors
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the manifest as pretty JSON, creating parent directories
    pub fn write(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        debug!(path = %path.display(), "Config saved successfully");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = DispatcherConfig::default();
        assert!(config.events.is_empty());
    }

    #[test]
    fn test_config_read_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let config = DispatcherConfig::read(&temp_dir.path().join("events.json"));
        assert!(config.events.is_empty());
    }

    #[test]
    fn test_config_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("events.json");

        let config = DispatcherConfig {
            events: vec!["user.created".to_string(), "user.deleted".to_string()],
        };
        config.write(&path).unwrap();

        let loaded = DispatcherConfig::read(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_invalid_json_falls_back() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("events.json");
        fs::write(&path, "{ not json").unwrap();

        let config = DispatcherConfig::read(&path);
        assert!(config.events.is_empty());

        let err = DispatcherConfig::load(&path).unwrap_err();
        assert!(matches!(err, DispatchError::Json(_)));
    }

    #[test]
    fn test_config_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = DispatcherConfig::load(&temp_dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, DispatchError::Io(_)));
    }

    #[test]
    fn test_config_missing_events_field() {
        let config: DispatcherConfig = serde_json::from_str("{}").unwrap();
        assert!(config.events.is_empty());
    }
}

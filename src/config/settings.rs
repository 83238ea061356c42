use std::path::PathBuf;
use std::str::FromStr;

use log::warn;

const STORAGE_ENV: &str = "VOLLEYMATE_STORAGE";
const DATA_PATH_ENV: &str = "VOLLEYMATE_DATA_PATH";
const STORAGE_KEY_ENV: &str = "VOLLEYMATE_STORAGE_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    File,
    Sqlite,
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "sqlite" => Ok(StorageBackend::Sqlite),
            "memory" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub backend: StorageBackend,
    /// Directory for file storage, database file for SQLite
    pub path: PathBuf,
    pub key: String,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from("data"),
            key: "volleymate_pro_data_v1".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub default_fee: f64,
    pub default_team_count: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            default_fee: 150.0,
            default_team_count: 2,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ExportSettings {
    pub male_marker: String,
    pub female_marker: String,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            male_marker: "男".to_string(),
            female_marker: "女".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub storage: StorageSettings,
    pub session: SessionSettings,
    pub export: ExportSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with storage overridden from the environment
    pub fn from_env() -> Self {
        let mut config = Self::new();
        config.storage = storage_from_env(config.storage);
        config
    }
}

fn storage_from_env(mut storage: StorageSettings) -> StorageSettings {
    if let Ok(raw) = std::env::var(STORAGE_ENV) {
        match raw.parse() {
            Ok(backend) => storage.backend = backend,
            Err(e) => warn!("Ignoring {}: {}", STORAGE_ENV, e),
        }
    }

    if let Ok(path) = std::env::var(DATA_PATH_ENV) {
        storage.path = PathBuf::from(path);
    } else if storage.backend == StorageBackend::Sqlite {
        storage.path = PathBuf::from("volleymate.db");
    }

    if let Ok(key) = std::env::var(STORAGE_KEY_ENV) {
        storage.key = key;
    }

    storage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scoreboard_conventions() {
        let config = AppConfig::new();
        assert_eq!(config.session.default_fee, 150.0);
        assert_eq!(config.session.default_team_count, 2);
        assert_eq!(config.storage.key, "volleymate_pro_data_v1");
        assert_eq!(config.export.male_marker, "男");
    }

    #[test]
    fn test_storage_backend_parses_case_insensitively() {
        assert_eq!("SQLite".parse::<StorageBackend>(), Ok(StorageBackend::Sqlite));
        assert!("redis".parse::<StorageBackend>().is_err());
    }
}

pub mod settings;

pub use settings::{AppConfig, ExportSettings, SessionSettings, StorageBackend, StorageSettings};

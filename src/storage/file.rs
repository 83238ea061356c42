use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};

use super::Transport;
use crate::errors::with_storage_context;

/// File-based blob store, one JSON file per key
pub struct FileTransport {
    data_dir: PathBuf,
    key: String,
}

impl FileTransport {
    /// Create a new file transport
    pub fn new<P: AsRef<Path>>(data_dir: P, key: &str) -> Result<Self> {
        let data_dir = data_dir.as_ref().to_path_buf();

        // Create data directory if it doesn't exist
        fs::create_dir_all(&data_dir).context("Failed to create data directory")?;

        Ok(Self {
            data_dir,
            key: key.to_string(),
        })
    }

    pub fn path(&self) -> PathBuf {
        self.build_path("json")
    }

    fn build_path(&self, extension: &str) -> PathBuf {
        self.data_dir.join(format!("{}.{}", self.key, extension))
    }
}

impl Transport for FileTransport {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        let path = self.path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = with_storage_context(fs::read(&path), "read", &self.key)?;

        info!("Loaded data from file: {}", path.display());
        Ok(Some(bytes))
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        let path = self.path();
        let temp_path = self.build_path("json.tmp");

        // Write aside, then swap in
        with_storage_context(fs::write(&temp_path, bytes), "write", &self.key)?;
        with_storage_context(fs::rename(&temp_path, &path), "replace", &self.key)?;

        debug!("Saved data to file: {}", path.display());
        Ok(())
    }
}

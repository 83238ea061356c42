mod file;
mod memory;
pub mod repository;
mod sqlite;

use anyhow::Result;

pub use file::FileTransport;
pub use memory::MemoryTransport;
pub use repository::SessionRepository;
pub use sqlite::SqliteTransport;

use crate::config::{StorageBackend, StorageSettings};

/// Key/value blob store holding one serialized document
pub trait Transport {
    fn load(&self) -> Result<Option<Vec<u8>>>;
    fn save(&self, bytes: &[u8]) -> Result<()>;
}

/// Build the transport named by the storage settings
pub fn open_transport(settings: &StorageSettings) -> Result<Box<dyn Transport>> {
    let transport: Box<dyn Transport> = match settings.backend {
        StorageBackend::File => Box::new(FileTransport::new(&settings.path, &settings.key)?),
        StorageBackend::Sqlite => {
            let path = settings.path.to_string_lossy();
            Box::new(SqliteTransport::open(&path, &settings.key)?)
        }
        StorageBackend::Memory => Box::new(MemoryTransport::new()),
    };
    Ok(transport)
}

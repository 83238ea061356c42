use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::Transport;

/// In-process blob; clones share the same slot and write counter
#[derive(Debug, Clone, Default)]
pub struct MemoryTransport {
    blob: Rc<RefCell<Option<Vec<u8>>>>,
    writes: Rc<Cell<usize>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            blob: Rc::new(RefCell::new(Some(bytes.into()))),
            writes: Rc::default(),
        }
    }

    pub fn contents(&self) -> Option<Vec<u8>> {
        self.blob.borrow().clone()
    }

    /// Number of successful saves since creation
    pub fn write_count(&self) -> usize {
        self.writes.get()
    }
}

impl Transport for MemoryTransport {
    fn load(&self) -> Result<Option<Vec<u8>>> {
        Ok(self.contents())
    }

    fn save(&self, bytes: &[u8]) -> Result<()> {
        *self.blob.borrow_mut() = Some(bytes.to_vec());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use stockroom_core::DomainError;

/// Failures while synchronizing the inventory with its backing file.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The backing file does not exist yet. Callers may continue with an
    /// empty inventory; the first save creates the file.
    #[error("inventory file not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// A record line could not be turned into a stock item.
    #[error("malformed record at {}:{line}: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        #[source]
        source: DomainError,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StorageError {
    /// Whether the caller can carry on with the (empty) in-memory inventory.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }
}

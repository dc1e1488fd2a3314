use doc_collection::errors::{CollectionError, ErrorKind};
use fjall::LsmError;
use thiserror::Error;

/// Errors raised inside the fjall adapter.
///
/// They never leave the adapter as-is: every public entry point converts them to
/// [CollectionError].
#[derive(Error, Debug)]
pub enum FjallAdapterError {
    /// The storage engine failed
    #[error("Fjall error: {0}")]
    Fjall(#[from] fjall::Error),
    /// A document could not be encoded for storage
    #[error("Serialization failed: {0}")]
    Serialization(String),
    /// Stored bytes could not be decoded into a document
    #[error("Deserialization failed: {0}")]
    Deserialization(String),
    /// A stored key is not valid UTF-8
    #[error("Invalid UTF-8 in stored key: {0}")]
    InvalidUtf8(String),
    /// A key the engine cannot store
    #[error("Invalid key: {0}")]
    InvalidKey(String),
    /// A keyspace or partition name the engine cannot use
    #[error("Invalid name: {0}")]
    InvalidName(String),
    /// The store was closed
    #[error("Store {0} is closed")]
    Closed(String),
}

/// Result type of adapter internals.
pub type FjallResult<T> = Result<T, FjallAdapterError>;

impl From<FjallAdapterError> for CollectionError {
    fn from(err: FjallAdapterError) -> Self {
        let kind = match &err {
            FjallAdapterError::Fjall(inner) => fjall_error_kind(inner),
            FjallAdapterError::Serialization(_)
            | FjallAdapterError::Deserialization(_)
            | FjallAdapterError::InvalidUtf8(_) => ErrorKind::EncodingError,
            FjallAdapterError::InvalidKey(_) => ErrorKind::InvalidId,
            FjallAdapterError::InvalidName(_) => ErrorKind::InvalidConfiguration,
            FjallAdapterError::Closed(_) => ErrorKind::StoreAlreadyClosed,
        };
        CollectionError::new(&err.to_string(), kind)
    }
}

fn fjall_error_kind(error: &fjall::Error) -> ErrorKind {
    match error {
        fjall::Error::Io(_) => ErrorKind::IOError,
        fjall::Error::Storage(inner) => lsm_error_kind(inner),
        fjall::Error::Encode(_) => ErrorKind::EncodingError,
        fjall::Error::Decode(_)
        | fjall::Error::JournalRecovery(_)
        | fjall::Error::InvalidVersion(_) => ErrorKind::FileCorrupted,
        fjall::Error::PartitionDeleted => ErrorKind::StoreNotInitialized,
        _ => ErrorKind::BackendError,
    }
}

fn lsm_error_kind(error: &LsmError) -> ErrorKind {
    match error {
        LsmError::Io(_) => ErrorKind::IOError,
        LsmError::Encode(_) => ErrorKind::EncodingError,
        LsmError::Decode(_)
        | LsmError::Decompress(_)
        | LsmError::InvalidVersion(_)
        | LsmError::InvalidChecksum(_)
        | LsmError::Unrecoverable => ErrorKind::FileCorrupted,
        _ => ErrorKind::BackendError,
    }
}

use crate::error::{FjallAdapterError, FjallResult};
use doc_collection::collection::Document;
use fjall::Slice;

/// Byte encoding of documents and ids stored in a partition.
///
/// Documents are encoded with bincode (legacy configuration) through serde; ids
/// are stored as their UTF-8 bytes.
pub(crate) struct DocumentCodec;

impl DocumentCodec {
    // the engine limits keys to u16::MAX bytes
    const MAX_KEY_LEN: usize = u16::MAX as usize;

    pub(crate) fn encode_key(key: &str) -> FjallResult<&[u8]> {
        if key.is_empty() {
            return Err(FjallAdapterError::InvalidKey("key cannot be empty".to_string()));
        }
        if key.len() > Self::MAX_KEY_LEN {
            return Err(FjallAdapterError::InvalidKey(format!(
                "key of {} bytes exceeds {} bytes",
                key.len(),
                Self::MAX_KEY_LEN
            )));
        }
        Ok(key.as_bytes())
    }

    pub(crate) fn decode_key(bytes: &Slice) -> FjallResult<String> {
        std::str::from_utf8(bytes)
            .map(str::to_string)
            .map_err(|e| FjallAdapterError::InvalidUtf8(e.to_string()))
    }

    pub(crate) fn encode_document(document: &Document) -> FjallResult<Vec<u8>> {
        bincode::serde::encode_to_vec(document, bincode::config::legacy())
            .map_err(|e| FjallAdapterError::Serialization(e.to_string()))
    }

    pub(crate) fn decode_document(bytes: &[u8]) -> FjallResult<Document> {
        bincode::serde::decode_from_slice(bytes, bincode::config::legacy())
            .map(|(document, _)| document)
            .map_err(|e| FjallAdapterError::Deserialization(e.to_string()))
    }
}

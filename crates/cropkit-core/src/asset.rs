//! Upload asset contract.
//!
//! A cropped image leaves the toolkit as an [`Asset`]: something with a MIME
//! type, a file name and a byte stream of known length. The transport that
//! consumes it lives outside this crate.

use std::io::{Cursor, Read};

/// A piece of content that can be uploaded.
pub trait Asset {
    /// MIME type of the content, e.g. `image/jpeg`.
    fn mime_type(&self) -> &str;

    fn file_name(&self) -> &str;

    /// A fresh reader over the whole content.
    fn data_stream(&self) -> Box<dyn Read + '_>;

    /// Length of [`Asset::data_stream`] in bytes, when known up front.
    fn data_length(&self) -> Option<u64>;
}

/// Asset backed by bytes already in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryAsset {
    mime_type: String,
    file_name: String,
    bytes: Vec<u8>,
}

impl MemoryAsset {
    pub fn new(mime_type: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime_type: mime_type.into(),
            file_name: file_name.into(),
            bytes,
        }
    }

    /// JPEG-encoded image data.
    pub fn jpeg(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::new("image/jpeg", file_name, bytes)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Asset for MemoryAsset {
    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn file_name(&self) -> &str {
        &self.file_name
    }

    fn data_stream(&self) -> Box<dyn Read + '_> {
        Box::new(Cursor::new(self.bytes.as_slice()))
    }

    fn data_length(&self) -> Option<u64> {
        Some(self.bytes.len() as u64)
    }
}

//! Capabilities the core needs from its surroundings.
//!
//! Reading an uploaded file and delivering an export are the only side
//! effects around this crate. Both are injected through these traits so the
//! core itself never touches a file system.

use crate::error::ImportError;

// ---------------------------------------------------------------------------
// File source
// ---------------------------------------------------------------------------

/// Something that can hand over a named file.
pub trait FileSource {
    /// Read the whole file.
    fn read(&self) -> anyhow::Result<SourceFile>;
}

/// A file as provided by a [`FileSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Original file name; its extension selects the import format.
    pub filename: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(filename: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            filename: filename.into(),
            bytes: bytes.into(),
        }
    }

    /// Decode the contents as UTF-8. A leading byte-order mark is dropped.
    pub fn into_text(self) -> Result<String, ImportError> {
        let mut text = String::from_utf8(self.bytes)?;
        if text.starts_with('\u{feff}') {
            text.drain(..'\u{feff}'.len_utf8());
        }
        Ok(text)
    }
}

/// An in-memory source, mostly for tests.
impl FileSource for SourceFile {
    fn read(&self) -> anyhow::Result<SourceFile> {
        Ok(self.clone())
    }
}

// ---------------------------------------------------------------------------
// Export sink
// ---------------------------------------------------------------------------

/// Something that delivers an export payload (a download, a file, storage).
pub trait ExportSink {
    fn deliver(&mut self, payload: ExportPayload) -> anyhow::Result<()>;
}

/// A finished export, ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPayload {
    pub filename: String,
    pub mime_type: String,
    pub payload: String,
}

/// Collects payloads in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub delivered: Vec<ExportPayload>,
}

impl ExportSink for MemorySink {
    fn deliver(&mut self, payload: ExportPayload) -> anyhow::Result<()> {
        self.delivered.push(payload);
        Ok(())
    }
}

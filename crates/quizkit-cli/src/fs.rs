//! Filesystem-backed source and sink.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quizkit_core::traits::{ExportPayload, ExportSink, FileSource, SourceFile};

/// Reads an import file from disk.
pub struct FsSource {
    path: PathBuf,
}

impl FsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FileSource for FsSource {
    fn read(&self) -> Result<SourceFile> {
        let bytes = std::fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;
        let filename = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string());
        Ok(SourceFile::new(filename, bytes))
    }
}

/// Writes payloads to disk.
///
/// If the target is an existing directory, the payload's own file name is
/// used inside it. Otherwise the target is the file path.
pub struct FsSink {
    target: PathBuf,
    written: Vec<PathBuf>,
}

impl FsSink {
    pub fn new(target: impl Into<PathBuf>) -> Self {
        Self {
            target: target.into(),
            written: Vec::new(),
        }
    }

    /// Paths written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn destination(&self, filename: &str) -> PathBuf {
        if self.target.is_dir() {
            self.target.join(filename)
        } else {
            self.target.clone()
        }
    }
}

impl ExportSink for FsSink {
    fn deliver(&mut self, payload: ExportPayload) -> Result<()> {
        let path = self.destination(&payload.filename);
        write_file(&path, &payload.payload)?;
        tracing::debug!(path = %path.display(), mime = %payload.mime_type, "wrote export");
        self.written.push(path);
        Ok(())
    }
}

/// Write `contents`, creating parent directories as needed.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

use std::path::{Path, PathBuf};

use crate::export::pipeline::ExportedFile;
use crate::foundation::error::{PolishError, PolishResult};

/// Destination for finished exports.
pub trait ExportSink {
    /// Deliver one file. Failures surface as `SerializationFailure`.
    fn deliver(&mut self, file: &ExportedFile) -> PolishResult<()>;
}

/// Keeps delivered files in memory.
#[derive(Debug, Default)]
pub struct InMemorySink {
    pub files: Vec<ExportedFile>,
}

impl ExportSink for InMemorySink {
    fn deliver(&mut self, file: &ExportedFile) -> PolishResult<()> {
        self.files.push(file.clone());
        Ok(())
    }
}

/// Writes each file into a directory under its generated name.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
    last: Option<PathBuf>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            last: None,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the most recently written file.
    pub fn last_written(&self) -> Option<&Path> {
        self.last.as_deref()
    }
}

impl ExportSink for DirectorySink {
    fn deliver(&mut self, file: &ExportedFile) -> PolishResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            PolishError::serialization(format!("create '{}': {e}", self.dir.display()))
        })?;
        let path = self.dir.join(&file.file_name);
        std::fs::write(&path, &file.bytes)
            .map_err(|e| PolishError::serialization(format!("write '{}': {e}", path.display())))?;
        tracing::debug!(path = %path.display(), bytes = file.bytes.len(), "export written");
        self.last = Some(path);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;

use std::path::{Path, PathBuf};

use crate::{
    export::png::ExportedFile,
    foundation::error::{CoverError, CoverResult},
};

/// Destination for exported covers.
pub trait DownloadSink {
    /// Store or hand off one exported file.
    fn deliver(&mut self, file: &ExportedFile) -> CoverResult<()>;
}

/// Writes each file into a directory, replacing files of the same name.
#[derive(Clone, Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl DirectorySink {
    /// Sink writing into `dir`, created on first delivery.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Target directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Paths written so far, in delivery order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl DownloadSink for DirectorySink {
    /// Store or hand off one exported file.
    fn deliver(&mut self, file: &ExportedFile) -> CoverResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            CoverError::export(format!("create export dir '{}': {e}", self.dir.display()))
        })?;
        let path = self.dir.join(&file.file_name);
        std::fs::write(&path, &file.png)
            .map_err(|e| CoverError::export(format!("write '{}': {e}", path.display())))?;
        tracing::info!(path = %path.display(), width = file.width, height = file.height, "wrote cover");
        self.written.push(path);
        Ok(())
    }
}

/// Keeps delivered files in memory.
#[derive(Clone, Debug, Default)]
pub struct MemorySink {
    /// Delivered files, in order.
    pub files: Vec<ExportedFile>,
}

impl DownloadSink for MemorySink {
    /// Store or hand off one exported file.
    fn deliver(&mut self, file: &ExportedFile) -> CoverResult<()> {
        self.files.push(file.clone());
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;

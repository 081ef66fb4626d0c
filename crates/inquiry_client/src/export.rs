use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use inquiry_core::export_filename;
use inquiry_logging::inquiry_info;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("export directory missing or not writable: {0}")]
    ExportDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Writes CSV exports into one directory, replacing same-day files atomically.
#[derive(Debug, Clone)]
pub struct ExportWriter {
    dir: PathBuf,
}

impl ExportWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Writes `contents` as `inquiry-results-<date>.csv` and returns its path.
    pub fn write_csv(&self, date: NaiveDate, contents: &str) -> Result<PathBuf, ExportError> {
        prepare_dir(&self.dir)?;

        let target = self.dir.join(export_filename(date));
        let mut staging = NamedTempFile::new_in(&self.dir)?;
        staging.write_all(contents.as_bytes())?;
        staging.flush()?;
        staging.as_file_mut().sync_all()?;

        staging
            .persist(&target)
            .map_err(|err| ExportError::Io(err.error))?;
        inquiry_info!("Exported results to {:?}", target);
        Ok(target)
    }
}

fn prepare_dir(dir: &Path) -> Result<(), ExportError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| ExportError::ExportDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(ExportError::ExportDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|e| ExportError::ExportDir(e.to_string()))
}

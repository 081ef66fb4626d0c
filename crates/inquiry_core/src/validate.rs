use std::path::PathBuf;

use thiserror::Error;

/// Upload size ceiling (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Extensions accepted for upload, compared case-insensitively.
pub const ALLOWED_EXTENSIONS: [&str; 2] = ["csv", "json"];

/// Metadata for the file the user picked.
///
/// `location` is an opaque handle the IO side uses to read the bytes; the
/// validator only looks at `name` and `size`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub location: PathBuf,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, size: u64, location: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            location: location.into(),
        }
    }

    /// Substring after the last `.`; the whole name when there is none.
    pub fn extension(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((_, ext)) => ext,
            None => &self.name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload only CSV or JSON files (got .{extension}).")]
    UnsupportedType { extension: String },
    #[error("File size must be less than 5MB ({size} bytes, limit {max_bytes}).")]
    TooLarge { size: u64, max_bytes: u64 },
}

/// Checks type, then size. Pure function of the file metadata.
pub fn validate(file: &SelectedFile) -> Result<(), ValidationError> {
    let extension = file.extension();
    let allowed = ALLOWED_EXTENSIONS
        .iter()
        .any(|candidate| candidate.eq_ignore_ascii_case(extension));
    if !allowed {
        return Err(ValidationError::UnsupportedType {
            extension: extension.to_ascii_lowercase(),
        });
    }

    if file.size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::TooLarge {
            size: file.size,
            max_bytes: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}

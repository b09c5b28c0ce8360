use std::borrow::Cow;
use std::path::{Path, PathBuf};

use crate::error::ThumbnailerError;
use crate::thumbnail::ImageOrigin;

/// Where the encoded bytes of a source image live
#[derive(Debug, Clone)]
pub enum SourceLocation {
    /// A staged file on disk
    File(PathBuf),
    /// Bytes already in memory
    Memory(Vec<u8>),
}

/// One image to turn into a thumbnail
#[derive(Debug, Clone)]
pub struct SourceItem {
    pub origin: ImageOrigin,
    pub location: SourceLocation,
}

impl SourceItem {
    pub fn from_file(id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self {
            origin: ImageOrigin::new(id, file_name),
            location: SourceLocation::File(path),
        }
    }

    pub fn from_bytes(
        id: impl Into<String>,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            origin: ImageOrigin::new(id, file_name),
            location: SourceLocation::Memory(bytes),
        }
    }

    pub fn id(&self) -> &str {
        &self.origin.id
    }

    /// Staged path, if the bytes live on disk
    pub fn path(&self) -> Option<&Path> {
        match &self.location {
            SourceLocation::File(path) => Some(path),
            SourceLocation::Memory(_) => None,
        }
    }

    pub fn read(&self) -> Result<Cow<'_, [u8]>, ThumbnailerError> {
        match &self.location {
            SourceLocation::File(path) => std::fs::read(path).map(Cow::Owned).map_err(|e| {
                ThumbnailerError::SourceRead {
                    id: self.origin.id.clone(),
                    source: e,
                }
            }),
            SourceLocation::Memory(bytes) => Ok(Cow::Borrowed(bytes)),
        }
    }
}

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use super::ObjectStore;
use crate::error::ThumbnailerError;

/// Object store backed by a directory: objects land at `<root>/<bucket>/<key>`.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    root: PathBuf,
    bucket: String,
}

impl LocalObjectStore {
    pub fn new(root: impl Into<PathBuf>, bucket: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            bucket: bucket.into(),
        }
    }

    /// Open the store, creating the bucket directory if needed.
    pub fn create(
        root: impl Into<PathBuf>,
        bucket: impl Into<String>,
    ) -> Result<Self, ThumbnailerError> {
        let store = Self::new(root, bucket);
        let dir = store.bucket_dir();
        fs::create_dir_all(&dir).map_err(|e| ThumbnailerError::OutputWrite {
            path: dir,
            source: e,
        })?;
        Ok(store)
    }

    pub fn bucket_dir(&self) -> PathBuf {
        self.root.join(&self.bucket)
    }

    /// Filesystem path an object key maps to
    pub fn object_path(&self, key: &str) -> PathBuf {
        key.split('/')
            .filter(|part| !part.is_empty() && *part != "." && *part != "..")
            .fold(self.bucket_dir(), |path, part| path.join(part))
    }
}

impl ObjectStore for LocalObjectStore {
    fn bucket(&self) -> &str {
        &self.bucket
    }

    fn bucket_exists(&self) -> Result<bool, ThumbnailerError> {
        Ok(self.bucket_dir().is_dir())
    }

    fn put_object(
        &self,
        key: &str,
        bytes: &[u8],
        _content_type: &str,
    ) -> Result<(), ThumbnailerError> {
        let path = self.object_path(key);
        if let Some(parent) = path.parent() {
            create_parent(parent)?;
        }

        fs::write(&path, bytes).map_err(|e| ThumbnailerError::OutputWrite {
            path: path.clone(),
            source: e,
        })?;
        debug!("Stored {} ({} bytes)", path.display(), bytes.len());

        Ok(())
    }
}

fn create_parent(dir: &Path) -> Result<(), ThumbnailerError> {
    fs::create_dir_all(dir).map_err(|e| ThumbnailerError::OutputWrite {
        path: dir.to_path_buf(),
        source: e,
    })
}

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::ThumbnailerError;

/// Scratch directory holding downloaded assets and generated thumbnails for
/// one run.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Recreate `root` as an empty directory.
    pub fn prepare(root: &Path) -> Result<Self, ThumbnailerError> {
        let to_write_error = |e| ThumbnailerError::OutputWrite {
            path: root.to_path_buf(),
            source: e,
        };

        if root.exists() {
            fs::remove_dir_all(root).map_err(to_write_error)?;
        }
        fs::create_dir_all(root).map_err(to_write_error)?;

        debug!("Prepared workspace {}", root.display());
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a file directly under the workspace root.
    pub fn write(&self, file_name: &str, bytes: &[u8]) -> Result<PathBuf, ThumbnailerError> {
        let name = Path::new(file_name)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "unnamed".into());
        let path = self.root.join(name);

        fs::write(&path, bytes).map_err(|e| ThumbnailerError::OutputWrite {
            path: path.clone(),
            source: e,
        })?;

        Ok(path)
    }
}

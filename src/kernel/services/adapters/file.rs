//! 本地文件系统 Provider

use crate::kernel::services::ports::file::{FileError, FileProvider, Result};
use std::fs;
use std::path::Path;

pub struct LocalFileProvider;

impl LocalFileProvider {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFileProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl FileProvider for LocalFileProvider {
    fn scheme(&self) -> &'static str {
        "file"
    }

    fn read_file_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        if path.is_dir() {
            return Err(FileError::IsDirectory(path.to_path_buf()));
        }
        fs::read(path).map_err(|e| FileError::from_io(e, path))
    }

    fn write_file_bytes(&self, path: &Path, content: &[u8]) -> Result<()> {
        if path.is_dir() {
            return Err(FileError::IsDirectory(path.to_path_buf()));
        }
        fs::write(path, content).map_err(|e| FileError::from_io(e, path))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/file.rs"]
mod tests;

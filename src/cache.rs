//! Local cache for the downloaded dataset
//!
//! The cache is a single JSON file (`attack.json` by default). When it is
//! present it is read as-is; when it is missing the dataset is fetched from a
//! [`DatasetSource`] and written next to where it will be read from.
//!
//! Writes go to a sibling `.part` file that is renamed into place, so an
//! interrupted download never leaves a truncated cache behind.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::output;
use crate::source::DatasetSource;

/// Default cache file name
pub const DEFAULT_CACHE_FILE: &str = "attack.json";

/// Manages the on-disk copy of the dataset
pub struct DatasetCache {
    path: PathBuf,
}

impl DatasetCache {
    /// Create a cache manager for the given file path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Check if the cache file exists
    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Get the path to the cache file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the cached bytes
    pub fn load(&self) -> Result<Vec<u8>> {
        log::debug!("Reading cached dataset from {:?}", self.path);
        std::fs::read(&self.path).map_err(|e| Error::retrieval(self.location(), e))
    }

    /// Replace the cache contents with `bytes`
    pub fn store(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| Error::retrieval(self.location(), e))?;
        }

        let part = self.part_path();
        let written = std::fs::write(&part, bytes).and_then(|_| std::fs::rename(&part, &self.path));
        if let Err(e) = written {
            std::fs::remove_file(&part).ok();
            return Err(Error::retrieval(self.location(), e));
        }

        log::debug!("Stored {} bytes at {:?}", bytes.len(), self.path);
        Ok(())
    }

    /// Return the cached dataset, downloading it first if the file is missing
    pub async fn load_or_fetch(&self, source: &dyn DatasetSource) -> Result<Vec<u8>> {
        if self.exists() {
            return self.load();
        }

        output::info(&format!("File {} not found. Downloading.", self.path.display()));
        self.refresh(source).await
    }

    /// Download the dataset unconditionally and overwrite the cache
    pub async fn refresh(&self, source: &dyn DatasetSource) -> Result<Vec<u8>> {
        let bytes = source.fetch().await?;
        self.store(&bytes)?;
        output::info(&format!("{} bytes written to {}", bytes.len(), self.path.display()));
        Ok(bytes)
    }

    /// Delete the cache file
    pub fn clear(&self) -> Result<()> {
        if self.exists() {
            log::warn!("Removing cached dataset at {:?}", self.path);
            std::fs::remove_file(&self.path).map_err(|e| Error::retrieval(self.location(), e))?;
        }

        Ok(())
    }

    fn part_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".part");
        self.path.with_file_name(name)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

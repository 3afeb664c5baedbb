//! Display regions: where rendered output lands.
//!
//! Each write replaces the region's previous content, like assigning a
//! result container's contents. The client is the only writer.

use anyhow::Context;
use parking_lot::Mutex;
use std::io::Write;
use std::path::{Path, PathBuf};

pub trait DisplayRegion: Send + Sync {
    fn write(&self, content: &str) -> anyhow::Result<()>;
}

/// Prints each write to stdout.
#[derive(Debug, Default)]
pub struct StdoutRegion;

impl DisplayRegion for StdoutRegion {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        let mut out = std::io::stdout().lock();
        writeln!(out, "{content}")?;
        out.flush()?;
        Ok(())
    }
}

/// Overwrites a file on every write.
#[derive(Debug)]
pub struct FileRegion {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileRegion {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DisplayRegion for FileRegion {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        let _guard = self.lock.lock();
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }
}

/// Keeps every write in memory. `current()` is what a viewer would see.
#[derive(Debug, Default)]
pub struct MemoryRegion {
    writes: Mutex<Vec<String>>,
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<String> {
        self.writes.lock().last().cloned()
    }

    pub fn history(&self) -> Vec<String> {
        self.writes.lock().clone()
    }
}

impl DisplayRegion for MemoryRegion {
    fn write(&self, content: &str) -> anyhow::Result<()> {
        self.writes.lock().push(content.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_region_tracks_latest_write() {
        let region = MemoryRegion::new();
        assert!(region.current().is_none());
        region.write("Loading…").unwrap();
        region.write("Crop: rice").unwrap();
        assert_eq!(region.current().as_deref(), Some("Crop: rice"));
        assert_eq!(region.history().len(), 2);
    }

    #[test]
    fn file_region_overwrites() {
        let tmp = TempDir::new().unwrap();
        let region = FileRegion::new(tmp.path().join("result.html"));
        region.write("<p>first</p>").unwrap();
        region.write("<p>second</p>").unwrap();
        let content = std::fs::read_to_string(region.path()).unwrap();
        assert_eq!(content, "<p>second</p>");
    }

    #[test]
    fn file_region_reports_missing_directory() {
        let tmp = TempDir::new().unwrap();
        let region = FileRegion::new(tmp.path().join("missing").join("out.txt"));
        let err = region.write("x").unwrap_err();
        assert!(err.to_string().contains("Failed to write"));
    }
}

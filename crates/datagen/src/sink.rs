//! Output destinations. A sink receives each finished file whole.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

pub trait Sink {
    /// Store `contents` under `name`, replacing any previous file of that name.
    fn write(&mut self, name: &str, contents: &[u8]) -> Result<()>;
}

// ── Directory ────────────────────────────────────────────────────────────

/// Writes files into a directory. Each file is written to a temp file in the
/// same directory and renamed into place, so a reader never sees a partial file.
#[derive(Debug)]
pub struct DirSink {
    dir: PathBuf,
}

impl DirSink {
    pub fn create(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating output directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Sink for DirSink {
    fn write(&mut self, name: &str, contents: &[u8]) -> Result<()> {
        let path = self.dir.join(name);
        let mut tmp = NamedTempFile::new_in(&self.dir)
            .with_context(|| format!("creating temp file in {}", self.dir.display()))?;
        tmp.write_all(contents)
            .with_context(|| format!("writing {}", path.display()))?;
        tmp.as_file()
            .sync_all()
            .with_context(|| format!("syncing {}", path.display()))?;
        tmp.persist(&path)
            .with_context(|| format!("renaming temp file onto {}", path.display()))?;
        Ok(())
    }
}

// ── Memory ───────────────────────────────────────────────────────────────

/// Keeps every file in memory, ordered by name.
#[derive(Debug, Default)]
pub struct MemorySink {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&[u8]> {
        self.files.get(name).map(Vec::as_slice)
    }

    pub fn files(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl Sink for MemorySink {
    fn write(&mut self, name: &str, contents: &[u8]) -> Result<()> {
        self.files.insert(name.to_owned(), contents.to_vec());
        Ok(())
    }
}

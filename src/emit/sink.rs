//! Output targets for generated sources.
//!
//! `DirectSink` truncates every file up front and appends shard by shard,
//! opening and closing the target around each write. `StagedSink` keeps the
//! same bytes in memory and only touches the filesystem once the whole run has
//! succeeded: it writes every temp file first, then renames them into place.
//! A failed temp write leaves all outputs untouched. A failed rename of file
//! k leaves files 0..k already replaced; each rename is atomic on its own,
//! the set of renames is not. `MemorySink` never touches the filesystem.

use crate::error::{GenError, Result};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::trace;

/// Destination for one generation run.
pub trait OutputSink {
    /// Create or truncate every output and write the preamble to each.
    fn initialize(&mut self, preamble: &str) -> Result<()>;

    /// Append `text` to output `file_index`.
    fn append(&mut self, file_index: usize, text: &str) -> Result<()>;

    /// Complete the run and return the paths that now hold output.
    fn finish(&mut self) -> Result<Vec<PathBuf>>;
}

/// Fixed pool of output files sharing a name prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPool {
    dir: PathBuf,
    prefix: String,
    extension: String,
    file_limit: usize,
}

impl OutputPool {
    pub fn new(
        dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
        extension: impl Into<String>,
        file_limit: usize,
    ) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            extension: extension.into(),
            file_limit,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_limit(&self) -> usize {
        self.file_limit
    }

    /// `{dir}/{prefix}{index}{extension}`
    pub fn path(&self, index: usize) -> PathBuf {
        self.dir
            .join(format!("{}{}{}", self.prefix, index, self.extension))
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        (0..self.file_limit).map(|i| self.path(i)).collect()
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| GenError::io(&self.dir, e))
    }

    fn checked_path(&self, index: usize) -> Result<PathBuf> {
        if index >= self.file_limit {
            return Err(GenError::InvalidSettings(format!(
                "output index {} outside pool of {} files",
                index, self.file_limit
            )));
        }
        Ok(self.path(index))
    }
}

/// Writes straight to the pool's files.
pub struct DirectSink {
    pool: OutputPool,
}

impl DirectSink {
    pub fn new(pool: OutputPool) -> Self {
        Self { pool }
    }
}

impl OutputSink for DirectSink {
    fn initialize(&mut self, preamble: &str) -> Result<()> {
        self.pool.ensure_dir()?;
        for path in self.pool.paths() {
            let mut file = fs::File::create(&path).map_err(|e| GenError::io(&path, e))?;
            file.write_all(preamble.as_bytes())
                .map_err(|e| GenError::io(&path, e))?;
            trace!(path = %path.display(), "Initialized output file");
        }
        Ok(())
    }

    fn append(&mut self, file_index: usize, text: &str) -> Result<()> {
        let path = self.pool.checked_path(file_index)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| GenError::io(&path, e))?;
        file.write_all(text.as_bytes())
            .map_err(|e| GenError::io(&path, e))
    }

    fn finish(&mut self) -> Result<Vec<PathBuf>> {
        Ok(self.pool.paths())
    }
}

/// In-memory buffers, one per pool slot.
#[derive(Debug, Default)]
pub struct MemorySink {
    buffers: Vec<String>,
}

impl MemorySink {
    pub fn new(file_limit: usize) -> Self {
        Self {
            buffers: vec![String::new(); file_limit],
        }
    }

    pub fn contents(&self) -> &[String] {
        &self.buffers
    }

    pub fn into_contents(self) -> Vec<String> {
        self.buffers
    }
}

impl OutputSink for MemorySink {
    fn initialize(&mut self, preamble: &str) -> Result<()> {
        for buffer in &mut self.buffers {
            buffer.clear();
            buffer.push_str(preamble);
        }
        Ok(())
    }

    fn append(&mut self, file_index: usize, text: &str) -> Result<()> {
        let limit = self.buffers.len();
        let buffer = self.buffers.get_mut(file_index).ok_or_else(|| {
            GenError::InvalidSettings(format!(
                "output index {} outside pool of {} files",
                file_index, limit
            ))
        })?;
        buffer.push_str(text);
        Ok(())
    }

    fn finish(&mut self) -> Result<Vec<PathBuf>> {
        Ok(Vec::new())
    }
}

/// Renders into memory and replaces the pool's files only on `finish`.
pub struct StagedSink {
    pool: OutputPool,
    staged: MemorySink,
}

impl StagedSink {
    pub fn new(pool: OutputPool) -> Self {
        let staged = MemorySink::new(pool.file_limit());
        Self { pool, staged }
    }
}

impl OutputSink for StagedSink {
    fn initialize(&mut self, preamble: &str) -> Result<()> {
        self.staged.initialize(preamble)
    }

    fn append(&mut self, file_index: usize, text: &str) -> Result<()> {
        self.staged.append(file_index, text)
    }

    fn finish(&mut self) -> Result<Vec<PathBuf>> {
        self.pool.ensure_dir()?;
        let paths = self.pool.paths();
        let temps: Vec<PathBuf> = paths.iter().map(|p| temp_path_for(p)).collect();

        for (index, contents) in self.staged.contents().iter().enumerate() {
            if let Err(e) = fs::write(&temps[index], contents) {
                remove_all(&temps[..=index]);
                return Err(GenError::io(&temps[index], e));
            }
        }

        for (index, (temp, path)) in temps.iter().zip(&paths).enumerate() {
            if let Err(e) = fs::rename(temp, path) {
                remove_all(&temps[index..]);
                return Err(GenError::io(path, e));
            }
            trace!(path = %path.display(), "Replaced output file");
        }
        Ok(paths)
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{}.tmp", file_name))
}

fn remove_all(paths: &[PathBuf]) {
    for path in paths {
        if let Err(e) = fs::remove_file(path) {
            trace!(path = %path.display(), error = %e, "Temp file not removed");
        }
    }
}

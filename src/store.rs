// Flat-file todo store: one task per line

use crate::error::{Result, TodoError};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Default location of the backing file, relative to the working directory
pub const DEFAULT_PATH: &str = "files/todos.txt";

/// Terminator appended by front-ends when they format a new line
pub const LINE_TERMINATOR: &str = "\n";

/// Load/save pair over a single flat file
///
/// The store holds nothing but the path. Every call goes to disk: `load`
/// reads the whole file, `save` truncates and rewrites it. There is no
/// locking and `save` is not atomic, so the last writer wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Store {
    path: PathBuf,
}

impl Store {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every line of the backing file
    ///
    /// Each returned string keeps its original terminator (`\n` or `\r\n`);
    /// a trailing line without one is returned as-is. A missing file is an
    /// error, not an empty list.
    pub fn load(&self) -> Result<Vec<String>> {
        let content = fs::read_to_string(&self.path).map_err(|source| TodoError::Read {
            path: self.path.clone(),
            source,
        })?;

        let lines: Vec<String> = content.split_inclusive('\n').map(str::to_string).collect();
        debug!(path = ?self.path, count = lines.len(), "Loaded todos");
        Ok(lines)
    }

    /// Replace the backing file with exactly `lines`, in order
    ///
    /// Nothing is added or removed: callers decide on terminators.
    pub fn save<S: AsRef<str>>(&self, lines: &[S]) -> Result<()> {
        let write_err = |source| TodoError::Write {
            path: self.path.clone(),
            source,
        };

        let mut file = File::create(&self.path).map_err(write_err)?;
        for line in lines {
            file.write_all(line.as_ref().as_bytes()).map_err(write_err)?;
        }
        file.flush().map_err(write_err)?;

        debug!(path = ?self.path, count = lines.len(), "Saved todos");
        Ok(())
    }

    /// Create the backing file (and its directory) if it does not exist
    ///
    /// Returns true if the file was created. An existing file is left alone.
    pub fn ensure_exists(&self) -> Result<bool> {
        if self.path.exists() {
            return Ok(false);
        }

        let write_err = |source| TodoError::Write {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        File::create(&self.path).map_err(write_err)?;

        info!(path = ?self.path, "Created empty todo file");
        Ok(true)
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_PATH)
    }
}

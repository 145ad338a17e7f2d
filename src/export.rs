// One-way JSON snapshot of the todo list

use crate::entry::display_text;
use crate::error::{Result, TodoError};
use crate::store::Store;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Contents of an export file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub todos: Vec<String>,
    pub exported_at: DateTime<Local>,
    pub total_count: usize,
}

impl Snapshot {
    pub fn new<S: AsRef<str>>(lines: &[S], exported_at: DateTime<Local>) -> Self {
        let todos: Vec<String> = lines.iter().map(|l| display_text(l.as_ref()).to_string()).collect();
        Self {
            total_count: todos.len(),
            todos,
            exported_at,
        }
    }

    /// File name used for this snapshot: `todos_backup_YYYYmmdd_HHMMSS.json`
    pub fn file_name(&self) -> String {
        format!("todos_backup_{}.json", self.exported_at.format("%Y%m%d_%H%M%S"))
    }
}

/// Write the current list to a new JSON file in `dir`
///
/// The store is only read. Returns the path that was written.
pub fn export(store: &Store, dir: &Path) -> Result<PathBuf> {
    export_at(store, dir, Local::now())
}

pub fn export_at(store: &Store, dir: &Path, at: DateTime<Local>) -> Result<PathBuf> {
    let todos = store.load()?;
    if todos.is_empty() {
        return Err(TodoError::NothingToExport);
    }

    let snapshot = Snapshot::new(&todos, at);
    let path = dir.join(snapshot.file_name());
    let json = serde_json::to_string_pretty(&snapshot)?;

    fs::write(&path, json).map_err(|source| TodoError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = ?path, count = snapshot.total_count, "Exported todos");
    Ok(path)
}

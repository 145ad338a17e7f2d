// Error types for todo list operations

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TodoError>;

#[derive(Debug, Error)]
pub enum TodoError {
    /// The backing file could not be opened or read
    #[error("Failed to read todo file {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backing file could not be created, truncated or written
    #[error("Failed to write todo file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Index text that does not parse as a number
    #[error("Invalid index: {0:?}")]
    InvalidIndex(String),

    /// 1-based index outside `1..=len`
    #[error("There is no item with index {index} (list has {len})")]
    OutOfRange { index: usize, len: usize },

    #[error("Todo text cannot be empty")]
    EmptyTodo,

    #[error("No todos to export")]
    NothingToExport,

    #[error("Failed to serialize export")]
    Serialize(#[from] serde_json::Error),

    /// Reading commands from or writing output to the terminal failed
    #[error("Terminal I/O failed")]
    Terminal(#[source] io::Error),

    #[error("Failed to load config {}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: ConfigSource,
    },
}

/// Underlying cause of a config failure
#[derive(Debug, Error)]
pub enum ConfigSource {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

impl TodoError {
    /// True when the error is a read of a file that does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::Read { source, .. } if source.kind() == io::ErrorKind::NotFound)
    }

    /// The underlying I/O error for file-access failures
    pub fn io_error(&self) -> Option<&io::Error> {
        match self {
            TodoError::Read { source, .. } | TodoError::Write { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Errors a front-end reports to the user and then keeps going
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            TodoError::InvalidIndex(_) | TodoError::OutOfRange { .. } | TodoError::EmptyTodo | TodoError::NothingToExport
        )
    }
}

// todolist - Todo list manager over a flat text file

pub mod config;
pub mod entry;
pub mod error;
pub mod export;
pub mod filter;
pub mod ops;
pub mod repl;
pub mod store;

// Re-export main types for convenience
pub use config::Config;
pub use entry::Entry;
pub use error::{Result, TodoError};
pub use filter::{Filter, MatchOp};
pub use ops::{AddOptions, Added};
pub use repl::Repl;
pub use store::Store;

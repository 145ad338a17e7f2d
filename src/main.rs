use clap::{Parser, Subcommand};
use colored::Colorize;
use eyre::{Context, Result};
use std::io;
use std::path::PathBuf;
use todolist::{AddOptions, Config, Filter, MatchOp, Repl, Store, export, ops};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "todolist")]
#[command(about = "Todo list manager backed by a plain text file")]
#[command(version = env!("GIT_DESCRIBE"))]
struct Cli {
    /// Path to the todo file (default: files/todos.txt)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Path to a YAML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt (default)
    Repl,

    /// Add a todo
    Add {
        /// Todo text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Replace the text of a todo
    Edit {
        /// 1-based position
        index: String,
        /// New text
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Complete (remove) one or more todos
    Complete {
        /// 1-based positions
        #[arg(required = true, num_args = 1..)]
        indices: Vec<String>,
    },

    /// Delete one or more todos
    Delete {
        /// 1-based positions
        #[arg(required = true, num_args = 1..)]
        indices: Vec<String>,
    },

    /// Remove every todo
    Clear,

    /// List todos
    Show,

    /// Search todos (case-insensitive)
    Search {
        term: String,
        /// contains, prefix or exact
        #[arg(short, long, default_value = "contains")]
        mode: MatchOp,
    },

    /// Write the list to a JSON file
    Export {
        /// Output directory (default: export_dir from config)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    // Log to stderr so the prompt on stdout stays clean
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).wrap_err("Failed to load configuration")?;
    if let Some(file) = cli.file {
        config.file = file;
    }

    let store = config.store();
    if config.create_if_missing && store.ensure_exists()? {
        println!("Created {}", store.path().display());
    }

    let options = AddOptions {
        timestamp: config.timestamp_entries,
    };

    match cli.command.unwrap_or(Commands::Repl) {
        Commands::Repl => {
            let stdin = io::stdin();
            Repl::new(&store, options, stdin.lock(), io::stdout())
                .run()
                .wrap_err("Todo session failed")?;
        }
        Commands::Add { text } => {
            let added = ops::add(&store, &text.join(" "), options)?;
            if let Some(pos) = added.similar {
                println!("{}", format!("Note: similar todo already at {}", pos).yellow());
            }
            println!("{} {}. {}", "Added".green(), added.position, added.text);
        }
        Commands::Edit { index, text } => {
            let index = ops::parse_index(&index)?;
            let previous = ops::edit(&store, index, &text.join(" "), options)?;
            println!("{} {}. {} -> {}", "Edited".green(), index, previous, text.join(" "));
        }
        Commands::Complete { indices } => {
            for todo in remove_many(&store, &indices)? {
                println!("{} {}", "Completed".green(), todo);
            }
        }
        Commands::Delete { indices } => {
            for todo in remove_many(&store, &indices)? {
                println!("{} {}", "Deleted".red(), todo);
            }
        }
        Commands::Clear => {
            let count = ops::clear(&store)?;
            println!("Cleared {} todo(s)", count);
        }
        Commands::Show => {
            let todos = ops::show(&store)?;
            if todos.is_empty() {
                println!("{}", "No todos".dimmed());
            }
            for (i, todo) in todos.iter().enumerate() {
                println!("{}. {}", i + 1, todo);
            }
        }
        Commands::Search { term, mode } => {
            let filter = Filter { term, op: mode };
            let found = ops::search(&store, &filter)?;
            for (pos, todo) in &found {
                println!("{}. {}", pos, todo);
            }
            println!("{}", format!("{} match(es)", found.len()).dimmed());
        }
        Commands::Export { dir } => {
            let dir = dir.unwrap_or(config.export_dir);
            let path = export::export(&store, &dir)?;
            println!("{} {}", "Exported to".green(), path.display());
        }
    }

    Ok(())
}

fn remove_many(store: &Store, indices: &[String]) -> Result<Vec<String>> {
    let indices = indices
        .iter()
        .map(|s| ops::parse_index(s))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(ops::complete_many(store, &indices)?)
}

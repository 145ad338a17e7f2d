// Interactive terminal front-end
//
// Reads one command per line: add <text>, edit <n>, complete <n>, show, exit.
// Bad numbers and out-of-range indices are reported and the loop goes on;
// file errors end the session.

use crate::entry::display_text;
use crate::error::{Result, TodoError};
use crate::ops::{self, AddOptions};
use crate::store::Store;
use chrono::Local;
use colored::Colorize;
use std::io::{BufRead, Write};
use tracing::debug;

pub const PROMPT: &str = "Type an option of: add, edit, complete, show, exit:";

/// A parsed REPL command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Edit(String),
    Complete(String),
    Show,
    Exit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "add" => Command::Add(rest.to_string()),
            "edit" => Command::Edit(rest.to_string()),
            "complete" => Command::Complete(rest.to_string()),
            "show" => Command::Show,
            "exit" => Command::Exit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

pub struct Repl<'a, R, W> {
    store: &'a Store,
    options: AddOptions,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Repl<'a, R, W> {
    pub fn new(store: &'a Store, options: AddOptions, input: R, output: W) -> Self {
        Self {
            store,
            options,
            input,
            output,
        }
    }

    /// Run until `exit` or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", PROMPT).map_err(TodoError::Terminal)?;
            self.output.flush().map_err(TodoError::Terminal)?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let command = Command::parse(&line);
            debug!(?command, "REPL command");

            let result = match command {
                Command::Exit => break,
                Command::Add(text) => ops::add(self.store, &text, self.options).map(|_| ()),
                Command::Edit(index) => self.edit(&index),
                Command::Complete(index) => self.complete(&index),
                Command::Show => self.show(),
                Command::Unknown(_) => {
                    writeln!(self.output, "{}", "Command not valid".yellow())
                        .map_err(TodoError::Terminal)?;
                    Ok(())
                }
            };

            match result {
                Ok(()) => {}
                Err(e) if e.is_user_error() => self.report(&e)?,
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "Bye").map_err(TodoError::Terminal)?;
        Ok(())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line).map_err(TodoError::Terminal)? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    fn edit(&mut self, index: &str) -> Result<()> {
        let index = ops::parse_index(index)?;

        // Check the index before asking for new text
        let len = self.store.load()?.len();
        if index == 0 || index > len {
            return Err(TodoError::OutOfRange { index, len });
        }

        write!(self.output, "Enter a new todo: ").map_err(TodoError::Terminal)?;
        self.output.flush().map_err(TodoError::Terminal)?;
        let text = self.read_line()?.unwrap_or_default();

        ops::edit(self.store, index, display_text(&text), self.options)?;
        Ok(())
    }

    fn complete(&mut self, index: &str) -> Result<()> {
        let index = ops::parse_index(index)?;
        let removed = ops::complete(self.store, index)?;

        let now = Local::now();
        writeln!(
            self.output,
            "Todo {} was completed on {} at {}",
            removed,
            now.format("%d/%m/%Y"),
            now.format("%H:%M:%S")
        )
        .map_err(TodoError::Terminal)?;
        Ok(())
    }

    fn show(&mut self) -> Result<()> {
        for (i, todo) in ops::show(self.store)?.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, todo).map_err(TodoError::Terminal)?;
        }
        Ok(())
    }

    fn report(&mut self, err: &TodoError) -> Result<()> {
        let message = match err {
            TodoError::InvalidIndex(_) => "Your command is not valid".to_string(),
            TodoError::OutOfRange { .. } => "There is no item with that index".to_string(),
            other => other.to_string(),
        };
        writeln!(self.output, "{}", message.red()).map_err(TodoError::Terminal)?;
        Ok(())
    }
}

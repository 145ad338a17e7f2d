// Todo actions: each one loads, mutates in memory, then saves

use crate::entry::{self, display_text};
use crate::error::{Result, TodoError};
use crate::filter::{self, Filter};
use crate::store::{LINE_TERMINATOR, Store};
use tracing::info;

/// Options that change how new lines are formatted
#[derive(Debug, Clone, Copy, Default)]
pub struct AddOptions {
    /// Prefix new todos with `[MM/DD HH:MM]`
    pub timestamp: bool,
}

/// Outcome of an `add`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    /// 1-based position of the new todo
    pub position: usize,
    /// Stored text without terminator
    pub text: String,
    /// Position of an existing todo that already contains the text
    pub similar: Option<usize>,
}

/// Parse user-supplied index text as a 1-based position
pub fn parse_index(input: &str) -> Result<usize> {
    input
        .trim()
        .parse::<usize>()
        .map_err(|_| TodoError::InvalidIndex(input.trim().to_string()))
}

/// Convert a 1-based position into a 0-based offset within `len`
fn offset(index: usize, len: usize) -> Result<usize> {
    if index == 0 || index > len {
        return Err(TodoError::OutOfRange { index, len });
    }
    Ok(index - 1)
}

fn non_empty(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(TodoError::EmptyTodo);
    }
    Ok(text)
}

/// Append a todo to the end of the list
pub fn add(store: &Store, text: &str, options: AddOptions) -> Result<Added> {
    let text = non_empty(text)?;
    let mut todos = store.load()?;

    let similar = filter::find_similar(&todos, text);
    let line = if options.timestamp {
        entry::stamp_now(text)
    } else {
        text.to_string()
    };

    // An unterminated last line would swallow the new todo
    if let Some(last) = todos.last_mut()
        && !last.ends_with('\n')
    {
        last.push_str(LINE_TERMINATOR);
    }
    todos.push(format!("{}{}", line, LINE_TERMINATOR));
    store.save(&todos)?;

    info!(position = todos.len(), "Added todo");
    Ok(Added {
        position: todos.len(),
        text: line,
        similar,
    })
}

/// Replace the todo at `index` (1-based), returning the previous text
///
/// A stamped entry keeps its stamp; with `options.timestamp` an unstamped
/// entry gets a fresh one. The file is untouched on error.
pub fn edit(store: &Store, index: usize, text: &str, options: AddOptions) -> Result<String> {
    let text = non_empty(text)?;
    let mut todos = store.load()?;
    let i = offset(index, todos.len())?;

    let previous = display_text(&todos[i]).to_string();
    let line = if options.timestamp && entry::Entry::parse(&todos[i]).stamp.is_none() {
        entry::stamp_now(text)
    } else {
        entry::replace_text(&todos[i], text)
    };
    todos[i] = format!("{}{}", line, LINE_TERMINATOR);
    store.save(&todos)?;

    info!(index, "Edited todo");
    Ok(previous)
}

/// Remove the todo at `index` (1-based), returning its text
///
/// Remaining entries keep their order. The file is untouched on error.
pub fn complete(store: &Store, index: usize) -> Result<String> {
    let mut todos = store.load()?;
    let i = offset(index, todos.len())?;

    let removed = todos.remove(i);
    store.save(&todos)?;

    info!(index, "Completed todo");
    Ok(display_text(&removed).to_string())
}

/// Remove several todos in one cycle, returning their texts in list order
///
/// Every index is checked before anything is removed; repeats count once.
pub fn complete_many(store: &Store, indices: &[usize]) -> Result<Vec<String>> {
    let mut todos = store.load()?;
    let len = todos.len();

    let mut offsets = indices
        .iter()
        .map(|&index| offset(index, len))
        .collect::<Result<Vec<_>>>()?;
    offsets.sort_unstable();
    offsets.dedup();

    let mut removed: Vec<String> = offsets
        .iter()
        .rev()
        .map(|&i| display_text(&todos.remove(i)).to_string())
        .collect();
    removed.reverse();

    store.save(&todos)?;

    info!(count = removed.len(), "Completed todos");
    Ok(removed)
}

/// Remove every todo, returning how many there were
pub fn clear(store: &Store) -> Result<usize> {
    let count = store.load()?.len();
    store.save::<String>(&[])?;

    info!(count, "Cleared todos");
    Ok(count)
}

/// Current todos for display, without terminators
pub fn show(store: &Store) -> Result<Vec<String>> {
    Ok(store
        .load()?
        .iter()
        .map(|line| display_text(line).to_string())
        .collect())
}

/// Todos matching `filter`, with their 1-based positions
pub fn search(store: &Store, filter: &Filter) -> Result<Vec<(usize, String)>> {
    let todos = store.load()?;
    Ok(filter
        .apply(&todos)
        .into_iter()
        .map(|(pos, text)| (pos, text.to_string()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn store_with(temp: &TempDir, content: &str) -> Store {
        let path = temp.path().join("todos.txt");
        fs::write(&path, content).unwrap();
        Store::new(path)
    }

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("2").unwrap(), 2);
        assert_eq!(parse_index(" 7 ").unwrap(), 7);
        assert!(matches!(parse_index("two"), Err(TodoError::InvalidIndex(s)) if s == "two"));
        assert!(matches!(parse_index("-1"), Err(TodoError::InvalidIndex(_))));
        assert!(matches!(parse_index(""), Err(TodoError::InvalidIndex(_))));
    }

    #[test]
    fn test_add_appends() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "buy milk\n");

        let added = add(&store, "walk dog", AddOptions::default()).unwrap();
        assert_eq!(added.position, 2);
        assert_eq!(added.text, "walk dog");
        assert_eq!(added.similar, None);
        assert_eq!(store.load().unwrap(), lines(&["buy milk\n", "walk dog\n"]));
    }

    #[test]
    fn test_add_after_unterminated_last_line() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "buy milk");

        let added = add(&store, "walk dog", AddOptions::default()).unwrap();
        assert_eq!(added.position, 2);
        assert_eq!(store.load().unwrap(), lines(&["buy milk\n", "walk dog\n"]));
    }

    #[test]
    fn test_add_keeps_crlf_last_line() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "buy milk\r\n");

        add(&store, "walk dog", AddOptions::default()).unwrap();
        assert_eq!(store.load().unwrap(), lines(&["buy milk\r\n", "walk dog\n"]));
    }

    #[test]
    fn test_add_allows_duplicates_and_reports_them() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "buy milk\n");

        let added = add(&store, "Buy Milk", AddOptions::default()).unwrap();
        assert_eq!(added.similar, Some(1));
        assert_eq!(store.load().unwrap(), lines(&["buy milk\n", "Buy Milk\n"]));
    }

    #[test]
    fn test_add_with_timestamp() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "");

        let added = add(&store, "buy milk", AddOptions { timestamp: true }).unwrap();
        let entry = entry::Entry::parse(&added.text);
        assert!(entry.stamp.is_some());
        assert_eq!(entry.text, "buy milk");
        assert_eq!(store.load().unwrap(), vec![format!("{}\n", added.text)]);
    }

    #[test]
    fn test_add_rejects_empty() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\n");

        assert!(matches!(add(&store, "   ", AddOptions::default()), Err(TodoError::EmptyTodo)));
        assert_eq!(store.load().unwrap(), lines(&["a\n"]));
    }

    #[test]
    fn test_add_to_missing_file_fails() {
        let temp = TempDir::new().unwrap();
        let store = Store::new(temp.path().join("missing.txt"));

        let err = add(&store, "a", AddOptions::default()).unwrap_err();
        assert!(err.is_not_found());
        assert!(!store.path().exists());
    }

    #[test]
    fn test_edit_replaces_in_place() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\nb\nc\n");

        let previous = edit(&store, 2, "B", AddOptions::default()).unwrap();
        assert_eq!(previous, "b");
        assert_eq!(store.load().unwrap(), lines(&["a\n", "B\n", "c\n"]));
    }

    #[test]
    fn test_edit_keeps_stamp() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "[03/14 09:05] buy milk\n");

        edit(&store, 1, "buy oat milk", AddOptions { timestamp: true }).unwrap();
        assert_eq!(store.load().unwrap(), lines(&["[03/14 09:05] buy oat milk\n"]));
    }

    #[test]
    fn test_edit_stamps_plain_entry_when_enabled() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "walk dog\n");

        edit(&store, 1, "walk cat", AddOptions { timestamp: true }).unwrap();
        let todos = store.load().unwrap();
        let entry = entry::Entry::parse(&todos[0]);
        assert!(entry.stamp.is_some());
        assert_eq!(entry.text, "walk cat");

        // Without the option a plain entry stays plain
        edit(&store, 1, "walk bird", AddOptions::default()).unwrap();
        let todos = store.load().unwrap();
        assert!(todos[0].ends_with("walk bird\n"));
    }

    #[test]
    fn test_edit_out_of_range_leaves_file() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\nb\nc\n");
        let before = fs::read(store.path()).unwrap();

        let err = edit(&store, 4, "d", AddOptions::default()).unwrap_err();
        assert!(matches!(err, TodoError::OutOfRange { index: 4, len: 3 }));

        let err = edit(&store, 0, "d", AddOptions::default()).unwrap_err();
        assert!(matches!(err, TodoError::OutOfRange { index: 0, len: 3 }));

        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_complete_removes_without_reordering() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\nb\nc\n");

        assert_eq!(complete(&store, 1).unwrap(), "a");
        assert_eq!(store.load().unwrap(), lines(&["b\n", "c\n"]));
    }

    #[test]
    fn test_complete_out_of_range_leaves_file() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\nb\nc\n");
        let before = fs::read(store.path()).unwrap();

        let err = complete(&store, 9).unwrap_err();
        assert!(matches!(err, TodoError::OutOfRange { index: 9, len: 3 }));
        assert_eq!(fs::read(store.path()).unwrap(), before);
    }

    #[test]
    fn test_complete_many() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\nb\nc\nd\n");

        let removed = complete_many(&store, &[3, 1, 3]).unwrap();
        assert_eq!(removed, lines(&["a", "c"]));
        assert_eq!(store.load().unwrap(), lines(&["b\n", "d\n"]));
    }

    #[test]
    fn test_complete_many_validates_first() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\nb\n");

        let err = complete_many(&store, &[1, 5]).unwrap_err();
        assert!(matches!(err, TodoError::OutOfRange { index: 5, len: 2 }));
        assert_eq!(store.load().unwrap(), lines(&["a\n", "b\n"]));
    }

    #[test]
    fn test_clear() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\nb\n");

        assert_eq!(clear(&store).unwrap(), 2);
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn test_show_strips_terminators() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "a\r\nb\n");

        assert_eq!(show(&store).unwrap(), lines(&["a", "b"]));
        // Display does not rewrite the file
        assert_eq!(fs::read_to_string(store.path()).unwrap(), "a\r\nb\n");
    }

    #[test]
    fn test_search() {
        let temp = TempDir::new().unwrap();
        let store = store_with(&temp, "buy milk\nwalk dog\nBuy bread\n");

        let found = search(&store, &Filter::contains("buy")).unwrap();
        assert_eq!(found, vec![(1, "buy milk".to_string()), (3, "Buy bread".to_string())]);
    }
}

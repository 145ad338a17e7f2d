// Case-insensitive search over todo lines

use crate::entry::{Entry, display_text};

/// Search filter applied to the text of each todo
#[derive(Debug, Clone)]
pub struct Filter {
    /// Text to look for (compared lowercased)
    pub term: String,
    /// How the term is matched
    pub op: MatchOp,
}

/// Match operators for searching
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchOp {
    #[default]
    Contains,
    Prefix,
    Exact,
}

impl Filter {
    pub fn contains(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            op: MatchOp::Contains,
        }
    }

    /// Does `line` match? Stamps are ignored for prefix and exact matches.
    pub fn matches(&self, line: &str) -> bool {
        let term = self.term.to_lowercase();
        match self.op {
            MatchOp::Contains => display_text(line).to_lowercase().contains(&term),
            MatchOp::Prefix => Entry::parse(line).text.to_lowercase().starts_with(&term),
            MatchOp::Exact => Entry::parse(line).text.to_lowercase() == term,
        }
    }

    /// Matching todos with their 1-based positions in `lines`
    pub fn apply<'a, S: AsRef<str>>(&self, lines: &'a [S]) -> Vec<(usize, &'a str)> {
        lines
            .iter()
            .enumerate()
            .filter(|(_, line)| self.matches(line.as_ref()))
            .map(|(i, line)| (i + 1, display_text(line.as_ref())))
            .collect()
    }
}

/// First 1-based position of a todo that contains `text` (ignoring case)
pub fn find_similar<S: AsRef<str>>(lines: &[S], text: &str) -> Option<usize> {
    Filter::contains(text.trim()).apply(lines).first().map(|(pos, _)| *pos)
}

impl std::fmt::Display for MatchOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchOp::Contains => write!(f, "contains"),
            MatchOp::Prefix => write!(f, "prefix"),
            MatchOp::Exact => write!(f, "exact"),
        }
    }
}

impl std::str::FromStr for MatchOp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "contains" => Ok(MatchOp::Contains),
            "prefix" => Ok(MatchOp::Prefix),
            "exact" => Ok(MatchOp::Exact),
            other => Err(format!("Unknown match mode: {}", other)),
        }
    }
}

//! String arguments.

use argot_foundation::Result;
use argot_grammar::{ArgumentType, Scanner};

/// How much input a [`StringArgument`] consumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StringKind {
    /// One unquoted word.
    SingleWord,
    /// One unquoted word or a quoted phrase.
    QuotablePhrase,
    /// Everything up to the end of input.
    GreedyPhrase,
}

/// Reads a string according to its [`StringKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StringArgument {
    kind: StringKind,
}

impl StringArgument {
    /// A single unquoted word.
    #[must_use]
    pub const fn word() -> Self {
        Self {
            kind: StringKind::SingleWord,
        }
    }

    /// A word or a quoted phrase.
    #[must_use]
    pub const fn string() -> Self {
        Self {
            kind: StringKind::QuotablePhrase,
        }
    }

    /// The rest of the input.
    #[must_use]
    pub const fn greedy() -> Self {
        Self {
            kind: StringKind::GreedyPhrase,
        }
    }

    /// The kind of string read.
    #[must_use]
    pub const fn kind(&self) -> StringKind {
        self.kind
    }
}

impl ArgumentType for StringArgument {
    type Value = String;

    fn parse(&self, scanner: &mut Scanner) -> Result<String> {
        match self.kind {
            StringKind::SingleWord => Ok(scanner.read_unquoted_string()),
            StringKind::QuotablePhrase => scanner.read_string(),
            StringKind::GreedyPhrase => {
                let text = scanner.remaining().to_string();
                scanner.set_cursor(scanner.total_len());
                Ok(text)
            }
        }
    }

    fn examples(&self) -> Vec<&'static str> {
        match self.kind {
            StringKind::SingleWord => vec!["word", "words_with_underscores"],
            StringKind::QuotablePhrase => vec!["\"quoted phrase\"", "word", "\"\""],
            StringKind::GreedyPhrase => vec!["word", "words with spaces", "\"and symbols\""],
        }
    }
}

/// Quotes `input` if it cannot be read back as a single unquoted word.
#[must_use]
pub fn escape_if_required(input: &str) -> String {
    if input.chars().all(Scanner::is_allowed_in_unquoted_string) {
        return input.to_string();
    }

    let mut result = String::with_capacity(input.len() + 2);
    result.push('"');
    for c in input.chars() {
        if c == '\\' || c == '"' {
            result.push('\\');
        }
        result.push(c);
    }
    result.push('"');
    result
}

//! Completion candidates anchored to ranges of the input.
//!
//! A [`Suggestion`] replaces one [`StringRange`] of the input with new text.
//! [`Suggestions`] is a normalized set: every entry shares one range, there
//! are no duplicates, and entries are sorted case-insensitively.

use std::collections::HashSet;
use std::sync::Arc;

use argot_foundation::{Result, StringRange};

use crate::context::CommandContext;

/// Per-node override that replaces an argument type's own suggestions.
pub type SuggestionProvider<S> =
    Arc<dyn Fn(&CommandContext<S>, SuggestionsBuilder) -> Result<Suggestions> + Send + Sync>;

/// One completion candidate.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Suggestion {
    range: StringRange,
    text: String,
    tooltip: Option<String>,
}

impl Suggestion {
    /// Creates a suggestion replacing `range` with `text`.
    #[must_use]
    pub fn new(range: StringRange, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
            tooltip: None,
        }
    }

    /// Attaches a tooltip.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    /// The range this suggestion replaces.
    #[must_use]
    pub const fn range(&self) -> StringRange {
        self.range
    }

    /// The replacement text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The tooltip, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// Returns `input` with this suggestion's range replaced by its text.
    #[must_use]
    pub fn apply(&self, input: &str) -> String {
        if self.range.start == 0 && self.range.end == input.len() {
            return self.text.clone();
        }

        let mut result = String::with_capacity(input.len() + self.text.len());
        result.push_str(&input[..self.range.start]);
        result.push_str(&self.text);
        result.push_str(&input[self.range.end..]);
        result
    }

    /// Re-anchors this suggestion to a wider `range`, splicing in the
    /// untouched input text on whichever side is now included.
    #[must_use]
    pub fn expand(&self, command: &str, range: StringRange) -> Self {
        if range == self.range {
            return self.clone();
        }

        let mut text = String::new();
        if range.start < self.range.start {
            text.push_str(&command[range.start..self.range.start]);
        }
        text.push_str(&self.text);
        if range.end > self.range.end {
            text.push_str(&command[self.range.end..range.end]);
        }

        Self {
            range,
            text,
            tooltip: self.tooltip.clone(),
        }
    }
}

/// A merged, sorted set of suggestions sharing one range.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Suggestions {
    range: StringRange,
    suggestions: Vec<Suggestion>,
}

impl Suggestions {
    /// The canonical empty value, bound to `[0, 0]`.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            range: StringRange::at(0),
            suggestions: Vec::new(),
        }
    }

    /// The range shared by every entry.
    #[must_use]
    pub const fn range(&self) -> StringRange {
        self.range
    }

    /// The entries, sorted case-insensitively by text.
    #[must_use]
    pub fn list(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Iterates over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestions.iter()
    }

    /// Returns true if there are no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    /// Merges independently produced suggestion sets over `command`.
    #[must_use]
    pub fn merge(command: &str, input: Vec<Self>) -> Self {
        match input.len() {
            0 => Self::empty(),
            1 => input.into_iter().next().unwrap_or_default(),
            _ => {
                let all = input.into_iter().flat_map(|s| s.suggestions).collect();
                Self::create(command, all)
            }
        }
    }

    /// Normalizes raw suggestions: dedups, widens every entry to the
    /// encompassing range, and sorts case-insensitively.
    #[must_use]
    pub fn create(command: &str, suggestions: Vec<Suggestion>) -> Self {
        let suggestions = dedup(suggestions);
        let Some(range) = suggestions
            .iter()
            .map(Suggestion::range)
            .reduce(StringRange::encompassing)
        else {
            return Self::empty();
        };

        let mut expanded = dedup(
            suggestions
                .iter()
                .map(|s| s.expand(command, range))
                .collect(),
        );
        expanded.sort_by_cached_key(|s| s.text.to_lowercase());

        Self {
            range,
            suggestions: expanded,
        }
    }
}

impl<'a> IntoIterator for &'a Suggestions {
    type Item = &'a Suggestion;
    type IntoIter = std::slice::Iter<'a, Suggestion>;

    fn into_iter(self) -> Self::IntoIter {
        self.suggestions.iter()
    }
}

/// Removes duplicates, keeping the first occurrence of each.
fn dedup(suggestions: Vec<Suggestion>) -> Vec<Suggestion> {
    let mut seen = HashSet::new();
    suggestions
        .into_iter()
        .filter(|s| seen.insert(s.clone()))
        .collect()
}

/// Accumulates suggestions for the token starting at `start`.
#[derive(Clone, Debug)]
pub struct SuggestionsBuilder {
    input: String,
    input_lowercase: String,
    start: usize,
    result: Vec<Suggestion>,
}

impl SuggestionsBuilder {
    /// Creates a builder for the token of `input` starting at byte `start`.
    ///
    /// # Panics
    ///
    /// Panics if `start` is past the end of `input`.
    #[must_use]
    pub fn new(input: impl Into<String>, start: usize) -> Self {
        let input = input.into();
        assert!(start <= input.len(), "suggestion start past end of input");
        let input_lowercase = input.to_lowercase();
        Self {
            input,
            input_lowercase,
            start,
            result: Vec::new(),
        }
    }

    /// The full (truncated-at-cursor) input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// The input in lowercase.
    #[must_use]
    pub fn input_lowercase(&self) -> &str {
        &self.input_lowercase
    }

    /// Byte offset where the current token starts.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// The part of the token typed so far.
    #[must_use]
    pub fn remaining(&self) -> &str {
        &self.input[self.start..]
    }

    /// The part of the token typed so far, in lowercase.
    #[must_use]
    pub fn remaining_lowercase(&self) -> String {
        self.remaining().to_lowercase()
    }

    fn token_range(&self) -> StringRange {
        StringRange::between(self.start, self.input.len())
    }

    /// Adds `text` as a completion, unless it is exactly what was typed.
    #[must_use]
    pub fn suggest(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if text != self.remaining() {
            self.result.push(Suggestion::new(self.token_range(), text));
        }
        self
    }

    /// Adds `text` with a tooltip, unless it is exactly what was typed.
    #[must_use]
    pub fn suggest_with_tooltip(mut self, text: impl Into<String>, tooltip: impl Into<String>) -> Self {
        let text = text.into();
        if text != self.remaining() {
            self.result
                .push(Suggestion::new(self.token_range(), text).with_tooltip(tooltip));
        }
        self
    }

    /// Adds every suggestion collected by `other`.
    #[must_use]
    pub fn add(mut self, other: Self) -> Self {
        self.result.extend(other.result);
        self
    }

    /// Creates an empty builder over the same input starting at `start`.
    #[must_use]
    pub fn create_offset(&self, start: usize) -> Self {
        Self {
            input: self.input.clone(),
            input_lowercase: self.input_lowercase.clone(),
            start,
            result: Vec::new(),
        }
    }

    /// Creates an empty builder over the same token.
    #[must_use]
    pub fn restart(&self) -> Self {
        self.create_offset(self.start)
    }

    /// Normalizes the collected suggestions.
    #[must_use]
    pub fn build(self) -> Suggestions {
        Suggestions::create(&self.input, self.result)
    }
}

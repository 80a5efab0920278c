//! Text range tracking.
//!
//! `StringRange` records which slice of the command input a parsed node,
//! argument, or suggestion covers.

use std::fmt;

/// A range of command input, as byte offsets.
///
/// Invariant: `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct StringRange {
    /// Byte offset where this range starts.
    pub start: usize,
    /// Byte offset where this range ends (exclusive).
    pub end: usize,
}

impl StringRange {
    /// Creates a new range.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    #[must_use]
    pub const fn between(start: usize, end: usize) -> Self {
        assert!(start <= end, "range start must not exceed its end");
        Self { start, end }
    }

    /// Creates an empty range positioned at `pos`.
    #[must_use]
    pub const fn at(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Creates the smallest range covering both `a` and `b`.
    #[must_use]
    pub fn encompassing(a: Self, b: Self) -> Self {
        Self {
            start: a.start.min(b.start),
            end: a.end.max(b.end),
        }
    }

    /// Returns the length of this range in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if this range is empty.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Returns true if `pos` lies within this range, ends included.
    #[must_use]
    pub const fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// Returns the text this range covers in the given input.
    #[must_use]
    pub fn text<'a>(&self, input: &'a str) -> &'a str {
        &input[self.start..self.end]
    }
}

impl fmt::Display for StringRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

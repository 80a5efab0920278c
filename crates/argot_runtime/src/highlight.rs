//! Parse-driven highlighting for the REPL.
//!
//! Colors come from the parse itself rather than from token shapes: matched
//! literals, matched arguments (cycling through a palette), and whatever
//! the grammar could not consume.

use std::borrow::Cow;

use argot_grammar::{CommandTree, ParseResults};

const RESET: &str = "\x1b[0m";
const LITERAL: &str = "\x1b[1;37m";
const ARGUMENTS: [&str; 5] = ["\x1b[36m", "\x1b[33m", "\x1b[32m", "\x1b[35m", "\x1b[34m"];
const UNPARSED: &str = "\x1b[31m";

/// Highlighter for command lines.
#[derive(Clone, Copy, Debug, Default)]
pub struct CommandHighlighter;

impl CommandHighlighter {
    /// Creates a new highlighter.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Colors `line`, whose command text starts at byte `offset` and was
    /// parsed into `parse`.
    #[must_use]
    pub fn highlight<'l, S>(
        &self,
        line: &'l str,
        offset: usize,
        parse: &ParseResults<S>,
        tree: &CommandTree<S>,
    ) -> Cow<'l, str> {
        if parse.context().nodes().is_empty() && line[offset..].trim().is_empty() {
            return Cow::Borrowed(line);
        }

        let mut result = String::with_capacity(line.len() * 2);
        result.push_str(&line[..offset]);
        let mut pos = offset;
        let mut argument_index = 0;

        for parsed in parse.context().nodes() {
            let range = parsed.range();
            let (start, end) = (range.start + offset, range.end + offset);
            result.push_str(&line[pos..start]);

            let color = if tree.node(parsed.node()).is_literal() {
                LITERAL
            } else {
                let color = ARGUMENTS[argument_index % ARGUMENTS.len()];
                argument_index += 1;
                color
            };
            result.push_str(color);
            result.push_str(&line[start..end]);
            result.push_str(RESET);
            pos = end;
        }

        let rest = &line[pos..];
        let trimmed = rest.trim_start();
        result.push_str(&rest[..rest.len() - trimmed.len()]);
        if !trimmed.is_empty() {
            result.push_str(UNPARSED);
            result.push_str(trimmed);
            result.push_str(RESET);
        }

        Cow::Owned(result)
    }
}

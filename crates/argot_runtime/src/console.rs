//! The command console: prefix handling, execution, and completion.
//!
//! A [`Console`] turns one line of user input into an [`Outcome`]. Lines may
//! start with the configured prefix (`/` by default), which is stripped
//! before parsing. Completion positions are reported in line coordinates so
//! an editor can splice candidates in directly.

use argot_foundation::Error;
use argot_grammar::{BuiltNode, Dispatcher, NodeId, ParseResults, Suggestion, Suggestions};
use tracing::debug;

use crate::config::ConsoleConfig;

/// A command source that can hand back output produced by handlers.
///
/// Handlers only see the source, so anything they want shown to the user
/// goes through it. The console drains it after every line.
pub trait Feedback {
    /// Removes and returns the lines produced since the last call.
    fn take_feedback(&self) -> Vec<String> {
        Vec::new()
    }
}

impl Feedback for () {}

/// The result of running one line.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    command: String,
    error: Option<Error>,
    feedback: Vec<String>,
    diagnostics: Vec<String>,
}

impl Outcome {
    /// The command text after prefix stripping.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Returns true if the handler ran and succeeded.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.error.is_none()
    }

    /// The error that stopped the line, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        self.error.as_ref()
    }

    /// Lines the handler produced through its source.
    #[must_use]
    pub fn feedback(&self) -> &[String] {
        &self.feedback
    }

    /// Error lines: per-node parse failures (if enabled), then the error.
    #[must_use]
    pub fn diagnostics(&self) -> &[String] {
        &self.diagnostics
    }

    /// Feedback followed by diagnostics, in display order.
    #[must_use]
    pub fn messages(&self) -> Vec<&str> {
        self.feedback
            .iter()
            .chain(&self.diagnostics)
            .map(String::as_str)
            .collect()
    }
}

/// Completion candidates for one cursor position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Completion {
    start: usize,
    suggestions: Suggestions,
}

impl Completion {
    /// Byte offset in the line where every candidate's replacement begins.
    #[must_use]
    pub const fn start(&self) -> usize {
        self.start
    }

    /// The merged suggestions, with ranges relative to the command text.
    #[must_use]
    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    /// Candidate texts in display order.
    pub fn candidates(&self) -> impl Iterator<Item = &str> {
        self.suggestions.iter().map(Suggestion::text)
    }

    /// Returns true if there is nothing to offer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }
}

/// A dispatcher plus the line-level conventions around it.
pub struct Console<S> {
    dispatcher: Dispatcher<S>,
    config: ConsoleConfig,
}

impl<S> Console<S> {
    /// Creates a console with the default configuration.
    #[must_use]
    pub fn new(dispatcher: Dispatcher<S>) -> Self {
        Self::with_config(dispatcher, ConsoleConfig::default())
    }

    /// Creates a console with the given configuration.
    #[must_use]
    pub const fn with_config(dispatcher: Dispatcher<S>, config: ConsoleConfig) -> Self {
        Self { dispatcher, config }
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// The underlying dispatcher.
    #[must_use]
    pub const fn dispatcher(&self) -> &Dispatcher<S> {
        &self.dispatcher
    }

    /// Mutable access to the dispatcher, for late registration.
    pub fn dispatcher_mut(&mut self) -> &mut Dispatcher<S> {
        &mut self.dispatcher
    }

    /// Registers a top-level command.
    pub fn register(&mut self, node: impl Into<BuiltNode<S>>) -> NodeId {
        self.dispatcher.register(node)
    }

    /// Length of the prefix at the start of `line`, or zero if absent.
    #[must_use]
    pub fn command_offset(&self, line: &str) -> usize {
        let prefix = self.config.prefix.as_str();
        if !prefix.is_empty() && line.starts_with(prefix) {
            prefix.len()
        } else {
            0
        }
    }

    /// Parses `line` with its prefix stripped.
    #[must_use]
    pub fn parse(&self, line: &str, source: S) -> ParseResults<S> {
        let offset = self.command_offset(line);
        self.dispatcher.parse(&line[offset..], source)
    }

    fn diagnostics(&self, parse: &ParseResults<S>, error: &Error) -> Vec<String> {
        let mut messages = Vec::new();
        if self.config.report_parse_errors {
            for (&node, node_error) in parse.errors() {
                if node_error != error {
                    messages.push(format!(
                        "{}: {node_error}",
                        self.dispatcher.node_usage(node)
                    ));
                }
            }
        }
        messages.push(error.to_string());
        messages
    }
}

impl<S: Feedback> Console<S> {
    /// Parses and executes one line on behalf of `source`.
    ///
    /// Never fails: errors are folded into the returned [`Outcome`].
    pub fn execute_line(&self, line: &str, source: S) -> Outcome {
        let parse = self.parse(line, source);
        let command = parse.input().to_string();
        let result = self.dispatcher.execute(&parse);
        let feedback = parse.context().source().take_feedback();

        match result {
            Ok(()) => {
                debug!(command = command.as_str(), "command succeeded");
                Outcome {
                    command,
                    error: None,
                    feedback,
                    diagnostics: Vec::new(),
                }
            }
            Err(error) => {
                debug!(command = command.as_str(), %error, "command failed");
                let diagnostics = self.diagnostics(&parse, &error);
                Outcome {
                    command,
                    error: Some(error),
                    feedback,
                    diagnostics,
                }
            }
        }
    }
}

impl<S: Send + Sync> Console<S> {
    /// Completes `line` at byte offset `cursor`.
    ///
    /// A cursor inside the prefix yields no candidates.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is past the end of `line` or not on a character
    /// boundary.
    #[must_use]
    pub fn complete(&self, line: &str, cursor: usize, source: S) -> Completion {
        let offset = self.command_offset(line);
        if cursor < offset {
            return Completion {
                start: cursor,
                suggestions: Suggestions::empty(),
            };
        }

        let parse = self.dispatcher.parse(&line[offset..], source);
        let suggestions = self.dispatcher.completion_suggestions(&parse, cursor - offset);
        let start = if suggestions.is_empty() {
            cursor
        } else {
            suggestions.range().start + offset
        };
        Completion { start, suggestions }
    }
}

impl<S> std::fmt::Debug for Console<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Console")
            .field("dispatcher", &self.dispatcher)
            .field("config", &self.config)
            .finish()
    }
}

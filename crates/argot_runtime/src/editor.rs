//! Line editor abstraction for the REPL.
//!
//! The REPL talks to a [`LineEditor`]; the rustyline implementation wires
//! tab completion to the console's suggestion engine and highlighting to
//! its parser.

use std::borrow::Cow;
use std::sync::Arc;

use argot_foundation::{Error, Result};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::{CmdKind, Highlighter};
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Context, Editor, Helper, Hinter, Validator};

use crate::console::Console;
use crate::highlight::CommandHighlighter;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);
}

/// Rustyline helper backed by a console and the source completions run as.
#[derive(Helper, Hinter, Validator)]
struct ConsoleHelper<S: Clone + Send + Sync> {
    console: Arc<Console<S>>,
    source: S,
    highlighter: CommandHighlighter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

impl<S: Clone + Send + Sync> Completer for ConsoleHelper<S> {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let completion = self.console.complete(line, pos, self.source.clone());
        let candidates = completion
            .suggestions()
            .iter()
            .map(|suggestion| Pair {
                display: match suggestion.tooltip() {
                    Some(tooltip) => format!("{}  ({tooltip})", suggestion.text()),
                    None => suggestion.text().to_string(),
                },
                replacement: suggestion.text().to_string(),
            })
            .collect();
        Ok((completion.start(), candidates))
    }
}

impl<S: Clone + Send + Sync> Highlighter for ConsoleHelper<S> {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let offset = self.console.command_offset(line);
        let dispatcher = self.console.dispatcher();
        let parse = dispatcher.parse(&line[offset..], self.source.clone());
        self.highlighter
            .highlight(line, offset, &parse, dispatcher.tree())
    }

    fn highlight_prompt<'b, 's: 'b, 'p: 'b>(
        &'s self,
        prompt: &'p str,
        default: bool,
    ) -> Cow<'b, str> {
        if default {
            Cow::Owned(format!("\x1b[1;32m{prompt}\x1b[0m"))
        } else {
            Cow::Borrowed(prompt)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(format!("\x1b[2m{hint}\x1b[0m"))
    }
}

fn editor_error(error: &ReadlineError) -> Error {
    Error::internal(error.to_string())
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor<S: Clone + Send + Sync> {
    editor: Editor<ConsoleHelper<S>, DefaultHistory>,
}

impl<S: Clone + Send + Sync> RustylineEditor<S> {
    /// Creates an editor completing and highlighting against `console` as
    /// `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the terminal cannot be initialized or the
    /// configured history size is rejected.
    pub fn new(console: Arc<Console<S>>, source: S) -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(console.config().history_size)
            .map_err(|e| editor_error(&e))?
            .build();

        let helper = ConsoleHelper {
            console,
            source,
            highlighter: CommandHighlighter::new(),
            hinter: HistoryHinter::new(),
        };

        let mut editor = Editor::with_config(config).map_err(|e| editor_error(&e))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl<S: Clone + Send + Sync> LineEditor for RustylineEditor<S> {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(editor_error(&e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}

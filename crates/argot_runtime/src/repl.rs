//! The interactive command loop.

use std::io::{self, Write};
use std::sync::Arc;

use argot_foundation::Result;

use crate::console::{Console, Feedback, Outcome};
use crate::editor::{LineEditor, ReadResult, RustylineEditor};

/// The interactive REPL.
pub struct Repl<S, E> {
    /// The line editor for input.
    editor: E,

    /// Grammar and line conventions.
    console: Arc<Console<S>>,

    /// Who every line runs as.
    source: S,

    /// Whether to show the welcome banner.
    show_banner: bool,

    /// Primary prompt.
    prompt: String,
}

impl<S: Clone + Send + Sync + Feedback> Repl<S, RustylineEditor<S>> {
    /// Creates a REPL on the terminal, completing as `source`.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(console: Arc<Console<S>>, source: S) -> Result<Self> {
        let editor = RustylineEditor::new(Arc::clone(&console), source.clone())?;
        Ok(Self::with_editor(editor, console, source))
    }
}

impl<S: Clone + Feedback, E: LineEditor> Repl<S, E> {
    /// Creates a REPL reading from `editor`.
    pub fn with_editor(editor: E, console: Arc<Console<S>>, source: S) -> Self {
        let config = console.config();
        let show_banner = config.show_banner;
        let prompt = config.prompt.clone();
        Self {
            editor,
            console,
            source,
            show_banner,
            prompt,
        }
    }

    /// Disables the welcome banner.
    #[must_use]
    pub fn without_banner(mut self) -> Self {
        self.show_banner = false;
        self
    }

    /// Sets the primary prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// The console lines run against.
    #[must_use]
    pub fn console(&self) -> &Console<S> {
        &self.console
    }

    /// The source lines run as.
    #[must_use]
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Runs the REPL loop until end of input.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.show_banner {
            self.print_banner();
        }

        while self.read_eval_print()? {}

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes one read-eval-print iteration.
    ///
    /// Returns `Ok(true)` to continue, `Ok(false)` to exit.
    fn read_eval_print(&mut self) -> Result<bool> {
        let input = match self.editor.read_line(&self.prompt)? {
            ReadResult::Line(line) => line,
            ReadResult::Interrupted => {
                println!();
                return Ok(true);
            }
            ReadResult::Eof => return Ok(false),
        };

        if input.trim().is_empty() {
            return Ok(true);
        }

        self.editor.add_history(&input);
        let outcome = self.eval(&input);
        Self::print_outcome(&outcome);
        Ok(true)
    }

    /// Runs one line as the REPL's source.
    pub fn eval(&self, line: &str) -> Outcome {
        self.console.execute_line(line, self.source.clone())
    }

    fn print_outcome(outcome: &Outcome) {
        for line in outcome.feedback() {
            println!("{line}");
        }
        for line in outcome.diagnostics() {
            eprintln!("\x1b[31m{line}\x1b[0m");
        }
    }

    /// Prints the welcome banner.
    #[allow(clippy::unused_self)]
    fn print_banner(&self) {
        println!("\x1b[1;36m");
        println!("   __ _ _ __ __ _  ___ | |_ ");
        println!("  / _` | '__/ _` |/ _ \\| __|");
        println!(" | (_| | | | (_| | (_) | |_ ");
        println!("  \\__,_|_|  \\__, |\\___/ \\__|");
        println!("            |___/           ");
        println!("\x1b[0m");
        println!("Welcome to the Argot console v{}", env!("CARGO_PKG_VERSION"));
        println!("Type commands (the leading / is optional). Tab completes. Ctrl+D exits.\n");

        let _ = io::stdout().flush();
    }
}

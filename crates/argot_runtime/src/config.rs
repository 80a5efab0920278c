//! Console configuration.

/// Settings for a [`Console`](crate::Console) and the REPL around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleConfig {
    /// Prefix stripped from a line before parsing, if present.
    pub prefix: String,
    /// Report every per-node parse failure when a line does not execute.
    pub report_parse_errors: bool,
    /// Prompt shown by the REPL.
    pub prompt: String,
    /// Maximum number of history entries kept by the line editor.
    pub history_size: usize,
    /// Print the welcome banner when the REPL starts.
    pub show_banner: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            prefix: "/".to_string(),
            report_parse_errors: true,
            prompt: "argot> ".to_string(),
            history_size: 1000,
            show_banner: true,
        }
    }
}

impl ConsoleConfig {
    /// No banner and only the final error of a failed line.
    #[must_use]
    pub fn quiet() -> Self {
        Self {
            report_parse_errors: false,
            show_banner: false,
            ..Self::default()
        }
    }

    /// Sets the command prefix. An empty prefix disables stripping.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Sets whether per-node parse failures are reported.
    #[must_use]
    pub const fn with_report_parse_errors(mut self, enabled: bool) -> Self {
        self.report_parse_errors = enabled;
        self
    }

    /// Sets the REPL prompt.
    #[must_use]
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the history size.
    #[must_use]
    pub const fn with_history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// Sets whether the banner is shown.
    #[must_use]
    pub const fn with_banner(mut self, enabled: bool) -> Self {
        self.show_banner = enabled;
        self
    }
}

//! Boolean arguments.

use argot_foundation::Result;
use argot_grammar::{ArgumentType, CommandContext, Scanner, Suggestions, SuggestionsBuilder};

/// Reads `true` or `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BoolArgument;

impl BoolArgument {
    /// Creates a boolean argument type.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ArgumentType for BoolArgument {
    type Value = bool;

    fn parse(&self, scanner: &mut Scanner) -> Result<bool> {
        scanner.read_boolean()
    }

    fn list_suggestions<S>(
        &self,
        _context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions> {
        let remaining = builder.remaining_lowercase();
        Ok(["true", "false"]
            .into_iter()
            .filter(|word| word.starts_with(&remaining))
            .fold(builder, |builder, word| builder.suggest(word))
            .build())
    }

    fn examples(&self) -> Vec<&'static str> {
        vec!["true", "false"]
    }
}

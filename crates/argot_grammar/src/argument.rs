//! The pluggable argument-type contract.
//!
//! An [`ArgumentType`] knows how to read one kind of value from a
//! [`Scanner`] and how to propose completions for it. Argument nodes hold
//! their type behind the object-safe [`ErasedArgument`] so one tree can mix
//! argument kinds with different value types.

use std::any::{Any, type_name};
use std::sync::Arc;

use argot_foundation::Result;

use crate::context::CommandContext;
use crate::scanner::Scanner;
use crate::suggestion::{Suggestions, SuggestionsBuilder};

/// A captured argument value, shared between context snapshots.
pub type ArgumentValue = Arc<dyn Any + Send + Sync>;

/// Parser and suggestion provider for one kind of argument value.
///
/// `parse` must either fail or leave the scanner exhausted or positioned on
/// a token boundary. Suggestions it produces must themselves parse.
pub trait ArgumentType: Send + Sync + 'static {
    /// The value produced by a successful parse.
    type Value: Clone + Send + Sync + 'static;

    /// Reads a value at the scanner's cursor.
    ///
    /// # Errors
    ///
    /// Returns a descriptive error if the input is malformed.
    fn parse(&self, scanner: &mut Scanner) -> Result<Self::Value>;

    /// Proposes completions for the token being typed.
    ///
    /// The default proposes nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if suggestions cannot be produced; the suggestion
    /// engine treats that as an empty contribution.
    fn list_suggestions<S>(
        &self,
        _context: &CommandContext<S>,
        _builder: SuggestionsBuilder,
    ) -> Result<Suggestions> {
        Ok(Suggestions::empty())
    }

    /// Sample inputs this type accepts.
    fn examples(&self) -> Vec<&'static str> {
        Vec::new()
    }
}

/// Object-safe view of an [`ArgumentType`] with its value boxed.
pub trait ErasedArgument<S>: Send + Sync {
    /// Parses and boxes a value.
    ///
    /// # Errors
    ///
    /// Propagates the underlying parse error.
    fn parse_erased(&self, scanner: &mut Scanner) -> Result<ArgumentValue>;

    /// Delegates to [`ArgumentType::list_suggestions`].
    ///
    /// # Errors
    ///
    /// Propagates the underlying suggestion error.
    fn list_suggestions_erased(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions>;

    /// Delegates to [`ArgumentType::examples`].
    fn examples_erased(&self) -> Vec<&'static str>;

    /// Name of the produced value type, for diagnostics.
    fn value_type_name(&self) -> &'static str;
}

impl<S, T: ArgumentType> ErasedArgument<S> for T {
    fn parse_erased(&self, scanner: &mut Scanner) -> Result<ArgumentValue> {
        let value = self.parse(scanner)?;
        Ok(Arc::new(value))
    }

    fn list_suggestions_erased(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions> {
        self.list_suggestions(context, builder)
    }

    fn examples_erased(&self) -> Vec<&'static str> {
        self.examples()
    }

    fn value_type_name(&self) -> &'static str {
        type_name::<T::Value>()
    }
}

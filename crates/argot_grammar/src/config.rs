//! Configuration for the dispatcher.

/// Configuration for a [`Dispatcher`](crate::Dispatcher).
///
/// Controls how sibling candidates are explored and how suggestion
/// contributors are scheduled and isolated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DispatcherConfig {
    /// Try every sibling candidate and keep the best result (false = stop at the first success).
    pub exhaustive_parse: bool,

    /// Collect suggestion contributions on the rayon pool (false = in child order on the caller's thread).
    pub parallel_suggestions: bool,

    /// Treat a panicking suggestion contributor as an empty contribution.
    pub isolate_contributor_panics: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            exhaustive_parse: false,
            parallel_suggestions: true,
            isolate_contributor_panics: true,
        }
    }
}

impl DispatcherConfig {
    /// Creates a configuration that collects suggestions on the calling thread.
    #[must_use]
    pub fn sequential() -> Self {
        Self {
            parallel_suggestions: false,
            ..Self::default()
        }
    }

    /// Creates a configuration that explores every sibling candidate.
    #[must_use]
    pub fn exhaustive() -> Self {
        Self {
            exhaustive_parse: true,
            ..Self::default()
        }
    }

    /// Builder method to enable/disable exhaustive sibling exploration.
    #[must_use]
    pub fn with_exhaustive_parse(mut self, exhaustive: bool) -> Self {
        self.exhaustive_parse = exhaustive;
        self
    }

    /// Builder method to enable/disable parallel suggestion collection.
    #[must_use]
    pub fn with_parallel_suggestions(mut self, parallel: bool) -> Self {
        self.parallel_suggestions = parallel;
        self
    }

    /// Builder method to enable/disable panic isolation for contributors.
    #[must_use]
    pub fn with_isolate_contributor_panics(mut self, isolate: bool) -> Self {
        self.isolate_contributor_panics = isolate;
        self
    }
}

//! Command grammar parsing and live completion.
//!
//! A grammar is a tree of literal and typed-argument nodes. The
//! [`Dispatcher`] parses raw text against it into a bound set of arguments
//! plus a resolved handler, and computes range-anchored completions for a
//! partially typed command at any cursor position.
//!
//! # Architecture
//!
//! ```text
//! "teleport ~ 5"
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    SCANNER      │  cursor over shared text, clone = independent cursor
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │   DISPATCHER    │  recursive descent over the tree, per-level backtracking
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  PARSE RESULTS  │  context + leftover scanner + per-node errors
//! └─────────────────┘
//!          │
//!     ┌────┴─────┐
//!     ▼          ▼
//!  execute   completion_suggestions (fork-join over children, merge)
//! ```
//!
//! # Modules
//!
//! - [`scanner`] - Cursor-based reading of tokens, numbers, and quoted strings
//! - [`tree`] - Node arena with merge-on-insert
//! - [`builder`] - `literal` / `argument` construction DSL
//! - [`argument`] - The pluggable [`ArgumentType`] contract
//! - [`context`] - Per-parse accumulation and immutable snapshots
//! - [`suggestion`] - Suggestion range algebra and merging
//! - [`dispatcher`] - Parsing, execution, usage, and completion
//! - [`config`] - Dispatcher configuration

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod argument;
pub mod builder;
pub mod config;
pub mod context;
pub mod dispatcher;
pub mod scanner;
pub mod suggestion;
pub mod tree;


// Re-export main types for convenience
pub use argument::{ArgumentType, ArgumentValue, ErasedArgument};
pub use builder::{ArgumentBuilder, BuiltNode, LiteralBuilder, NodeBuilder, argument, literal};
pub use config::DispatcherConfig;
pub use context::{CommandContext, ContextBuilder, ParsedArgument, ParsedNode, SuggestionContext};
pub use dispatcher::{Dispatcher, ParseResults};
pub use scanner::{SEPARATOR, Scanner};
pub use suggestion::{Suggestion, SuggestionProvider, Suggestions, SuggestionsBuilder};
pub use tree::{Command, CommandTree, Node, NodeId, NodeKind, Requirement};

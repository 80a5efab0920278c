//! Argot - Command grammar trees with backtracking parsing and tab completion
//!
//! This crate re-exports all layers of the Argot system for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 3: argot_runtime    - Command console, REPL, CLI
//! Layer 2: argot_stdlib     - Standard argument types, suggestion matching
//! Layer 1: argot_grammar    - Scanner, grammar tree, dispatcher, suggestions
//! Layer 0: argot_foundation - Core types (StringRange, Error)
//! ```

pub use argot_foundation as foundation;
pub use argot_grammar as grammar;
pub use argot_runtime as runtime;
pub use argot_stdlib as stdlib;

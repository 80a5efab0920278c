//! Command console, REPL, and CLI for Argot.
//!
//! This crate provides:
//! - [`Console`] - Prefix handling, execution outcomes, and completion
//! - [`Repl`] - Interactive loop with grammar-aware completion and highlighting
//! - [`demo_dispatcher`] - The sample grammar behind the `argot` binary

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod console;
pub mod demo;
pub mod editor;
pub mod highlight;
pub mod repl;

pub use config::ConsoleConfig;
pub use console::{Completion, Console, Feedback, Outcome};
pub use demo::{DemoSource, demo_dispatcher};
pub use editor::{LineEditor, ReadResult, RustylineEditor};
pub use highlight::CommandHighlighter;
pub use repl::Repl;

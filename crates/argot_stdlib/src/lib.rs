//! Standard argument types for Argot grammars.
//!
//! This crate provides argument types organized by category:
//! - [`boolean`] - `true` / `false`
//! - [`number`] - Integers, longs, doubles, and floats with optional bounds
//! - [`string`] - Single words, quotable phrases, and greedy phrases
//! - [`position`] - Two-coordinate positions with `~` relative coordinates
//! - [`matching`] - Prefix matching helpers for suggestion providers

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod boolean;
pub mod matching;
pub mod number;
pub mod position;
pub mod string;

pub use boolean::BoolArgument;
pub use matching::{should_suggest, suggest_matching};
pub use number::{DoubleArgument, FloatArgument, IntegerArgument, LongArgument};
pub use position::{Coordinate, Point, Position, PositionArgument};
pub use string::{StringArgument, StringKind, escape_if_required};

//! Integration tests for Layer 3: Runtime
//!
//! Tests the console and REPL against the demo grammar.

mod console;
mod repl;

//! Integration tests for Layer 1: Grammar
//!
//! Tests for tree construction and merging, backtracking parsing,
//! execution, and the suggestion engine.

mod completion;
mod parsing;
mod tree;

//! Parsing, execution, and completion over a grammar tree.
//!
//! Parsing is recursive descent with per-level backtracking. At each level
//! every relevant child is tried against its own clone of the scanner and
//! context; failures are recorded per node and never abort the level. By
//! default the first successful branch wins (see
//! [`DispatcherConfig::exhaustive_parse`] for the stricter alternative).
//!
//! Completion finds the node active at the cursor, asks each of its children
//! for candidates as independent rayon tasks, and merges the results.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use argot_foundation::{Error, Result};
use rayon::prelude::*;
use tracing::{debug, trace, warn};

use crate::builder::BuiltNode;
use crate::config::DispatcherConfig;
use crate::context::{CommandContext, ContextBuilder, ParsedNode};
use crate::scanner::{SEPARATOR, Scanner};
use crate::suggestion::{Suggestions, SuggestionsBuilder};
use crate::tree::{CommandTree, NodeId};

/// The outcome of [`Dispatcher::parse`].
pub struct ParseResults<S> {
    context: ContextBuilder<S>,
    scanner: Scanner,
    errors: BTreeMap<NodeId, Error>,
}

impl<S> ParseResults<S> {
    /// The context at the point parsing stopped.
    #[must_use]
    pub fn context(&self) -> &ContextBuilder<S> {
        &self.context
    }

    /// The scanner at the point parsing stopped.
    #[must_use]
    pub fn scanner(&self) -> &Scanner {
        &self.scanner
    }

    /// The full input.
    #[must_use]
    pub fn input(&self) -> &str {
        self.scanner.text()
    }

    /// Failures of the candidates tried at the level where parsing stopped.
    #[must_use]
    pub fn errors(&self) -> &BTreeMap<NodeId, Error> {
        &self.errors
    }

    /// Returns true if all input was consumed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.scanner.can_read()
    }

    fn rank(&self) -> (bool, bool) {
        (self.scanner.can_read(), !self.errors.is_empty())
    }
}

impl<S> fmt::Debug for ParseResults<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParseResults")
            .field("context", &self.context)
            .field("scanner", &self.scanner)
            .field("errors", &self.errors)
            .finish()
    }
}

/// Orders two potentials: consumed input first, then error-free.
fn compare_potentials<S>(a: &ParseResults<S>, b: &ParseResults<S>) -> Ordering {
    a.rank().cmp(&b.rank())
}

/// Owns a grammar tree and runs parses, executions, and completions on it.
pub struct Dispatcher<S> {
    tree: CommandTree<S>,
    config: DispatcherConfig,
}

impl<S> Dispatcher<S> {
    /// Creates a dispatcher with an empty grammar.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(DispatcherConfig::default())
    }

    /// Creates a dispatcher with an empty grammar and the given configuration.
    #[must_use]
    pub fn with_config(config: DispatcherConfig) -> Self {
        Self {
            tree: CommandTree::new(),
            config,
        }
    }

    /// The configuration.
    #[must_use]
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// The grammar tree.
    #[must_use]
    pub fn tree(&self) -> &CommandTree<S> {
        &self.tree
    }

    /// The root node's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Merges a subtree into the root and returns its top node.
    pub fn register(&mut self, node: impl Into<BuiltNode<S>>) -> NodeId {
        let node = node.into();
        let name = node.name().to_owned();
        let id = self.tree.add_child(NodeId::ROOT, node);
        debug!(%name, node = %id, total = self.tree.len(), "registered command");
        id
    }

    /// Walks `path` by node name from the root.
    #[must_use]
    pub fn find_node(&self, path: &[&str]) -> Option<NodeId> {
        self.tree.find(path)
    }

    /// Parses `input` on behalf of `source`.
    ///
    /// Never fails: a failed parse is reported through the returned
    /// [`ParseResults`].
    #[must_use]
    pub fn parse(&self, input: &str, source: S) -> ParseResults<S> {
        self.parse_scanner(Scanner::new(input), Arc::new(source))
    }

    /// Parses from the scanner's current cursor.
    #[must_use]
    pub fn parse_scanner(&self, scanner: Scanner, source: Arc<S>) -> ParseResults<S> {
        let context = ContextBuilder::new(source, NodeId::ROOT, scanner.cursor());
        self.parse_nodes(NodeId::ROOT, &scanner, &context)
    }

    fn parse_nodes(
        &self,
        node: NodeId,
        original: &Scanner,
        context_so_far: &ContextBuilder<S>,
    ) -> ParseResults<S> {
        let mut errors = BTreeMap::new();
        let mut potentials = Vec::new();

        for child_id in self.tree.relevant_nodes(node, original) {
            let child = self.tree.node(child_id);
            if !child.can_use(context_so_far.source()) {
                trace!(node = %child_id, "candidate rejected by requirement");
                continue;
            }

            let mut scanner = original.clone();
            let parsed = child
                .parse(child_id, &mut scanner, context_so_far.copy())
                .and_then(|context| {
                    if scanner.can_read() && !scanner.next_is(SEPARATOR) {
                        Err(scanner.error(Error::expected_separator()))
                    } else {
                        Ok(context)
                    }
                });

            let context = match parsed {
                Ok(context) => context.with_command(child.command().cloned()),
                Err(error) => {
                    trace!(node = %child_id, cursor = original.cursor(), %error, "candidate failed");
                    errors.insert(child_id, error);
                    continue;
                }
            };
            trace!(node = %child_id, cursor = scanner.cursor(), "candidate matched");

            let potential = if scanner.can_read_n(2) {
                scanner.skip();
                self.parse_nodes(child_id, &scanner, &context)
            } else {
                ParseResults {
                    context,
                    scanner,
                    errors: BTreeMap::new(),
                }
            };
            potentials.push(potential);

            if !self.config.exhaustive_parse {
                break;
            }
        }

        potentials
            .into_iter()
            .min_by(compare_potentials)
            .unwrap_or_else(|| ParseResults {
                context: context_so_far.copy(),
                scanner: original.clone(),
                errors,
            })
    }

    /// Runs the handler resolved by `parse`.
    ///
    /// # Errors
    ///
    /// If input is left over, returns the first recorded parse error in
    /// registration order. With none recorded it returns `UnknownCommand`
    /// when nothing matched, `ExpectedSeparator` after a node without
    /// children, or `IncorrectArgument` when no child took the next token
    /// (no literal matched it, or its requirement hid it). A path without a handler gives `NotExecutable`;
    /// otherwise whatever the handler returns.
    pub fn execute(&self, parse: &ParseResults<S>) -> Result<()> {
        let scanner = parse.scanner();
        if scanner.can_read() {
            if let Some(error) = parse.errors.values().next() {
                return Err(error.clone());
            }
            let last = parse.context.nodes().last().map(ParsedNode::node);
            return Err(match last {
                None => scanner.error(Error::unknown_command()),
                Some(node) if self.tree.node(node).children().is_empty() => {
                    scanner.error(Error::expected_separator())
                }
                Some(_) => scanner.error(Error::incorrect_argument()),
            });
        }

        if parse.context.nodes().is_empty() {
            return Err(scanner.error(Error::unknown_command()));
        }

        let context = parse.context.build(scanner.text());
        let Some(command) = context.command() else {
            return Err(scanner.error(Error::not_executable(self.path_usage(&context))));
        };

        debug!(input = scanner.text(), "executing command");
        command(&context)
    }

    /// Parses and executes `input` on behalf of `source`.
    ///
    /// # Errors
    ///
    /// See [`execute`](Self::execute).
    pub fn execute_input(&self, input: &str, source: S) -> Result<()> {
        let parse = self.parse(input, source);
        self.execute(&parse)
    }

    /// Usage text of a single node: `name` or `<name>`.
    #[must_use]
    pub fn node_usage(&self, node: NodeId) -> String {
        self.tree.node(node).usage_text()
    }

    fn path_usage(&self, context: &CommandContext<S>) -> String {
        context
            .nodes()
            .iter()
            .map(|parsed| self.node_usage(parsed.node()))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Every executable path below `node`, relative to it.
    ///
    /// With `restricted`, paths through nodes `source` may not use are
    /// omitted.
    #[must_use]
    pub fn usage(&self, node: NodeId, source: &S, restricted: bool) -> Vec<String> {
        let mut result = Vec::new();
        self.collect_usage(node, source, &mut result, String::new(), restricted);
        result
    }

    fn collect_usage(
        &self,
        id: NodeId,
        source: &S,
        result: &mut Vec<String>,
        prefix: String,
        restricted: bool,
    ) {
        let node = self.tree.node(id);
        if restricted && !node.can_use(source) {
            return;
        }
        if node.is_executable() {
            result.push(prefix.clone());
        }
        for &child in node.children() {
            let text = self.node_usage(child);
            let next = if prefix.is_empty() {
                text
            } else {
                format!("{prefix} {text}")
            };
            self.collect_usage(child, source, result, next, restricted);
        }
    }
}

impl<S: Send + Sync> Dispatcher<S> {
    /// Collects completions for the token at `cursor`.
    ///
    /// Every child of the node active at the cursor contributes
    /// independently; a contributor that fails (or panics, unless
    /// [`DispatcherConfig::isolate_contributor_panics`] is off) contributes
    /// nothing.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is past the end of the input, not on a character
    /// boundary, or before the point parsing started.
    #[must_use]
    pub fn completion_suggestions(&self, parse: &ParseResults<S>, cursor: usize) -> Suggestions {
        let located = parse.context.find_suggestion_context(cursor);
        let start = located.start.min(cursor);

        let full_input = parse.input();
        let truncated = &full_input[..cursor];
        let context = parse.context.build(truncated);
        let builder = SuggestionsBuilder::new(truncated, start);
        let children = self.tree.node(located.parent).children();

        let contributions: Vec<Suggestions> = if self.config.parallel_suggestions {
            children
                .par_iter()
                .map(|&child| self.contribute(child, &context, builder.clone()))
                .collect()
        } else {
            children
                .iter()
                .map(|&child| self.contribute(child, &context, builder.clone()))
                .collect()
        };

        let merged = Suggestions::merge(full_input, contributions);
        debug!(
            parent = %located.parent,
            start,
            count = merged.len(),
            range = %merged.range(),
            "collected suggestions"
        );
        merged
    }

    /// Collects completions with the cursor at the end of the input.
    #[must_use]
    pub fn completion_suggestions_at_end(&self, parse: &ParseResults<S>) -> Suggestions {
        self.completion_suggestions(parse, parse.scanner().total_len())
    }

    fn contribute(
        &self,
        id: NodeId,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Suggestions {
        let node = self.tree.node(id);
        let outcome = if self.config.isolate_contributor_panics {
            panic::catch_unwind(AssertUnwindSafe(|| node.list_suggestions(context, builder)))
                .unwrap_or_else(|_| Err(Error::internal("suggestion contributor panicked")))
        } else {
            node.list_suggestions(context, builder)
        };

        outcome.unwrap_or_else(|error| {
            warn!(node = %id, name = node.name(), %error, "suggestion contributor failed");
            Suggestions::empty()
        })
    }
}

impl<S> Default for Dispatcher<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Dispatcher<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", &self.config)
            .field("nodes", &self.tree.len())
            .finish()
    }
}

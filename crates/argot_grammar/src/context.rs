//! Parse contexts.
//!
//! A [`ContextBuilder`] accumulates what one parse attempt has matched so
//! far: captured arguments, matched nodes with their ranges, the running
//! overall range, and the handler of the deepest matched node. Builders are
//! backed by persistent collections, so [`ContextBuilder::copy`] is O(1) and
//! a speculative branch can never leak into its siblings.
//!
//! [`CommandContext`] is the immutable snapshot handed to handlers and
//! suggestion providers.

use std::any::type_name;
use std::fmt;
use std::sync::Arc;

use argot_foundation::{Error, Result, StringRange};
use im::{HashMap, Vector};

use crate::argument::ArgumentValue;
use crate::tree::{Command, NodeId};

/// One captured argument value and the input it was read from.
#[derive(Clone)]
pub struct ParsedArgument {
    range: StringRange,
    value: ArgumentValue,
}

impl ParsedArgument {
    /// Creates a captured argument.
    #[must_use]
    pub fn new(range: StringRange, value: ArgumentValue) -> Self {
        Self { range, value }
    }

    /// The input range the value was read from.
    #[must_use]
    pub const fn range(&self) -> StringRange {
        self.range
    }

    /// The boxed value.
    #[must_use]
    pub fn value(&self) -> &ArgumentValue {
        &self.value
    }

    /// Returns the value if it has type `T`.
    #[must_use]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl fmt::Debug for ParsedArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParsedArgument")
            .field("range", &self.range)
            .finish_non_exhaustive()
    }
}

/// One matched tree node and the input it consumed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParsedNode {
    node: NodeId,
    range: StringRange,
}

impl ParsedNode {
    /// Creates a matched node record.
    #[must_use]
    pub const fn new(node: NodeId, range: StringRange) -> Self {
        Self { node, range }
    }

    /// The matched node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// The consumed input range.
    #[must_use]
    pub const fn range(&self) -> StringRange {
        self.range
    }
}

/// Where completions should be collected for a cursor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuggestionContext {
    /// The node whose children are asked for completions.
    pub parent: NodeId,
    /// Offset where the token being completed starts.
    pub start: usize,
}

/// Accumulator for one parse attempt.
pub struct ContextBuilder<S> {
    source: Arc<S>,
    root: NodeId,
    arguments: HashMap<String, ParsedArgument>,
    nodes: Vector<ParsedNode>,
    command: Option<Command<S>>,
    range: StringRange,
    child: Option<Box<ContextBuilder<S>>>,
}

impl<S> ContextBuilder<S> {
    /// Creates an empty builder starting at offset `start`.
    #[must_use]
    pub fn new(source: Arc<S>, root: NodeId, start: usize) -> Self {
        Self {
            source,
            root,
            arguments: HashMap::new(),
            nodes: Vector::new(),
            command: None,
            range: StringRange::at(start),
            child: None,
        }
    }

    /// Returns a branch-isolated copy of this builder.
    #[must_use]
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Records a captured argument. A reused name overwrites the earlier value.
    #[must_use]
    pub fn with_argument(mut self, name: impl Into<String>, argument: ParsedArgument) -> Self {
        self.arguments.insert(name.into(), argument);
        self
    }

    /// Sets the handler, replacing any earlier one (including with `None`).
    #[must_use]
    pub fn with_command(mut self, command: Option<Command<S>>) -> Self {
        self.command = command;
        self
    }

    /// Appends a matched node and widens the overall range to cover it.
    #[must_use]
    pub fn with_node(mut self, node: NodeId, range: StringRange) -> Self {
        self.nodes.push_back(ParsedNode::new(node, range));
        self.range = StringRange::encompassing(self.range, range);
        self
    }

    /// Links a nested context.
    #[must_use]
    pub fn with_child(mut self, child: Self) -> Self {
        self.child = Some(Box::new(child));
        self
    }

    /// The command source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The node parsing started from.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Captured arguments by name.
    #[must_use]
    pub fn arguments(&self) -> &HashMap<String, ParsedArgument> {
        &self.arguments
    }

    /// Matched nodes in match order.
    #[must_use]
    pub fn nodes(&self) -> &Vector<ParsedNode> {
        &self.nodes
    }

    /// The union of every matched node's range.
    #[must_use]
    pub const fn range(&self) -> StringRange {
        self.range
    }

    /// The handler of the deepest matched node.
    #[must_use]
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// The nested context, if any.
    #[must_use]
    pub fn child(&self) -> Option<&Self> {
        self.child.as_deref()
    }

    /// Freezes this builder into a context over `input`.
    #[must_use]
    pub fn build(&self, input: &str) -> CommandContext<S> {
        CommandContext {
            source: Arc::clone(&self.source),
            input: Arc::from(input),
            arguments: self.arguments.clone(),
            command: self.command.clone(),
            root: self.root,
            nodes: self.nodes.clone(),
            range: self.range,
            child: self.child.as_ref().map(|c| Box::new(c.build(input))),
        }
    }

    /// Finds the node whose children should complete the token at `cursor`.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` lies before this context's start.
    #[must_use]
    pub fn find_suggestion_context(&self, cursor: usize) -> SuggestionContext {
        assert!(
            self.range.start <= cursor,
            "cannot find node before cursor {cursor} (context starts at {})",
            self.range.start
        );

        if self.range.end < cursor {
            if let Some(child) = &self.child {
                return child.find_suggestion_context(cursor);
            }
            return match self.nodes.last() {
                Some(last) => SuggestionContext {
                    parent: last.node,
                    start: last.range.end + 1,
                },
                None => SuggestionContext {
                    parent: self.root,
                    start: self.range.start,
                },
            };
        }

        let mut previous = self.root;
        for parsed in &self.nodes {
            if parsed.range.contains(cursor) {
                return SuggestionContext {
                    parent: previous,
                    start: parsed.range.start,
                };
            }
            previous = parsed.node;
        }

        SuggestionContext {
            parent: previous,
            start: self.range.start,
        }
    }
}

impl<S> Clone for ContextBuilder<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            root: self.root,
            arguments: self.arguments.clone(),
            nodes: self.nodes.clone(),
            command: self.command.clone(),
            range: self.range,
            child: self.child.clone(),
        }
    }
}

impl<S> fmt::Debug for ContextBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextBuilder")
            .field("root", &self.root)
            .field("arguments", &self.arguments.keys().collect::<Vec<_>>())
            .field("nodes", &self.nodes)
            .field("range", &self.range)
            .field("has_command", &self.command.is_some())
            .field("child", &self.child)
            .finish_non_exhaustive()
    }
}

/// Immutable result of a parse, handed to handlers and suggestion providers.
pub struct CommandContext<S> {
    source: Arc<S>,
    input: Arc<str>,
    arguments: HashMap<String, ParsedArgument>,
    command: Option<Command<S>>,
    root: NodeId,
    nodes: Vector<ParsedNode>,
    range: StringRange,
    child: Option<Box<CommandContext<S>>>,
}

impl<S> CommandContext<S> {
    /// The command source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The input this context was built over.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Returns a captured argument by name, cloned out as `T`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownArgument` if nothing was captured under `name`, or
    /// `ArgumentTypeMismatch` if the value is not a `T`.
    pub fn argument<T: Clone + 'static>(&self, name: &str) -> Result<T> {
        let parsed = self
            .arguments
            .get(name)
            .ok_or_else(|| Error::unknown_argument(name))?;
        parsed
            .downcast_ref::<T>()
            .cloned()
            .ok_or_else(|| Error::argument_type_mismatch(name, type_name::<T>()))
    }

    /// Returns the captured argument record for `name`.
    #[must_use]
    pub fn parsed_argument(&self, name: &str) -> Option<&ParsedArgument> {
        self.arguments.get(name)
    }

    /// Returns true if an argument was captured under `name`.
    #[must_use]
    pub fn has_argument(&self, name: &str) -> bool {
        self.arguments.contains_key(name)
    }

    /// The node parsing started from.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        self.root
    }

    /// Matched nodes in match order.
    #[must_use]
    pub fn nodes(&self) -> &Vector<ParsedNode> {
        &self.nodes
    }

    /// The union of every matched node's range.
    #[must_use]
    pub const fn range(&self) -> StringRange {
        self.range
    }

    /// The resolved handler.
    #[must_use]
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// The nested context, if any.
    #[must_use]
    pub fn child(&self) -> Option<&Self> {
        self.child.as_deref()
    }
}

impl<S> fmt::Debug for CommandContext<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandContext")
            .field("input", &self.input)
            .field("arguments", &self.arguments.keys().collect::<Vec<_>>())
            .field("nodes", &self.nodes)
            .field("range", &self.range)
            .field("has_command", &self.command.is_some())
            .finish_non_exhaustive()
    }
}

//! Fluent construction of grammar subtrees.
//!
//! ```
//! use argot_grammar::{Dispatcher, literal};
//!
//! let mut dispatcher: Dispatcher<()> = Dispatcher::new();
//! dispatcher.register(
//!     literal("ping").executes(|_| Ok(())),
//! );
//! assert!(dispatcher.execute_input("ping", ()).is_ok());
//! ```

use std::sync::Arc;

use argot_foundation::Result;

use crate::argument::{ArgumentType, ErasedArgument};
use crate::context::CommandContext;
use crate::suggestion::{Suggestions, SuggestionsBuilder};
use crate::tree::{ArgumentNode, ChildKind, Command, LiteralNode, Requirement, always};

/// A finished subtree, ready to be merged into a tree.
pub struct BuiltNode<S> {
    pub(crate) kind: ChildKind<S>,
    pub(crate) command: Option<Command<S>>,
    pub(crate) requirement: Requirement<S>,
    pub(crate) children: Vec<BuiltNode<S>>,
}

impl<S> BuiltNode<S> {
    /// What the subtree's top node matches.
    #[must_use]
    pub fn kind(&self) -> &ChildKind<S> {
        &self.kind
    }

    /// The top node's name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.kind.name()
    }

    /// Direct children, in the order they were added.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        &self.children
    }

    /// Returns true if the top node carries a handler.
    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.command.is_some()
    }
}

impl<S> std::fmt::Debug for BuiltNode<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltNode")
            .field("kind", &self.kind)
            .field("executable", &self.is_executable())
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

/// Builder for one node and the subtree below it.
pub struct NodeBuilder<S, K> {
    kind: K,
    command: Option<Command<S>>,
    requirement: Requirement<S>,
    children: Vec<BuiltNode<S>>,
}

/// Builder for a literal node.
pub type LiteralBuilder<S> = NodeBuilder<S, LiteralNode>;

/// Builder for an argument node.
pub type ArgumentBuilder<S> = NodeBuilder<S, ArgumentNode<S>>;

/// Starts a literal node matching `name`.
#[must_use]
pub fn literal<S>(name: impl Into<String>) -> LiteralBuilder<S> {
    NodeBuilder::with_kind(LiteralNode::new(name))
}

/// Starts an argument node named `name` whose value is read by `ty`.
#[must_use]
pub fn argument<S, T: ArgumentType>(name: impl Into<String>, ty: T) -> ArgumentBuilder<S> {
    let parser: Arc<dyn ErasedArgument<S>> = Arc::new(ty);
    NodeBuilder::with_kind(ArgumentNode::new(name, parser))
}

impl<S, K> NodeBuilder<S, K> {
    fn with_kind(kind: K) -> Self {
        Self {
            kind,
            command: None,
            requirement: always(),
            children: Vec::new(),
        }
    }

    /// Adds a child subtree.
    #[must_use]
    pub fn then(mut self, child: impl Into<BuiltNode<S>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Makes input ending at this node run `command`.
    #[must_use]
    pub fn executes<F>(mut self, command: F) -> Self
    where
        F: Fn(&CommandContext<S>) -> Result<()> + Send + Sync + 'static,
    {
        self.command = Some(Arc::new(command));
        self
    }

    /// Only sources accepted by `predicate` may reach this node.
    #[must_use]
    pub fn requires<P>(mut self, predicate: P) -> Self
    where
        P: Fn(&S) -> bool + Send + Sync + 'static,
    {
        self.requirement = Arc::new(predicate);
        self
    }

    /// Finishes the subtree.
    #[must_use]
    pub fn build(self) -> BuiltNode<S>
    where
        K: Into<ChildKind<S>>,
    {
        BuiltNode {
            kind: self.kind.into(),
            command: self.command,
            requirement: self.requirement,
            children: self.children,
        }
    }
}

impl<S> ArgumentBuilder<S> {
    /// Overrides the argument type's completions for this node.
    #[must_use]
    pub fn suggests<F>(mut self, provider: F) -> Self
    where
        F: Fn(&CommandContext<S>, SuggestionsBuilder) -> Result<Suggestions> + Send + Sync + 'static,
    {
        self.kind = self.kind.with_suggestions(Arc::new(provider));
        self
    }
}

impl<S> From<LiteralNode> for ChildKind<S> {
    fn from(literal: LiteralNode) -> Self {
        Self::Literal(literal)
    }
}

impl<S> From<ArgumentNode<S>> for ChildKind<S> {
    fn from(argument: ArgumentNode<S>) -> Self {
        Self::Argument(argument)
    }
}

impl<S, K: Into<ChildKind<S>>> From<NodeBuilder<S, K>> for BuiltNode<S> {
    fn from(builder: NodeBuilder<S, K>) -> Self {
        builder.build()
    }
}

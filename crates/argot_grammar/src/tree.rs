//! The grammar tree.
//!
//! Nodes live in an arena owned by [`CommandTree`] and refer to their
//! children by [`NodeId`]. There are no parent links. The root always sits at
//! [`NodeId::ROOT`], and since builders can only produce [`ChildKind`] values
//! a root can never be inserted below another node.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use argot_foundation::{Error, Result, StringRange};
use tracing::debug;

use crate::argument::ErasedArgument;
use crate::builder::BuiltNode;
use crate::context::{CommandContext, ContextBuilder, ParsedArgument};
use crate::scanner::{SEPARATOR, Scanner};
use crate::suggestion::{SuggestionProvider, Suggestions, SuggestionsBuilder};

/// A terminal handler, invoked with the final parse context.
pub type Command<S> = Arc<dyn Fn(&CommandContext<S>) -> Result<()> + Send + Sync>;

/// Gate deciding whether a node is reachable for a source.
pub type Requirement<S> = Arc<dyn Fn(&S) -> bool + Send + Sync>;

/// Returns a requirement that admits every source.
#[must_use]
pub fn always<S>() -> Requirement<S> {
    Arc::new(|_| true)
}

/// Stable index of a node in its [`CommandTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// The root node of every tree.
    pub const ROOT: Self = Self(0);

    /// Wraps a raw arena index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// The raw arena index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node matching one fixed keyword.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LiteralNode {
    literal: String,
    literal_lower: String,
}

impl LiteralNode {
    /// Creates a literal node for `literal`.
    #[must_use]
    pub fn new(literal: impl Into<String>) -> Self {
        let literal = literal.into();
        let literal_lower = literal.to_lowercase();
        Self {
            literal,
            literal_lower,
        }
    }

    /// The keyword.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }
}

/// A node matching a typed value.
pub struct ArgumentNode<S> {
    name: String,
    parser: Arc<dyn ErasedArgument<S>>,
    custom_suggestions: Option<SuggestionProvider<S>>,
}

impl<S> ArgumentNode<S> {
    /// Creates an argument node named `name` parsed by `parser`.
    #[must_use]
    pub fn new(name: impl Into<String>, parser: Arc<dyn ErasedArgument<S>>) -> Self {
        Self {
            name: name.into(),
            parser,
            custom_suggestions: None,
        }
    }

    /// Replaces the argument type's suggestions with `provider`.
    #[must_use]
    pub fn with_suggestions(mut self, provider: SuggestionProvider<S>) -> Self {
        self.custom_suggestions = Some(provider);
        self
    }

    /// The name the captured value is stored under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The argument type.
    #[must_use]
    pub fn parser(&self) -> &Arc<dyn ErasedArgument<S>> {
        &self.parser
    }

    /// The per-node suggestion override, if any.
    #[must_use]
    pub fn custom_suggestions(&self) -> Option<&SuggestionProvider<S>> {
        self.custom_suggestions.as_ref()
    }
}

impl<S> fmt::Debug for ArgumentNode<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentNode")
            .field("name", &self.name)
            .field("type", &self.parser.value_type_name())
            .field("custom_suggestions", &self.custom_suggestions.is_some())
            .finish()
    }
}

/// Every kind of node.
pub enum NodeKind<S> {
    /// The tree's entry point.
    Root,
    /// A keyword.
    Literal(LiteralNode),
    /// A typed value.
    Argument(ArgumentNode<S>),
}

/// The kinds of node that may appear below another node.
pub enum ChildKind<S> {
    /// A keyword.
    Literal(LiteralNode),
    /// A typed value.
    Argument(ArgumentNode<S>),
}

impl<S> ChildKind<S> {
    /// The name used to merge and look up this node.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Literal(literal) => &literal.literal,
            Self::Argument(argument) => &argument.name,
        }
    }
}

impl<S> fmt::Debug for NodeKind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Root => f.write_str("Root"),
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Argument(argument) => f.debug_tuple("Argument").field(argument).finish(),
        }
    }
}

impl<S> fmt::Debug for ChildKind<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Argument(argument) => f.debug_tuple("Argument").field(argument).finish(),
        }
    }
}

impl<S> From<ChildKind<S>> for NodeKind<S> {
    fn from(kind: ChildKind<S>) -> Self {
        match kind {
            ChildKind::Literal(literal) => Self::Literal(literal),
            ChildKind::Argument(argument) => Self::Argument(argument),
        }
    }
}

/// One node in a [`CommandTree`].
pub struct Node<S> {
    kind: NodeKind<S>,
    children: Vec<NodeId>,
    by_name: HashMap<String, NodeId>,
    literals: HashMap<String, NodeId>,
    arguments: Vec<NodeId>,
    command: Option<Command<S>>,
    requirement: Requirement<S>,
}

impl<S> Node<S> {
    fn new(kind: NodeKind<S>, command: Option<Command<S>>, requirement: Requirement<S>) -> Self {
        Self {
            kind,
            children: Vec::new(),
            by_name: HashMap::new(),
            literals: HashMap::new(),
            arguments: Vec::new(),
            command,
            requirement,
        }
    }

    /// What this node matches.
    #[must_use]
    pub fn kind(&self) -> &NodeKind<S> {
        &self.kind
    }

    /// The node's name; empty for the root.
    #[must_use]
    pub fn name(&self) -> &str {
        match &self.kind {
            NodeKind::Root => "",
            NodeKind::Literal(literal) => &literal.literal,
            NodeKind::Argument(argument) => &argument.name,
        }
    }

    /// Returns true for literal nodes.
    #[must_use]
    pub fn is_literal(&self) -> bool {
        matches!(self.kind, NodeKind::Literal(_))
    }

    /// Returns true for argument nodes.
    #[must_use]
    pub fn is_argument(&self) -> bool {
        matches!(self.kind, NodeKind::Argument(_))
    }

    /// Children in registration order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Looks up a child by name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Argument children in registration order.
    #[must_use]
    pub fn arguments(&self) -> &[NodeId] {
        &self.arguments
    }

    /// Returns true if the node has any literal children.
    #[must_use]
    pub fn has_literals(&self) -> bool {
        !self.literals.is_empty()
    }

    /// The terminal handler, if any.
    #[must_use]
    pub fn command(&self) -> Option<&Command<S>> {
        self.command.as_ref()
    }

    /// Returns true if input may end at this node.
    #[must_use]
    pub fn is_executable(&self) -> bool {
        self.command.is_some()
    }

    /// Returns true if `source` may reach this node.
    #[must_use]
    pub fn can_use(&self, source: &S) -> bool {
        (self.requirement)(source)
    }

    /// The predicate behind [`can_use`](Self::can_use).
    #[must_use]
    pub fn requirement(&self) -> &Requirement<S> {
        &self.requirement
    }

    /// How this node is written in usage text: `name` or `<name>`.
    #[must_use]
    pub fn usage_text(&self) -> String {
        match &self.kind {
            NodeKind::Root => String::new(),
            NodeKind::Literal(literal) => literal.literal.clone(),
            NodeKind::Argument(argument) => format!("<{}>", argument.name),
        }
    }

    /// Sample inputs this node accepts.
    #[must_use]
    pub fn examples(&self) -> Vec<String> {
        match &self.kind {
            NodeKind::Root => Vec::new(),
            NodeKind::Literal(literal) => vec![literal.literal.clone()],
            NodeKind::Argument(argument) => argument
                .parser
                .examples_erased()
                .into_iter()
                .map(str::to_owned)
                .collect(),
        }
    }

    /// Matches this node at the scanner's cursor and records it in `context`.
    ///
    /// `id` must be this node's own id.
    ///
    /// # Errors
    ///
    /// Returns the literal mismatch or the argument type's parse error.
    pub fn parse(
        &self,
        id: NodeId,
        scanner: &mut Scanner,
        context: ContextBuilder<S>,
    ) -> Result<ContextBuilder<S>> {
        let start = scanner.cursor();
        match &self.kind {
            NodeKind::Root => Ok(context),
            NodeKind::Literal(literal) => {
                let end = start + literal.literal.len();
                let matched = scanner.remaining().starts_with(&literal.literal)
                    && matches!(scanner.text()[end..].chars().next(), None | Some(SEPARATOR));
                if !matched {
                    return Err(scanner.error(Error::expected_literal(&literal.literal)));
                }
                scanner.set_cursor(end);
                Ok(context.with_node(id, StringRange::between(start, end)))
            }
            NodeKind::Argument(argument) => {
                let value = argument.parser.parse_erased(scanner)?;
                let range = StringRange::between(start, scanner.cursor());
                Ok(context
                    .with_argument(&argument.name, ParsedArgument::new(range, value))
                    .with_node(id, range))
            }
        }
    }

    /// Proposes completions for the token `builder` is positioned on.
    ///
    /// # Errors
    ///
    /// Propagates a failing argument type or suggestion override.
    pub fn list_suggestions(
        &self,
        context: &CommandContext<S>,
        builder: SuggestionsBuilder,
    ) -> Result<Suggestions> {
        match &self.kind {
            NodeKind::Root => Ok(Suggestions::empty()),
            NodeKind::Literal(literal) => {
                if literal.literal_lower.starts_with(&builder.remaining_lowercase()) {
                    Ok(builder.suggest(literal.literal.as_str()).build())
                } else {
                    Ok(Suggestions::empty())
                }
            }
            NodeKind::Argument(argument) => match &argument.custom_suggestions {
                Some(provider) => provider(context, builder),
                None => argument.parser.list_suggestions_erased(context, builder),
            },
        }
    }
}

impl<S> fmt::Debug for Node<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind)
            .field("children", &self.children)
            .field("executable", &self.is_executable())
            .finish_non_exhaustive()
    }
}

/// Arena of grammar nodes rooted at [`NodeId::ROOT`].
pub struct CommandTree<S> {
    nodes: Vec<Node<S>>,
}

impl<S> CommandTree<S> {
    /// Creates a tree holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Root, None, always())],
        }
    }

    /// The root node's id.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Returns the node for `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &Node<S> {
        &self.nodes[id.0]
    }

    /// Number of nodes, root included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds only the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Inserts `built` below `parent`, merging into a same-named child.
    ///
    /// On a name collision the existing child is kept (with its requirement),
    /// its handler is replaced only if `built` carries one, and every child of
    /// `built` is merged into it recursively.
    ///
    /// # Panics
    ///
    /// Panics if `parent` does not belong to this tree.
    pub fn add_child(&mut self, parent: NodeId, built: BuiltNode<S>) -> NodeId {
        let BuiltNode {
            kind,
            command,
            requirement,
            children,
        } = built;
        let name = kind.name().to_owned();

        let id = if let Some(existing) = self.nodes[parent.0].child(&name) {
            debug!(parent = %parent, node = %existing, %name, "merging into existing node");
            if command.is_some() {
                self.nodes[existing.0].command = command;
            }
            existing
        } else {
            let id = NodeId(self.nodes.len());
            let is_literal = matches!(kind, ChildKind::Literal(_));
            self.nodes.push(Node::new(kind.into(), command, requirement));

            let parent_node = &mut self.nodes[parent.0];
            parent_node.children.push(id);
            parent_node.by_name.insert(name.clone(), id);
            if is_literal {
                parent_node.literals.insert(name, id);
            } else {
                parent_node.arguments.push(id);
            }
            id
        };

        for child in children {
            self.add_child(id, child);
        }
        id
    }

    /// Returns the children of `id` worth trying at the scanner's cursor.
    ///
    /// A literal child whose name equals the next token wins outright;
    /// otherwise every argument child is a candidate.
    #[must_use]
    pub fn relevant_nodes(&self, id: NodeId, scanner: &Scanner) -> Vec<NodeId> {
        let node = &self.nodes[id.0];
        if node.literals.is_empty() {
            return node.arguments.clone();
        }

        let remaining = scanner.remaining();
        let token = remaining
            .find(SEPARATOR)
            .map_or(remaining, |end| &remaining[..end]);
        match node.literals.get(token) {
            Some(&literal) => vec![literal],
            None => node.arguments.clone(),
        }
    }

    /// Walks `path` by node name from the root.
    #[must_use]
    pub fn find(&self, path: &[&str]) -> Option<NodeId> {
        path.iter()
            .try_fold(NodeId::ROOT, |id, name| self.nodes[id.0].child(name))
    }
}

impl<S> Default for CommandTree<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for CommandTree<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandTree")
            .field("nodes", &self.nodes)
            .finish()
    }
}

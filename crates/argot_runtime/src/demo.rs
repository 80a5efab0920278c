//! A small sample grammar used by the `argot` binary.
//!
//! Commands run as a [`DemoSource`]: a named actor with a permission level,
//! a position, and a handful of toggles. Handler output is buffered on the
//! source and drained by the console after each line.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use argot_foundation::{Error, Result};
use argot_grammar::{
    CommandContext, Dispatcher, DispatcherConfig, Requirement, argument, literal,
};
use argot_stdlib::{
    BoolArgument, IntegerArgument, Point, Position, PositionArgument, StringArgument,
    suggest_matching,
};

use crate::console::Feedback;

/// Toggles known to `toggle`.
pub const FLAGS: [&str; 4] = ["debug_overlay", "fast_travel", "god_mode", "night_vision"];

/// Permission level needed for `teleport`.
pub const TELEPORT_PERMISSION: u8 = 2;

#[derive(Debug, Default)]
struct World {
    position: Point,
    flags: BTreeMap<String, bool>,
    output: Vec<String>,
}

/// The actor demo commands run as.
#[derive(Clone, Debug)]
pub struct DemoSource {
    name: String,
    permission: u8,
    world: Arc<Mutex<World>>,
}

impl DemoSource {
    /// Creates an actor at the origin.
    #[must_use]
    pub fn new(name: impl Into<String>, permission: u8) -> Self {
        Self {
            name: name.into(),
            permission,
            world: Arc::default(),
        }
    }

    /// Moves the actor before any command runs.
    #[must_use]
    pub fn with_position(self, position: Point) -> Self {
        self.world().position = position;
        self
    }

    /// The actor's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The actor's permission level.
    #[must_use]
    pub const fn permission(&self) -> u8 {
        self.permission
    }

    /// Where the actor stands.
    #[must_use]
    pub fn position(&self) -> Point {
        self.world().position
    }

    /// The state of a toggle, if it was ever set.
    #[must_use]
    pub fn flag(&self, name: &str) -> Option<bool> {
        self.world().flags.get(name).copied()
    }

    /// Queues a line of output.
    pub fn say(&self, line: impl Into<String>) {
        self.world().output.push(line.into());
    }

    fn world(&self) -> MutexGuard<'_, World> {
        self.world.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for DemoSource {
    fn default() -> Self {
        Self::new("player", 0)
    }
}

impl Feedback for DemoSource {
    fn take_feedback(&self) -> Vec<String> {
        std::mem::take(&mut self.world().output)
    }
}

struct HelpEntry {
    name: String,
    lines: Vec<String>,
    requirement: Requirement<DemoSource>,
}

impl HelpEntry {
    fn print(&self, source: &DemoSource) {
        for line in &self.lines {
            if line.is_empty() {
                source.say(format!("/{}", self.name));
            } else {
                source.say(format!("/{} {line}", self.name));
            }
        }
    }
}

type HelpIndex = Arc<OnceLock<Vec<HelpEntry>>>;

fn help(context: &CommandContext<DemoSource>, index: &HelpIndex) -> Result<()> {
    let entries = index
        .get()
        .ok_or_else(|| Error::internal("help index is not built"))?;
    let source = context.source();
    let mut visible = entries.iter().filter(|entry| (entry.requirement)(source));

    if context.has_argument("command") {
        let name: String = context.argument("command")?;
        let entry = visible
            .find(|entry| entry.name == name)
            .ok_or_else(|| Error::command_failed(format!("No such command: \"{name}\"")))?;
        entry.print(source);
    } else {
        visible.for_each(|entry| entry.print(source));
    }
    Ok(())
}

fn toggle(context: &CommandContext<DemoSource>) -> Result<()> {
    let flag: String = context.argument("flag")?;
    if !FLAGS.contains(&flag.as_str()) {
        return Err(Error::command_failed(format!("Unknown flag \"{flag}\"")));
    }

    let source = context.source();
    let value = if context.has_argument("value") {
        context.argument("value")?
    } else {
        !source.flag(&flag).unwrap_or(false)
    };
    source.world().flags.insert(flag.clone(), value);
    source.say(format!("{flag} is now {}", if value { "on" } else { "off" }));
    Ok(())
}

fn teleport(context: &CommandContext<DemoSource>) -> Result<()> {
    let destination: Position = context.argument("destination")?;
    let source = context.source();
    let target = destination.resolve(source.position());
    source.world().position = target;
    source.say(format!("Teleported {} to {} {}", source.name(), target.x, target.y));
    Ok(())
}

/// Builds the demo grammar.
#[must_use]
pub fn demo_dispatcher(config: DispatcherConfig) -> Dispatcher<DemoSource> {
    let mut dispatcher = Dispatcher::with_config(config);

    dispatcher.register(literal("echo").then(
        argument("message", StringArgument::greedy()).executes(|ctx: &CommandContext<DemoSource>| {
            let message: String = ctx.argument("message")?;
            ctx.source().say(message);
            Ok(())
        }),
    ));

    dispatcher.register(
        literal("add").then(
            argument("a", IntegerArgument::new()).then(
                argument("b", IntegerArgument::new()).executes(|ctx: &CommandContext<DemoSource>| {
                    let a: i32 = ctx.argument("a")?;
                    let b: i32 = ctx.argument("b")?;
                    ctx.source().say((i64::from(a) + i64::from(b)).to_string());
                    Ok(())
                }),
            ),
        ),
    );

    dispatcher.register(
        literal("toggle").then(
            argument("flag", StringArgument::word())
                .suggests(|_, builder| Ok(suggest_matching(FLAGS, builder)))
                .executes(toggle)
                .then(argument("value", BoolArgument::new()).executes(toggle)),
        ),
    );

    dispatcher.register(
        literal("teleport")
            .requires(|source: &DemoSource| source.permission() >= TELEPORT_PERMISSION)
            .then(
                argument(
                    "destination",
                    PositionArgument::new().with_candidates([("~", "~"), ("0", "0")]),
                )
                .executes(teleport),
            ),
    );

    dispatcher.register(literal("say").then(
        argument("message", StringArgument::string()).executes(|ctx: &CommandContext<DemoSource>| {
            let message: String = ctx.argument("message")?;
            let source = ctx.source();
            source.say(format!("<{}> {message}", source.name()));
            Ok(())
        }),
    ));

    let index = HelpIndex::default();
    let names = Arc::clone(&index);
    let for_root = Arc::clone(&index);
    let for_command = Arc::clone(&index);
    dispatcher.register(
        literal("help").executes(move |ctx| help(ctx, &for_root)).then(
            argument("command", StringArgument::word())
                .suggests(move |ctx, builder| {
                    let source = ctx.source();
                    let visible = names
                        .get()
                        .into_iter()
                        .flatten()
                        .filter(|entry| (entry.requirement)(source))
                        .map(|entry| entry.name.as_str());
                    Ok(suggest_matching(visible, builder))
                })
                .executes(move |ctx| help(ctx, &for_command)),
        ),
    );

    let tree = dispatcher.tree();
    let probe = DemoSource::default();
    let entries = tree
        .node(dispatcher.root())
        .children()
        .iter()
        .map(|&id| {
            let node = tree.node(id);
            HelpEntry {
                name: node.name().to_string(),
                lines: dispatcher.usage(id, &probe, false),
                requirement: Arc::clone(node.requirement()),
            }
        })
        .collect();
    let _ = index.set(entries);

    dispatcher
}

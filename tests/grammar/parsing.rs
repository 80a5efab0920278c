//! Integration tests for parsing and execution
//!
//! Tests argument binding, backtracking, literal precedence, ranges, and
//! the errors reported when input does not resolve to a handler.

use std::sync::{Arc, Mutex};

use argot_foundation::{Error, ErrorKind, Result, StringRange};
use argot_grammar::{
    CommandContext, Dispatcher, DispatcherConfig, ParseResults, argument, literal,
};
use argot_stdlib::{BoolArgument, IntegerArgument, StringArgument};
use proptest::prelude::*;

type Trail = Arc<Mutex<Vec<String>>>;

fn record(
    trail: &Trail,
    entry: &str,
) -> impl Fn(&CommandContext<()>) -> Result<()> + Send + Sync + 'static {
    let trail = Arc::clone(trail);
    let entry = entry.to_string();
    move |_| {
        trail.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

fn foo_grammar(trail: &Trail) -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(
        literal("foo").then(argument("n", IntegerArgument::new()).executes(record(trail, "h"))),
    );
    dispatcher
}

// =============================================================================
// Binding
// =============================================================================

#[test]
fn number_binds_and_resolves_handler() {
    let trail = Trail::default();
    let dispatcher = foo_grammar(&trail);
    let parse = dispatcher.parse("foo 42", ());

    assert!(parse.is_complete());
    assert!(parse.errors().is_empty());
    let context = parse.context().build(parse.input());
    assert_eq!(context.argument::<i32>("n").unwrap(), 42);
    assert!(context.command().is_some());

    dispatcher.execute(&parse).unwrap();
    assert_eq!(*trail.lock().unwrap(), ["h"]);
}

#[test]
fn word_in_number_slot_is_keyed_to_that_node() {
    let dispatcher = foo_grammar(&Trail::default());
    let parse = dispatcher.parse("foo bar", ());

    let n = dispatcher.find_node(&["foo", "n"]).unwrap();
    assert_eq!(parse.errors().len(), 1);
    assert_eq!(parse.errors()[&n].kind, ErrorKind::ExpectedInt);
    assert_eq!(parse.scanner().cursor(), 4);
    assert_eq!(parse.context().nodes().len(), 1);
    assert_eq!(dispatcher.execute(&parse).unwrap_err().kind, ErrorKind::ExpectedInt);
}

#[test]
fn wrong_type_argument_access() {
    let dispatcher = foo_grammar(&Trail::default());
    let parse = dispatcher.parse("foo 1", ());
    let context = parse.context().build(parse.input());
    assert!(matches!(
        context.argument::<String>("n").unwrap_err().kind,
        ErrorKind::ArgumentTypeMismatch { .. }
    ));
    assert_eq!(
        context.argument::<i32>("missing").unwrap_err().kind,
        ErrorKind::UnknownArgument("missing".to_string())
    );
}

// =============================================================================
// Candidate selection
// =============================================================================

#[test]
fn longer_literal_is_not_split() {
    let trail = Trail::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(literal("a").executes(record(&trail, "a")));
    dispatcher.register(literal("ab").executes(record(&trail, "ab")));

    let parse = dispatcher.parse("ab", ());
    assert!(parse.is_complete());
    let nodes = parse.context().nodes();
    assert_eq!(nodes.len(), 1);
    assert_eq!(dispatcher.tree().node(nodes[0].node()).name(), "ab");

    dispatcher.execute(&parse).unwrap();
    assert_eq!(*trail.lock().unwrap(), ["ab"]);
}

#[test]
fn literal_beats_argument() {
    let trail = Trail::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(argument("word", StringArgument::word()).executes(record(&trail, "word")));
    dispatcher.register(literal("go").executes(record(&trail, "go")));

    dispatcher.execute_input("go", ()).unwrap();
    dispatcher.execute_input("gone", ()).unwrap();
    assert_eq!(*trail.lock().unwrap(), ["go", "word"]);
}

#[test]
fn failed_sibling_does_not_stop_the_level() {
    let trail = Trail::default();
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(
        literal("set")
            .then(argument("n", IntegerArgument::new()).executes(record(&trail, "number")))
            .then(argument("w", StringArgument::word()).executes(record(&trail, "word"))),
    );

    let parse = dispatcher.parse("set hello", ());
    let context = parse.context().build(parse.input());
    assert_eq!(context.argument::<String>("w").unwrap(), "hello");
    assert!(!context.has_argument("n"));

    dispatcher.execute(&parse).unwrap();
    assert_eq!(*trail.lock().unwrap(), ["word"]);
}

#[test]
fn requirement_hides_branch() {
    let mut dispatcher = Dispatcher::<u8>::new();
    dispatcher.register(literal("stop").requires(|level: &u8| *level > 1).executes(|_| Ok(())));

    assert_eq!(
        dispatcher.execute_input("stop", 0).unwrap_err().kind,
        ErrorKind::UnknownCommand
    );
    dispatcher.execute_input("stop", 2).unwrap();
}

#[test]
fn greedy_and_exhaustive_strategies() {
    let build = |config| {
        let trail = Trail::default();
        let mut dispatcher = Dispatcher::with_config(config);
        dispatcher.register(argument("w", StringArgument::word()).executes(record(&trail, "word")));
        dispatcher.register(argument("all", StringArgument::greedy()).executes(record(&trail, "all")));
        (dispatcher, trail)
    };

    let (greedy, _) = build(DispatcherConfig::default());
    let parse = greedy.parse("hello world", ());
    assert!(!parse.is_complete());
    assert_eq!(greedy.execute(&parse).unwrap_err().kind, ErrorKind::ExpectedSeparator);

    let (exhaustive, trail) = build(DispatcherConfig::exhaustive());
    let parse = exhaustive.parse("hello world", ());
    assert!(parse.is_complete());
    exhaustive.execute(&parse).unwrap();
    assert_eq!(*trail.lock().unwrap(), ["all"]);
}

// =============================================================================
// Execution errors
// =============================================================================

#[test]
fn unknown_command() {
    let dispatcher = foo_grammar(&Trail::default());
    let error = dispatcher.execute_input("bar", ()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::UnknownCommand);
    assert_eq!(error.cursor(), Some(0));
}

#[test]
fn empty_input_is_unknown() {
    let dispatcher = foo_grammar(&Trail::default());
    assert_eq!(
        dispatcher.execute_input("", ()).unwrap_err().kind,
        ErrorKind::UnknownCommand
    );
}

#[test]
fn stopping_early_is_not_executable() {
    let dispatcher = foo_grammar(&Trail::default());
    assert_eq!(
        dispatcher.execute_input("foo", ()).unwrap_err().kind,
        ErrorKind::NotExecutable("foo".to_string())
    );
}

#[test]
fn trailing_data_needs_separator() {
    let dispatcher = foo_grammar(&Trail::default());
    let parse = dispatcher.parse("foo 42x", ());
    let n = dispatcher.find_node(&["foo", "n"]).unwrap();
    assert_eq!(parse.errors()[&n].kind, ErrorKind::ExpectedSeparator);
}

#[test]
fn leftover_input_reports_first_candidate_error() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(literal("set").then(argument("n", IntegerArgument::new()).executes(|_| Ok(()))));
    dispatcher.register(literal("set").then(argument("b", BoolArgument::new()).executes(|_| Ok(()))));

    let parse = dispatcher.parse("set xyz", ());
    let kinds: Vec<_> = parse.errors().values().map(|e| e.kind.clone()).collect();
    assert_eq!(
        kinds,
        [ErrorKind::ExpectedInt, ErrorKind::InvalidBool("xyz".to_string())]
    );

    let error = dispatcher.execute(&parse).unwrap_err();
    assert_eq!(error.kind, ErrorKind::ExpectedInt);
    assert_eq!(error.cursor(), Some(4));

    assert_eq!(
        dispatcher.execute_input("set 1 extra", ()).unwrap_err().kind,
        ErrorKind::ExpectedSeparator
    );
}

#[test]
fn handler_failure_surfaces() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(
        literal("fail").executes(|_| Err(Error::command_failed("boom"))),
    );
    assert_eq!(
        dispatcher.execute_input("fail", ()).unwrap_err().kind,
        ErrorKind::CommandFailed("boom".to_string())
    );
}

#[test]
fn parses_are_independent() {
    let dispatcher = foo_grammar(&Trail::default());
    let first = dispatcher.parse("foo 1", ());
    let second = dispatcher.parse("foo 2", ());
    let value = |parse: &ParseResults<()>| {
        parse
            .context()
            .build(parse.input())
            .argument::<i32>("n")
            .unwrap()
    };
    assert_eq!((value(&first), value(&second)), (1, 2));
}

#[test]
fn concurrent_parses_share_one_tree() {
    let mut dispatcher = Dispatcher::<u32>::new();
    dispatcher.register(
        literal("echo").then(argument("n", IntegerArgument::new()).executes(|ctx| {
            let n: i32 = ctx.argument("n")?;
            if u32::try_from(n).ok() == Some(*ctx.source()) {
                Ok(())
            } else {
                Err(Error::command_failed(format!("saw {n} as {}", ctx.source())))
            }
        })),
    );
    dispatcher.register(literal("exit").executes(|_| Ok(())));

    let dispatcher = &dispatcher;
    std::thread::scope(|scope| {
        let workers: Vec<_> = (0..8u32)
            .map(|id| {
                scope.spawn(move || {
                    for round in 0..200u32 {
                        let value = id * 1000 + round;
                        let parse = dispatcher.parse(&format!("echo {value}"), value);
                        dispatcher.execute(&parse)?;

                        let partial = dispatcher.parse("e", value);
                        let suggestions = dispatcher.completion_suggestions_at_end(&partial);
                        let texts: Vec<_> = suggestions.iter().map(|s| s.text().to_string()).collect();
                        assert_eq!(texts, ["echo", "exit"]);
                    }
                    Ok::<(), Error>(())
                })
            })
            .collect();

        for worker in workers {
            worker.join().unwrap().unwrap();
        }
    });
}

// =============================================================================
// Ranges
// =============================================================================

fn path_grammar(config: DispatcherConfig) -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::with_config(config);
    dispatcher.register(
        literal("tp").then(
            argument("x", IntegerArgument::new())
                .then(argument("y", IntegerArgument::new()).executes(|_| Ok(()))),
        ),
    );
    dispatcher.register(
        literal("say").then(argument("message", StringArgument::greedy()).executes(|_| Ok(()))),
    );
    dispatcher.register(
        literal("name").then(argument("value", StringArgument::string()).executes(|_| Ok(()))),
    );
    dispatcher
}

fn assert_ranges_cover(parse: &ParseResults<()>) {
    let nodes = parse.context().nodes();
    let mut previous_end = None;
    let mut union: Option<StringRange> = None;
    for parsed in nodes {
        let range = parsed.range();
        if let Some(end) = previous_end {
            assert!(range.start > end, "{nodes:?}");
        }
        previous_end = Some(range.end);
        union = Some(union.map_or(range, |u| StringRange::encompassing(u, range)));
    }
    if let Some(union) = union {
        assert_eq!(union, parse.context().range());
    }
}

#[test]
fn matched_ranges_follow_the_path() {
    let dispatcher = path_grammar(DispatcherConfig::default());
    let parse = dispatcher.parse("tp 10 -3", ());
    let ranges: Vec<_> = parse.context().nodes().iter().map(|n| n.range()).collect();
    assert_eq!(
        ranges,
        [
            StringRange::between(0, 2),
            StringRange::between(3, 5),
            StringRange::between(6, 8)
        ]
    );
    assert_eq!(parse.context().range(), StringRange::between(0, 8));
}

proptest! {
    #[test]
    fn ranges_are_increasing_and_cover_context(
        words in prop::collection::vec(
            prop_oneof![
                Just("tp"), Just("say"), Just("name"), Just("1"), Just("-20"),
                Just("x"), Just("\"quoted words\""), Just("\"open"), Just(""),
            ],
            0..6,
        )
    ) {
        let input = words.join(" ");
        for config in [DispatcherConfig::default(), DispatcherConfig::exhaustive()] {
            assert_ranges_cover(&path_grammar(config).parse(&input, ()));
        }
    }
}

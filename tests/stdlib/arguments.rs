//! Integration tests for argument types used through a dispatcher
//!
//! Tests bounds errors and their cursor, quoting, positions, and booleans.

use std::sync::{Arc, Mutex};

use argot_foundation::{ErrorKind, NumberKind};
use argot_grammar::{Dispatcher, Suggestion, argument, literal};
use argot_stdlib::{
    BoolArgument, DoubleArgument, IntegerArgument, Point, Position, PositionArgument,
    StringArgument, escape_if_required,
};

// =============================================================================
// Numbers
// =============================================================================

fn heal() -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(
        literal("heal")
            .then(argument("amount", IntegerArgument::between(1, 100)).executes(|_| Ok(()))),
    );
    dispatcher.register(
        literal("scale")
            .then(argument("factor", DoubleArgument::new().with_min(0.0)).executes(|_| Ok(()))),
    );
    dispatcher
}

#[test]
fn out_of_range_points_at_the_number() {
    let error = heal().execute_input("heal 200", ()).unwrap_err();
    assert_eq!(
        error.kind,
        ErrorKind::TooHigh {
            kind: NumberKind::Integer,
            found: "200".to_string(),
            max: "100".to_string(),
        }
    );
    assert_eq!(error.cursor(), Some(5));
    assert!(error.to_string().ends_with("heal <--[HERE]"));
}

#[test]
fn lower_bound_on_doubles() {
    let error = heal().execute_input("scale -0.5", ()).unwrap_err();
    assert!(matches!(
        error.kind,
        ErrorKind::TooLow {
            kind: NumberKind::Double,
            ..
        }
    ));
    heal().execute_input("scale 0", ()).unwrap();
}

#[test]
fn in_range_values_execute() {
    let dispatcher = heal();
    for input in ["heal 1", "heal 100", "scale 2.5", "scale .5"] {
        dispatcher.execute_input(input, ()).unwrap();
    }
}

// =============================================================================
// Strings
// =============================================================================

fn capture(kind: StringArgument) -> (Dispatcher<()>, Arc<Mutex<Vec<String>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let mut dispatcher = Dispatcher::new();
    dispatcher.register(literal("set").then(argument("text", kind).executes(move |ctx| {
        sink.lock().unwrap().push(ctx.argument::<String>("text")?);
        Ok(())
    })));
    (dispatcher, seen)
}

#[test]
fn escaped_text_round_trips_through_quotable() {
    let (dispatcher, seen) = capture(StringArgument::string());
    let texts = ["plain", "two words", "say \"hi\"", "back\\slash", "x+y:z"];
    for text in texts {
        let input = format!("set {}", escape_if_required(text));
        dispatcher.execute_input(&input, ()).unwrap();
    }
    assert_eq!(*seen.lock().unwrap(), texts);
}

#[test]
fn single_quotes_also_delimit() {
    let (dispatcher, seen) = capture(StringArgument::string());
    dispatcher.execute_input("set 'it \"works\"'", ()).unwrap();
    assert_eq!(*seen.lock().unwrap(), ["it \"works\""]);
}

#[test]
fn bad_escape_is_a_hard_error() {
    let (dispatcher, _) = capture(StringArgument::string());
    let error = dispatcher.execute_input("set \"a\\nb\"", ()).unwrap_err();
    assert_eq!(error.kind, ErrorKind::InvalidEscape('n'));
}

#[test]
fn word_rejects_second_token() {
    let (dispatcher, _) = capture(StringArgument::word());
    assert!(dispatcher.execute_input("set two words", ()).is_err());
}

#[test]
fn greedy_keeps_spacing() {
    let (dispatcher, seen) = capture(StringArgument::greedy());
    dispatcher.execute_input("set a  b \"c", ()).unwrap();
    assert_eq!(*seen.lock().unwrap(), ["a  b \"c"]);
}

// =============================================================================
// Positions & booleans
// =============================================================================

#[test]
fn position_resolves_against_source() {
    let mut dispatcher = Dispatcher::<Point>::new();
    let landed = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&landed);
    dispatcher.register(literal("tp").then(argument("to", PositionArgument::new()).executes(
        move |ctx| {
            let to: Position = ctx.argument("to")?;
            *sink.lock().unwrap() = Some(to.resolve(*ctx.source()));
            Ok(())
        },
    )));

    dispatcher.execute_input("tp ~ ~-2", Point::new(4.0, 4.0)).unwrap();
    assert_eq!(*landed.lock().unwrap(), Some(Point::new(4.0, 2.0)));

    let error = dispatcher.execute_input("tp 1", Point::default()).unwrap_err();
    assert!(matches!(error.kind, ErrorKind::IncompleteArgument(_)));
}

#[test]
fn boolean_suggestions_through_dispatcher() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(
        literal("debug").then(argument("on", BoolArgument::new()).executes(|_| Ok(()))),
    );

    let parse = dispatcher.parse("debug F", ());
    let suggestions = dispatcher.completion_suggestions_at_end(&parse);
    let texts: Vec<_> = suggestions.iter().map(Suggestion::text).collect();
    assert_eq!(texts, ["false"]);
    assert_eq!(
        dispatcher.execute_input("debug maybe", ()).unwrap_err().kind,
        ErrorKind::InvalidBool("maybe".to_string())
    );
}

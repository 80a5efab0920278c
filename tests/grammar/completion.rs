//! Integration tests for the suggestion engine
//!
//! Tests context location, merging onto a common range, contributor
//! isolation, and that applied suggestions parse.

use argot_foundation::{Error, StringRange};
use argot_grammar::{
    Dispatcher, DispatcherConfig, Suggestion, Suggestions, SuggestionsBuilder, argument, literal,
};
use argot_stdlib::{
    BoolArgument, IntegerArgument, PositionArgument, StringArgument, suggest_matching,
};

const COLORS: [&str; 3] = ["green", "grey", "red"];

fn grammar(config: DispatcherConfig) -> Dispatcher<()> {
    let mut dispatcher = Dispatcher::with_config(config);
    dispatcher.register(
        literal("tp").then(argument("to", PositionArgument::new()).executes(|_| Ok(()))),
    );
    dispatcher.register(
        literal("toggle").then(argument("value", BoolArgument::new()).executes(|_| Ok(()))),
    );
    dispatcher.register(
        literal("color").then(
            argument("name", StringArgument::word())
                .suggests(|_, builder| Ok(suggest_matching(COLORS, builder)))
                .executes(|_| Ok(())),
        ),
    );
    dispatcher
}

fn complete(dispatcher: &Dispatcher<()>, input: &str) -> Suggestions {
    let parse = dispatcher.parse(input, ());
    dispatcher.completion_suggestions_at_end(&parse)
}

fn texts(suggestions: &Suggestions) -> Vec<&str> {
    suggestions.iter().map(Suggestion::text).collect()
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn merge_widens_to_common_range() {
    let input = "abc";
    let foo = Suggestions::create(input, vec![Suggestion::new(StringRange::between(0, 3), "foo")]);
    let bar = Suggestions::create(input, vec![Suggestion::new(StringRange::between(0, 2), "bar")]);

    let merged = Suggestions::merge(input, vec![foo, bar]);
    assert_eq!(merged.range(), StringRange::between(0, 3));
    assert_eq!(texts(&merged), ["barc", "foo"]);
    for suggestion in &merged {
        assert_eq!(suggestion.range(), merged.range());
    }
}

#[test]
fn merging_nothing_is_canonical_empty() {
    let merged = Suggestions::merge("abc", Vec::new());
    assert!(merged.is_empty());
    assert_eq!(merged.range(), StringRange::between(0, 0));
}

// =============================================================================
// Locating the active node
// =============================================================================

#[test]
fn root_literals_by_prefix() {
    let dispatcher = grammar(DispatcherConfig::default());
    assert_eq!(texts(&complete(&dispatcher, "")), ["color", "toggle", "tp"]);
    assert_eq!(texts(&complete(&dispatcher, "t")), ["toggle", "tp"]);
    assert_eq!(complete(&dispatcher, "t").range(), StringRange::between(0, 1));
}

#[test]
fn arguments_after_a_literal() {
    let dispatcher = grammar(DispatcherConfig::default());
    let suggestions = complete(&dispatcher, "toggle ");
    assert_eq!(texts(&suggestions), ["false", "true"]);
    assert_eq!(suggestions.range(), StringRange::at(7));

    assert_eq!(texts(&complete(&dispatcher, "color gr")), ["green", "grey"]);
    assert_eq!(texts(&complete(&dispatcher, "tp 5")), ["5 ~"]);
}

#[test]
fn cursor_inside_the_input() {
    let dispatcher = grammar(DispatcherConfig::default());
    let parse = dispatcher.parse("toggle true", ());
    let suggestions = dispatcher.completion_suggestions(&parse, 2);
    assert_eq!(texts(&suggestions), ["toggle"]);
    assert_eq!(suggestions.range(), StringRange::between(0, 2));
}

#[test]
fn sequential_matches_parallel() {
    let parallel = grammar(DispatcherConfig::default());
    let sequential = grammar(DispatcherConfig::sequential());
    for input in ["", "t", "tp ", "toggle f", "color ", "color r"] {
        assert_eq!(complete(&parallel, input), complete(&sequential, input), "{input}");
    }
}

// =============================================================================
// Contributor isolation
// =============================================================================

#[test]
fn failing_contributors_contribute_nothing() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(
        literal("pick")
            .then(
                argument("broken", IntegerArgument::new())
                    .suggests(|_, _| Err(Error::internal("no data"))),
            )
            .then(
                argument("panics", StringArgument::word())
                    .suggests(|_, _: SuggestionsBuilder| panic!("contributor bug")),
            )
            .then(literal("first"))
            .then(literal("last")),
    );
    assert_eq!(texts(&complete(&dispatcher, "pick ")), ["first", "last"]);
}

// =============================================================================
// Applied suggestions parse
// =============================================================================

#[test]
fn applied_suggestions_parse() {
    let dispatcher = grammar(DispatcherConfig::default());
    let inputs = [
        "", "t", "to", "toggle ", "toggle t", "tp ", "tp 5", "tp ~1", "color ", "color g",
    ];
    for input in inputs {
        let suggestions = complete(&dispatcher, input);
        assert!(!suggestions.is_empty(), "{input:?}");
        for suggestion in &suggestions {
            let applied = suggestion.apply(input);
            let parse = dispatcher.parse(&applied, ());
            assert_eq!(
                parse.context().range().end,
                applied.len(),
                "{input:?} -> {applied:?}"
            );
        }
    }
}

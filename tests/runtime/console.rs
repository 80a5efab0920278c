//! Integration tests for the command console

use argot_foundation::ErrorKind;
use argot_grammar::DispatcherConfig;
use argot_runtime::{Console, ConsoleConfig, DemoSource, demo_dispatcher};
use argot_stdlib::Point;

fn console(config: ConsoleConfig) -> Console<DemoSource> {
    Console::with_config(demo_dispatcher(DispatcherConfig::default()), config)
}

#[test]
fn session_state_persists_across_lines() {
    let console = console(ConsoleConfig::default());
    let source = DemoSource::new("op", 2);

    for line in ["/teleport 3 4", "/teleport ~1 ~-1", "/toggle fast_travel"] {
        assert!(console.execute_line(line, source.clone()).is_success(), "{line}");
    }
    assert_eq!(source.position(), Point::new(4.0, 3.0));
    assert_eq!(source.flag("fast_travel"), Some(true));
}

#[test]
fn custom_prefix() {
    let console = console(ConsoleConfig::default().with_prefix("!"));
    let outcome = console.execute_line("!add 1 2", DemoSource::default());
    assert_eq!(outcome.messages(), ["3"]);

    let outcome = console.execute_line("/add 1 2", DemoSource::default());
    assert_eq!(
        outcome.error().map(|e| e.kind.clone()),
        Some(ErrorKind::UnknownCommand)
    );
}

#[test]
fn failures_carry_context() {
    let console = console(ConsoleConfig::default());
    let outcome = console.execute_line("/add 1 two", DemoSource::default());
    let error = outcome.error().unwrap();
    assert_eq!(error.kind, ErrorKind::ExpectedInt);
    assert_eq!(error.cursor(), Some(6));
    assert_eq!(outcome.diagnostics().len(), 1);
}

#[test]
fn completion_offsets_account_for_prefix() {
    let console = console(ConsoleConfig::default());
    let completion = console.complete("/toggle ", 8, DemoSource::default());
    assert_eq!(completion.start(), 8);
    let candidates: Vec<_> = completion.candidates().collect();
    assert_eq!(candidates, ["debug_overlay", "fast_travel", "god_mode", "night_vision"]);

    let completion = console.complete("/tel", 4, DemoSource::default());
    assert_eq!(completion.start(), 1);
    assert_eq!(completion.candidates().collect::<Vec<_>>(), ["teleport"]);
}

#[test]
fn completion_mid_line() {
    let console = console(ConsoleConfig::default());
    let completion = console.complete("/ech hello", 4, DemoSource::default());
    assert_eq!(completion.start(), 1);
    assert_eq!(completion.candidates().collect::<Vec<_>>(), ["echo"]);
}

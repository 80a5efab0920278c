//! Integration tests for the REPL loop with a scripted editor

use std::collections::VecDeque;
use std::sync::Arc;

use argot_foundation::Result;
use argot_grammar::DispatcherConfig;
use argot_runtime::{
    Console, ConsoleConfig, DemoSource, LineEditor, ReadResult, Repl, demo_dispatcher,
};
use argot_stdlib::Point;

struct Script(VecDeque<&'static str>);

impl LineEditor for Script {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        Ok(self
            .0
            .pop_front()
            .map_or(ReadResult::Eof, |line| ReadResult::Line(line.to_string())))
    }

    fn add_history(&mut self, _line: &str) {}
}

#[test]
fn scripted_session() {
    let console = Arc::new(Console::with_config(
        demo_dispatcher(DispatcherConfig::sequential()),
        ConsoleConfig::quiet(),
    ));
    let source = DemoSource::new("op", 2);
    let script = Script(VecDeque::from([
        "/teleport 10 10",
        "/nonsense",
        "/teleport ~ ~5",
        "/toggle night_vision",
    ]));

    let mut repl = Repl::with_editor(script, console, source.clone());
    repl.run().unwrap();

    assert_eq!(source.position(), Point::new(10.0, 15.0));
    assert_eq!(source.flag("night_vision"), Some(true));
}

#[test]
fn eval_reports_without_running_loop() {
    let console = Arc::new(Console::new(demo_dispatcher(DispatcherConfig::default())));
    let repl = Repl::with_editor(Script(VecDeque::new()), console, DemoSource::default());
    let outcome = repl.eval("say \"quoted words\"");
    assert_eq!(outcome.messages(), ["<player> quoted words"]);
}

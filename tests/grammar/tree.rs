//! Integration tests for grammar construction
//!
//! Tests subtree merging, handler overwrite, lookup, and usage text.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use argot_grammar::{ArgumentBuilder, Dispatcher, argument, literal};
use argot_stdlib::IntegerArgument;

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

// =============================================================================
// Merging
// =============================================================================

#[test]
fn separate_registrations_share_a_node() {
    let mut dispatcher = Dispatcher::<()>::new();
    let (b_hits, c_hits) = (counter(), counter());
    let b = Arc::clone(&b_hits);
    let c = Arc::clone(&c_hits);

    dispatcher.register(literal("a").then(literal("b").executes(move |_| {
        b.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })));
    dispatcher.register(literal("a").then(literal("c").executes(move |_| {
        c.fetch_add(1, Ordering::SeqCst);
        Ok(())
    })));

    let a = dispatcher.find_node(&["a"]).unwrap();
    let names: Vec<_> = dispatcher
        .tree()
        .node(a)
        .children()
        .iter()
        .map(|&id| dispatcher.tree().node(id).name().to_string())
        .collect();
    assert_eq!(names, ["b", "c"]);
    assert_eq!(dispatcher.tree().len(), 4);

    dispatcher.execute_input("a b", ()).unwrap();
    dispatcher.execute_input("a c", ()).unwrap();
    assert_eq!(b_hits.load(Ordering::SeqCst), 1);
    assert_eq!(c_hits.load(Ordering::SeqCst), 1);
}

#[test]
fn registering_twice_is_idempotent() {
    let mut dispatcher = Dispatcher::<()>::new();
    for _ in 0..3 {
        dispatcher.register(literal("a").then(literal("b").executes(|_| Ok(()))));
    }
    assert_eq!(dispatcher.tree().len(), 3);
}

#[test]
fn incoming_handler_overwrites() {
    let mut dispatcher = Dispatcher::<()>::new();
    let hits = counter();
    let seen = Arc::clone(&hits);
    dispatcher.register(literal("a").executes(|_| Ok(())));
    dispatcher.register(literal("a").executes(move |_| {
        seen.fetch_add(10, Ordering::SeqCst);
        Ok(())
    }));
    dispatcher.execute_input("a", ()).unwrap();
    assert_eq!(hits.load(Ordering::SeqCst), 10);
}

#[test]
fn merge_without_handler_keeps_existing() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(literal("a").executes(|_| Ok(())));
    dispatcher.register(literal("a").then(literal("b")));
    let a = dispatcher.find_node(&["a"]).unwrap();
    assert!(dispatcher.tree().node(a).is_executable());
}

// =============================================================================
// Lookup & usage
// =============================================================================

#[test]
fn find_node_walks_names() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(
        literal("give").then(argument_count().then(literal("now").executes(|_| Ok(())))),
    );
    assert!(dispatcher.find_node(&["give", "count", "now"]).is_some());
    assert!(dispatcher.find_node(&["give", "now"]).is_none());
    assert_eq!(dispatcher.find_node(&[]), Some(dispatcher.root()));
}

fn argument_count() -> ArgumentBuilder<()> {
    argument("count", IntegerArgument::between(1, 64)).executes(|_| Ok(()))
}

#[test]
fn usage_lists_executable_paths() {
    let mut dispatcher = Dispatcher::<()>::new();
    dispatcher.register(
        literal("give").then(argument_count().then(literal("now").executes(|_| Ok(())))),
    );
    dispatcher.register(literal("stop").executes(|_| Ok(())));

    let usage = dispatcher.usage(dispatcher.root(), &(), false);
    assert_eq!(usage, ["give <count>", "give <count> now", "stop"]);

    let give = dispatcher.find_node(&["give"]).unwrap();
    assert_eq!(dispatcher.usage(give, &(), false), ["<count>", "<count> now"]);
}

#[test]
fn restricted_usage_hides_unusable_nodes() {
    let mut dispatcher = Dispatcher::<u8>::new();
    dispatcher.register(literal("open").executes(|_| Ok(())));
    dispatcher.register(literal("admin").requires(|level: &u8| *level >= 3).executes(|_| Ok(())));

    assert_eq!(dispatcher.usage(dispatcher.root(), &0, true), ["open"]);
    assert_eq!(dispatcher.usage(dispatcher.root(), &3, true), ["open", "admin"]);
    assert_eq!(dispatcher.usage(dispatcher.root(), &0, false), ["open", "admin"]);
}

#![allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::Pattern;
use pretty_assertions::assert_eq;

fn literal(text: &str) -> Pattern {
    Pattern::from_literal(text).unwrap()
}

fn engine() -> Remix {
    Remix::new(Arc::new(Registry::new()))
}

// === Composition and caching ===

#[test]
fn new_engine_has_no_specs() {
    let mut re = engine();
    assert!(!re.has_specs());
    assert!(re.name().is_none());
    assert_eq!(re.to_debug_string().unwrap(), "");
}

#[test]
fn compile_is_cached_until_mutation() {
    let mut re = engine();
    re.add(literal("/a/"));
    let first = re.compile(false).unwrap();
    let second = re.compile(false).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    re.add(literal("/b/"));
    assert!(!re.is_compiled());
    let third = re.compile(false).unwrap();
    assert_eq!(third.generation(), first.generation() + 1);
    assert_eq!(third.leaves().len(), 2);
}

#[test]
fn forced_compile_rebuilds() {
    let mut re = engine();
    re.add(literal("/a/"));
    let first = re.compile(false).unwrap();
    let forced = re.compile(true).unwrap();
    assert!(!Arc::ptr_eq(&first, &forced));
}

#[test]
fn lazy_specs_run_on_every_compile() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let mut re = engine();
    re.add(Spec::lazy(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Spec::template("x")
    }));

    re.compile(false).unwrap();
    re.compile(false).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    re.compile(true).unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn clear_removes_specs() {
    let mut re = engine();
    re.add(literal("/a/")).clear();
    assert!(!re.has_specs());
    assert!(re.compile(false).unwrap().leaves().is_empty());
}

#[test]
fn add_named_prefixes_namespace() {
    let mut re = Remix::named("lex", Arc::new(Registry::new()));
    re.add_named("num", [literal(r"/\d+/")]);
    let mut subject = Subject::new("42");
    let matched = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(matched.namespace(), "lex.num");
}

#[test]
fn set_name_and_options_invalidate() {
    let mut re = engine();
    re.add(Spec::named("k", literal("/a/")));
    re.compile(false).unwrap();

    re.set_name("root");
    assert!(!re.is_compiled());
    re.set_options(Options::default().with_namespace_delimiter("::"));
    assert!(!re.is_compiled());

    let program = re.compile(false).unwrap();
    assert_eq!(&*program.leaves()[0].namespace, "root::k");
}

#[test]
fn clones_do_not_share_cursors() {
    let mut re = engine();
    re.add(literal("/a/"));
    let mut copy = re.clone();
    assert_ne!(re.id(), copy.id());

    let mut subject = Subject::new("aa");
    re.exec(&mut subject).unwrap().unwrap();
    let matched = copy.exec(&mut subject).unwrap().unwrap();
    assert_eq!(matched.start(), 0);
}

// === exec ===

#[test]
fn exec_advances_and_exhausts() {
    let mut re = engine();
    re.add(literal("/(foo)o/")).add(literal("/(bar)r/i"));
    let mut subject = Subject::new("foooBarr");

    let first = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(first.namespace(), "");
    assert_eq!(first.index(), 0);
    assert_eq!(first.last_index(), 4);

    let second = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(second.index(), 1);
    assert_eq!(second.last_index(), 8);
    assert_eq!(subject.scan_state(re.id()).unwrap().position().batch_index, 1);

    assert!(re.exec(&mut subject).unwrap().is_none());
    assert!(subject.is_exhausted(re.id()));
    assert!(re.exec(&mut subject).unwrap().is_none());
}

#[test]
fn engines_scan_one_subject_independently() {
    let mut words = engine();
    words.add(literal(r"/\w+/"));
    let mut chars = engine();
    chars.add(literal("/./"));

    let mut subject = Subject::new("ab");
    assert_eq!(words.exec(&mut subject).unwrap().unwrap().as_str(), "ab");
    assert_eq!(chars.exec(&mut subject).unwrap().unwrap().as_str(), "a");
    assert_eq!(chars.exec(&mut subject).unwrap().unwrap().as_str(), "b");
    assert!(words.exec(&mut subject).unwrap().is_none());
}

#[test]
fn recompile_keeps_offset_but_restarts_batches() {
    let mut re = engine();
    re.add(literal("/a/")).add(literal("/B/i"));
    let mut subject = Subject::new("abab");
    re.exec(&mut subject).unwrap().unwrap();
    re.exec(&mut subject).unwrap().unwrap();

    re.add(literal("/c/"));
    let matched = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(matched.span(), 2..3);
    let state = subject.scan_state(re.id()).unwrap();
    assert_eq!(state.position().batch_index, 0);
    assert_eq!(state.depth(), 1);
}

// === reject ===

#[test]
fn reject_without_exec_is_invalid() {
    let re = engine();
    let mut subject = Subject::new("abc");
    let err = re.reject(&mut subject).unwrap_err();
    assert!(matches!(err, RemixError::InvalidState { engine } if engine == re.id()));
}

#[test]
fn reject_rewinds_one_match_per_call() {
    let mut re = engine();
    re.add(literal("/./"));
    let mut subject = Subject::new("xyz");
    re.exec(&mut subject).unwrap().unwrap();
    re.exec(&mut subject).unwrap().unwrap();

    re.reject(&mut subject).unwrap();
    assert_eq!(subject.last_index(re.id()), Some(1));
    re.reject(&mut subject).unwrap();
    assert_eq!(subject.last_index(re.id()), Some(0));
    assert!(re.reject(&mut subject).is_err());

    assert_eq!(re.exec(&mut subject).unwrap().unwrap().as_str(), "x");
}

#[test]
fn reject_restores_the_batch_index() {
    let mut re = engine();
    re.add(literal("/a/")).add(literal("/B/i"));
    let mut subject = Subject::new("ab");
    re.exec(&mut subject).unwrap().unwrap();
    re.exec(&mut subject).unwrap().unwrap();
    re.reject(&mut subject).unwrap();

    let position = subject.scan_state(re.id()).unwrap().position();
    assert_eq!(
        position,
        Position {
            batch_index: 0,
            offset: 1
        }
    );
}

#[test]
fn reject_after_exhaustion_is_invalid() {
    let mut re = engine();
    re.add(literal("/a/"));
    let mut subject = Subject::new("b");
    assert!(re.exec(&mut subject).unwrap().is_none());
    assert!(re.reject(&mut subject).is_err());
}

// === Cursor control ===

#[test]
fn reset_restarts_from_zero() {
    let mut re = engine();
    re.add(literal("/a/"));
    let mut subject = Subject::new("a");
    re.exec(&mut subject).unwrap().unwrap();
    assert!(re.exec(&mut subject).unwrap().is_none());

    re.reset(&mut subject);
    assert!(!subject.is_exhausted(re.id()));
    assert_eq!(re.exec(&mut subject).unwrap().unwrap().start(), 0);
}

#[test]
fn set_last_index_moves_the_cursor() {
    let mut re = engine();
    re.add(literal("/./"));
    let mut subject = Subject::new("abc");
    re.set_last_index(&mut subject, 2);
    assert_eq!(re.exec(&mut subject).unwrap().unwrap().as_str(), "c");
    assert!(re.exec(&mut subject).unwrap().is_none());

    re.set_last_index(&mut subject, 1);
    assert_eq!(re.exec(&mut subject).unwrap().unwrap().as_str(), "b");
}

// === test ===

#[test]
fn test_probes_all_batches() {
    let mut re = engine();
    re.add(literal("/x/")).add(literal("/Y/i"));
    assert!(re.test("..y..").unwrap());
    assert!(re.test("x").unwrap());
    assert!(!re.test("z").unwrap());
}

#[test]
fn test_leaves_cursors_alone() {
    let mut re = engine();
    re.add(literal("/a/"));
    let subject = Subject::new("a");
    assert!(re.test(subject.text()).unwrap());
    assert!(subject.scan_state(re.id()).is_none());
}

// === Templates ===

#[test]
fn templates_resolve_against_engine_registry() {
    let registry = Arc::new(Registry::with_builtins());
    let mut re = Remix::new(Arc::clone(&registry));
    re.add(Spec::keyed([("word", "{word+}"), ("space", "{space+}")]));

    let mut subject = Subject::new("hi there");
    let tokens: Vec<_> = std::iter::from_fn(|| re.exec(&mut subject).unwrap())
        .map(|m| (m.namespace().to_owned(), m.as_str()))
        .collect();
    assert_eq!(
        tokens,
        vec![
            ("word".to_owned(), "hi"),
            ("space".to_owned(), " "),
            ("word".to_owned(), "there"),
        ]
    );
}

#[test]
fn template_errors_surface_from_exec() {
    let mut re = engine();
    re.add("{bad one}");
    let mut subject = Subject::new("x");
    assert!(matches!(
        re.exec(&mut subject),
        Err(RemixError::Template(_))
    ));
}

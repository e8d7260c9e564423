//! End-to-end scanning scenarios.

#![allow(
    clippy::unwrap_used,
    reason = "tests use unwrap to panic on unexpected state"
)]

use std::sync::Arc;

use pretty_assertions::assert_eq;
use remix::{Options, Pattern, Registry, Remix, RemixError, Spec, Subject, TemplateError};

fn literal(text: &str) -> Pattern {
    Pattern::from_literal(text).unwrap()
}

#[test]
fn foo_bar_scan() {
    let mut re = Remix::new(Arc::new(Registry::new()));
    re.add(literal("/(foo)o/")).add(literal("/(bar)r/i"));
    assert_eq!(re.to_debug_string().unwrap(), "/((foo)o)/g /((bar)r)/ig");

    let mut subject = Subject::new("foooBarr");

    let first = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(first.namespace(), "");
    assert_eq!(
        first.groups(),
        &[vec![Some("fooo"), Some("foo")], vec![None, None]]
    );
    assert_eq!(first.last_index(), 4);

    let second = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(
        second.groups(),
        &[vec![None, None], vec![Some("Barr"), Some("Bar")]]
    );
    assert_eq!(second.last_index(), 8);

    assert!(re.exec(&mut subject).unwrap().is_none());
}

#[test]
fn nested_names_with_slash_delimiter() {
    let mut re = Remix::new(Arc::new(Registry::new()));
    re.set_options(Options::default().with_namespace_delimiter("/"));
    re.add(Spec::named("a1", Spec::named("a2", literal("/x/"))));

    let mut subject = Subject::new("x");
    let matched = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(matched.namespace(), "a1/a2");
}

#[test]
fn nested_engines_compose_namespaces() {
    let registry = Arc::new(Registry::with_builtins());

    let mut number = Remix::named("num", Arc::clone(&registry));
    number.add(Spec::keyed([("hex", "0x[0-9a-f]+"), ("dec", r"\d+")]));

    let mut glue = Remix::new(Arc::clone(&registry));
    glue.add("{space+}");

    let mut lexer = Remix::named("lex", Arc::clone(&registry));
    lexer.add(number).add(glue);

    let mut subject = Subject::new("0x1f 42");
    let tokens: Vec<_> = std::iter::from_fn(|| lexer.exec(&mut subject).unwrap())
        .map(|m| (m.namespace().to_owned(), m.as_str()))
        .collect();
    assert_eq!(
        tokens,
        vec![
            ("lex.num.hex".to_owned(), "0x1f"),
            ("lex".to_owned(), " "),
            ("lex.num.dec".to_owned(), "42"),
        ]
    );
}

#[test]
fn sticky_rejection_replays_the_match() {
    let mut re = Remix::new(Arc::new(Registry::new()));
    re.set_options(Options::default().with_sticky(false));
    re.add(literal("/(ooo|rrr)/"));
    let mut subject = Subject::new("fooooobarrrrrr");

    let first = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(first.groups(), &[vec![Some("ooo"), Some("ooo")]]);
    assert_eq!(first.last_index(), 4);

    re.reject(&mut subject).unwrap();
    let replayed = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(replayed, first);

    let next = re.exec(&mut subject).unwrap().unwrap();
    assert_eq!(next.groups(), &[vec![Some("rrr"), Some("rrr")]]);
    assert_eq!(next.last_index(), 11);
}

#[test]
fn sticky_mode_stops_at_a_gap() {
    let mut re = Remix::new(Arc::new(Registry::new()));
    re.add(literal("/(ooo|rrr)/"));
    let mut subject = Subject::new("fooooobarrrrrr");
    assert!(re.exec(&mut subject).unwrap().is_none());

    re.set_last_index(&mut subject, 1);
    assert_eq!(re.exec(&mut subject).unwrap().unwrap().last_index(), 4);
    assert!(re.exec(&mut subject).unwrap().is_none());
}

#[test]
fn exhaustion_holds_until_reset() {
    let mut re = Remix::new(Arc::new(Registry::new()));
    re.add(literal("/ab/"));
    let mut subject = Subject::new("abab");

    assert_eq!(re.exec(&mut subject).unwrap().unwrap().start(), 0);
    assert_eq!(re.exec(&mut subject).unwrap().unwrap().start(), 2);
    for _ in 0..3 {
        assert!(re.exec(&mut subject).unwrap().is_none());
    }

    re.reset(&mut subject);
    assert_eq!(re.exec(&mut subject).unwrap().unwrap().start(), 0);
}

#[test]
fn duplicate_registration_keeps_the_first() {
    let registry = Registry::new();
    registry.register("foo", literal("/foo/")).unwrap();
    let err = registry.register("foo", literal("/bar/")).unwrap_err();
    assert!(matches!(err, TemplateError::DuplicateIdentifier { .. }));
    assert_eq!(registry.get_registered("foo").unwrap().source(), "foo");
}

#[test]
fn batch_partition_follows_case_flags() {
    let mut re = Remix::new(Arc::new(Registry::new()));
    re.add_all([
        literal("/a/"),
        literal("/b/"),
        literal("/c/i"),
        literal("/d/i"),
        literal("/e/"),
    ]);
    assert_eq!(re.to_debug_string().unwrap(), "/(a)|(b)/g /(c)|(d)/ig /(e)/g");
}

#[test]
fn broken_join_names_the_batch() {
    let mut re = Remix::named("t", Arc::new(Registry::new()));
    re.add(Spec::keyed([
        ("one", literal("/(?P<x>a)/")),
        ("two", literal("/(?P<x>b)/")),
    ]));
    let err = re.compile(false).unwrap_err();
    assert!(matches!(err, RemixError::PatternConstruction { .. }));
    assert!(err.to_string().contains("[t.one, t.two]"), "{err}");
}

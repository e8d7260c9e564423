//! Spec trees.
//!
//! A [`Spec`] describes what an engine matches and under which names. It is
//! a closed set of shapes resolved by exhaustive matching during
//! compilation (see [`crate::resolve`]), so a named sub-spec and a keyed map
//! can never be confused.

use std::fmt;
use std::sync::Arc;

use remix_pattern::Pattern;

use crate::Remix;

/// Generator signature of [`Spec::Lazy`]: receives the current namespace.
pub type LazyFn = dyn Fn(&str) -> Spec + Send + Sync;

/// A spec generated on demand, re-invoked on every compile.
#[derive(Clone)]
pub struct LazySpec(Arc<LazyFn>);

impl LazySpec {
    pub fn new(generate: impl Fn(&str) -> Spec + Send + Sync + 'static) -> Self {
        LazySpec(Arc::new(generate))
    }

    /// Generate the spec for `namespace`.
    #[inline]
    pub fn generate(&self, namespace: &str) -> Spec {
        (self.0)(namespace)
    }
}

impl fmt::Debug for LazySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("LazySpec(..)")
    }
}

/// A node of a spec tree.
#[derive(Clone, Debug)]
pub enum Spec {
    /// One concrete pattern.
    Leaf(Pattern),
    /// A template, expanded against the engine's registry at compile time.
    Template(String),
    /// A sub-spec under one more namespace segment.
    Named { name: String, spec: Box<Spec> },
    /// Specs in match priority order.
    Sequence(Vec<Spec>),
    /// Sub-specs named by key, in insertion order.
    Keyed(Vec<(String, Spec)>),
    /// A generator invoked with the current namespace on every compile.
    Lazy(LazySpec),
    /// Another engine's specs, under its name if it has one.
    Engine(Arc<Remix>),
}

impl Spec {
    /// `spec` under the namespace segment `name`.
    pub fn named(name: impl Into<String>, spec: impl Into<Spec>) -> Self {
        Spec::Named {
            name: name.into(),
            spec: Box::new(spec.into()),
        }
    }

    /// Keyed sub-specs, kept in iteration order.
    pub fn keyed<I, K, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, S)>,
        K: Into<String>,
        S: Into<Spec>,
    {
        Spec::Keyed(
            entries
                .into_iter()
                .map(|(key, spec)| (key.into(), spec.into()))
                .collect(),
        )
    }

    /// Specs in order.
    pub fn sequence<I, S>(specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        Spec::Sequence(specs.into_iter().map(Into::into).collect())
    }

    pub fn template(template: impl Into<String>) -> Self {
        Spec::Template(template.into())
    }

    pub fn lazy(generate: impl Fn(&str) -> Spec + Send + Sync + 'static) -> Self {
        Spec::Lazy(LazySpec::new(generate))
    }
}

impl From<Pattern> for Spec {
    fn from(pattern: Pattern) -> Self {
        Spec::Leaf(pattern)
    }
}

impl From<&str> for Spec {
    fn from(template: &str) -> Self {
        Spec::Template(template.to_owned())
    }
}

impl From<String> for Spec {
    fn from(template: String) -> Self {
        Spec::Template(template)
    }
}

impl From<Vec<Spec>> for Spec {
    fn from(specs: Vec<Spec>) -> Self {
        Spec::Sequence(specs)
    }
}

impl From<Remix> for Spec {
    fn from(engine: Remix) -> Self {
        Spec::Engine(Arc::new(engine))
    }
}

impl From<Arc<Remix>> for Spec {
    fn from(engine: Arc<Remix>) -> Self {
        Spec::Engine(engine)
    }
}

impl From<LazySpec> for Spec {
    fn from(lazy: LazySpec) -> Self {
        Spec::Lazy(lazy)
    }
}

//! Spec tree flattening.
//!
//! Walks a spec tree depth-first and copies every leaf out as a
//! [`NamedLeaf`], tagged with the namespace path that led to it. Leaf order
//! is flattening order and is the only source of leaf indices.

use std::sync::Arc;

use remix_pattern::Pattern;
use remix_template::{resolve_template, Registry};
use tracing::trace;

use crate::program::NamedLeaf;
use crate::{RemixError, Spec};

/// Minimum stack space to keep available before descending (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Stack space allocated per growth (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

#[inline]
#[cfg(not(target_arch = "wasm32"))]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

/// Flatten `specs` under the optional `root` segment.
///
/// Templates are expanded against `registry`, including templates inside
/// nested engines.
pub(crate) fn flatten(
    registry: &Registry,
    delimiter: &str,
    root: Option<&str>,
    specs: &[Spec],
) -> Result<Vec<NamedLeaf>, RemixError> {
    let mut resolver = Resolver {
        registry,
        delimiter,
        path: Vec::new(),
        leaves: Vec::new(),
    };
    resolver.scoped(root, |resolver| {
        specs.iter().try_for_each(|spec| resolver.walk(spec))
    })?;
    Ok(resolver.leaves)
}

struct Resolver<'a> {
    registry: &'a Registry,
    delimiter: &'a str,
    path: Vec<String>,
    leaves: Vec<NamedLeaf>,
}

impl Resolver<'_> {
    fn walk(&mut self, spec: &Spec) -> Result<(), RemixError> {
        ensure_sufficient_stack(|| match spec {
            Spec::Leaf(pattern) => {
                self.emit(pattern.clone());
                Ok(())
            }
            Spec::Template(text) => {
                let pattern = resolve_template(self.registry, text)?;
                self.emit(pattern);
                Ok(())
            }
            Spec::Named { name, spec } => self.scoped(Some(name.as_str()), |this| this.walk(spec)),
            Spec::Sequence(specs) => specs.iter().try_for_each(|spec| self.walk(spec)),
            Spec::Keyed(entries) => entries
                .iter()
                .try_for_each(|(key, spec)| self.scoped(Some(key.as_str()), |this| this.walk(spec))),
            Spec::Lazy(lazy) => {
                let generated = lazy.generate(&self.namespace());
                self.walk(&generated)
            }
            Spec::Engine(engine) => self.scoped(engine.name(), |this| {
                engine.specs().iter().try_for_each(|spec| this.walk(spec))
            }),
        })
    }

    /// Run `f` with `segment` pushed onto the namespace path.
    fn scoped<R>(&mut self, segment: Option<&str>, f: impl FnOnce(&mut Self) -> R) -> R {
        let Some(segment) = segment else {
            return f(self);
        };
        self.path.push(segment.to_owned());
        let result = f(self);
        self.path.pop();
        result
    }

    fn namespace(&self) -> String {
        let mut namespace = String::new();
        for segment in self.path.iter().filter(|segment| !segment.is_empty()) {
            if !namespace.is_empty() {
                namespace.push_str(self.delimiter);
            }
            namespace.push_str(segment);
        }
        namespace
    }

    fn emit(&mut self, pattern: Pattern) {
        let namespace: Arc<str> = Arc::from(self.namespace());
        let index = self.leaves.len();
        trace!(index, namespace = %namespace, pattern = %pattern, "flattened leaf");
        self.leaves.push(NamedLeaf {
            group_count: pattern.group_count(),
            namespace,
            pattern,
            index,
        });
    }
}

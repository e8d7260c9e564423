//! Template registry.
//!
//! One registry is created per process (or per test, for isolation) and
//! shared by reference with every engine that resolves templates. Entries
//! are write-once: an identifier can never be re-registered, so readers
//! never observe an entry changing underneath them.

use parking_lot::RwLock;
use remix_pattern::Pattern;
use rustc_hash::FxHashMap;

use crate::builtins::BUILTINS;
use crate::template::resolve_template;
use crate::TemplateError;

/// What can be registered under an identifier.
#[derive(Clone, Debug)]
pub enum Definition {
    /// A concrete pattern, stored as-is.
    Pattern(Pattern),
    /// A template, expanded once at registration time.
    Template(String),
}

impl From<Pattern> for Definition {
    fn from(pattern: Pattern) -> Self {
        Definition::Pattern(pattern)
    }
}

impl From<&str> for Definition {
    fn from(template: &str) -> Self {
        Definition::Template(template.to_owned())
    }
}

impl From<String> for Definition {
    fn from(template: String) -> Self {
        Definition::Template(template)
    }
}

/// Append-only map from identifier to a resolved [`Pattern`].
#[derive(Debug, Default)]
pub struct Registry {
    entries: RwLock<FxHashMap<String, Pattern>>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Registry {
            entries: RwLock::new(FxHashMap::default()),
        }
    }

    /// Create a registry holding the builtin character-class templates
    /// (`word`, `space`, `eol`, `number`, ...).
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for &(identifier, source) in BUILTINS {
            match Pattern::new(source) {
                Ok(pattern) => {
                    registry.entries.write().insert(identifier.to_owned(), pattern);
                }
                Err(error) => {
                    tracing::warn!(identifier, %error, "skipping unbuildable builtin template");
                }
            }
        }
        registry
    }

    /// Register `definition` under `identifier`.
    ///
    /// Templates are expanded against the entries registered so far and
    /// compiled immediately. Fails with
    /// [`DuplicateIdentifier`](TemplateError::DuplicateIdentifier) if the
    /// identifier is taken; the existing entry is left intact.
    ///
    /// Returns `&self` so registrations can be chained with `?`.
    pub fn register(
        &self,
        identifier: &str,
        definition: impl Into<Definition>,
    ) -> Result<&Self, TemplateError> {
        // Cheap early exit; the authoritative check happens under the write lock.
        if self.contains(identifier) {
            return Err(duplicate(identifier));
        }

        let pattern = match definition.into() {
            Definition::Pattern(pattern) => pattern,
            Definition::Template(template) => resolve_template(self, &template)?,
        };

        let mut entries = self.entries.write();
        if entries.contains_key(identifier) {
            return Err(duplicate(identifier));
        }
        tracing::debug!(identifier, source = pattern.source(), "registered template");
        entries.insert(identifier.to_owned(), pattern);
        Ok(self)
    }

    /// Register several definitions in order, stopping at the first failure.
    ///
    /// Later definitions may refer to earlier ones.
    pub fn register_all<I, S, D>(&self, definitions: I) -> Result<&Self, TemplateError>
    where
        I: IntoIterator<Item = (S, D)>,
        S: AsRef<str>,
        D: Into<Definition>,
    {
        for (identifier, definition) in definitions {
            self.register(identifier.as_ref(), definition)?;
        }
        Ok(self)
    }

    /// Get the pattern registered under `identifier`.
    pub fn get_registered(&self, identifier: &str) -> Option<Pattern> {
        self.entries.read().get(identifier).cloned()
    }

    /// Check if `identifier` is registered.
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.read().contains_key(identifier)
    }

    /// All registered identifiers, sorted.
    pub fn identifiers(&self) -> Vec<String> {
        let mut identifiers: Vec<String> = self.entries.read().keys().cloned().collect();
        identifiers.sort_unstable();
        identifiers
    }

    /// Get the number of registered identifiers.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

fn duplicate(identifier: &str) -> TemplateError {
    TemplateError::DuplicateIdentifier {
        identifier: identifier.to_owned(),
    }
}

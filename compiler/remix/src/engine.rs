//! The `Remix` engine.
//!
//! An engine owns a list of specs, compiles them lazily into a
//! [`CompiledProgram`] and drives that program over [`Subject`]s. The
//! program is cached until a mutation (new specs, new name, new options)
//! invalidates it; the next compile, exec, test or debug rendering then
//! rebuilds it.

use std::sync::Arc;

use remix_template::Registry;
use tracing::{debug, trace};

use crate::program::CompiledProgram;
use crate::resolve::flatten;
use crate::scan::{Cursor, EngineId, Match, Position, ScanState, Subject};
use crate::{Options, RemixError, Spec};

/// A composed matcher over many patterns.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use remix::{Pattern, Registry, Remix, Spec, Subject};
///
/// let mut re = Remix::named("fb", Arc::new(Registry::new()));
/// re.add(Spec::keyed([
///     ("foo", Pattern::new("(fo)o").unwrap()),
///     ("bar", Pattern::new("ba(r)").unwrap()),
/// ]));
///
/// let mut subject = Subject::new("foobar");
/// let m = re.exec(&mut subject).unwrap().unwrap();
/// assert_eq!((m.namespace(), m.as_str(), m.last_index()), ("fb.foo", "foo", 3));
/// let m = re.exec(&mut subject).unwrap().unwrap();
/// assert_eq!((m.namespace(), m.as_str(), m.last_index()), ("fb.bar", "bar", 6));
/// assert!(re.exec(&mut subject).unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct Remix {
    id: EngineId,
    name: Option<String>,
    specs: Vec<Spec>,
    options: Options,
    registry: Arc<Registry>,
    /// `None` while dirty.
    program: Option<Arc<CompiledProgram>>,
    generation: u64,
    /// Batch that last answered `test` affirmatively.
    test_hint: usize,
}

impl Remix {
    /// An unnamed engine. Its leaves live at the root namespace, and when
    /// nested into another engine its specs are spliced in directly.
    pub fn new(registry: Arc<Registry>) -> Self {
        Remix {
            id: EngineId::next(),
            name: None,
            specs: Vec::new(),
            options: Options::default(),
            registry,
            program: None,
            generation: 0,
            test_hint: 0,
        }
    }

    /// An engine whose name is the first namespace segment of its leaves.
    pub fn named(name: impl Into<String>, registry: Arc<Registry>) -> Self {
        let mut engine = Self::new(registry);
        engine.name = Some(name.into());
        engine
    }

    /// An engine starting out with `specs`.
    pub fn with_specs<I, S>(registry: Arc<Registry>, specs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        let mut engine = Self::new(registry);
        engine.add_all(specs);
        engine
    }

    #[inline]
    pub fn id(&self) -> EngineId {
        self.id
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self.invalidate();
        self
    }

    #[inline]
    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn set_options(&mut self, options: Options) -> &mut Self {
        self.options = options;
        self.invalidate();
        self
    }

    #[inline]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[inline]
    pub fn specs(&self) -> &[Spec] {
        &self.specs
    }

    /// Append one spec. Later specs have lower priority.
    pub fn add(&mut self, spec: impl Into<Spec>) -> &mut Self {
        self.specs.push(spec.into());
        self.invalidate();
        self
    }

    pub fn add_all<I, S>(&mut self, specs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        self.specs.extend(specs.into_iter().map(Into::into));
        self.invalidate();
        self
    }

    /// Append `specs` under the namespace segment `name`.
    pub fn add_named<I, S>(&mut self, name: impl Into<String>, specs: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Spec>,
    {
        self.add(Spec::named(name, Spec::sequence(specs)))
    }

    /// Remove every spec.
    pub fn clear(&mut self) -> &mut Self {
        self.specs.clear();
        self.invalidate();
        self
    }

    #[inline]
    pub fn has_specs(&self) -> bool {
        !self.specs.is_empty()
    }

    /// Whether a compiled program is cached.
    #[inline]
    pub fn is_compiled(&self) -> bool {
        self.program.is_some()
    }

    fn invalidate(&mut self) {
        if self.program.take().is_some() {
            trace!(engine = %self.id, "compiled program invalidated");
        }
    }

    /// Return the compiled program, rebuilding it when dirty or `force`d.
    ///
    /// Lazy specs are re-generated on every rebuild.
    pub fn compile(&mut self, force: bool) -> Result<Arc<CompiledProgram>, RemixError> {
        if !force {
            if let Some(program) = &self.program {
                return Ok(Arc::clone(program));
            }
        }

        let leaves = flatten(
            &self.registry,
            &self.options.namespace_delimiter,
            self.name.as_deref(),
            &self.specs,
        )?;
        self.generation += 1;
        let program = Arc::new(CompiledProgram::build(
            leaves,
            self.options.default_flags,
            self.generation,
        )?);
        debug!(
            engine = %self.id,
            name = self.name.as_deref().unwrap_or(""),
            generation = self.generation,
            batches = program.batches().len(),
            "engine compiled"
        );
        self.test_hint = 0;
        self.program = Some(Arc::clone(&program));
        Ok(program)
    }

    /// The joined batch sources as `/source/flags`, space separated.
    pub fn to_debug_string(&mut self) -> Result<String, RemixError> {
        Ok(self.compile(false)?.to_string())
    }

    /// Match at this engine's cursor on `subject` and advance past the
    /// match.
    ///
    /// Returns `Ok(None)` once nothing matches; the subject then stays
    /// exhausted for this engine until [`reset`](Self::reset) or
    /// [`set_last_index`](Self::set_last_index).
    pub fn exec<'s>(&mut self, subject: &mut Subject<'s>) -> Result<Option<Match<'s>>, RemixError> {
        let program = self.compile(false)?;
        let generation = program.generation();

        let mut state = match subject.remove_cursor(self.id) {
            Some(Cursor::Exhausted) => {
                subject.set_cursor(self.id, Cursor::Exhausted);
                trace!(engine = %self.id, "subject already exhausted");
                return Ok(None);
            }
            Some(Cursor::Positioned(state)) if state.generation == generation => state,
            Some(Cursor::Positioned(stale)) => ScanState {
                position: Position {
                    batch_index: 0,
                    offset: stale.position.offset,
                },
                history: Vec::new(),
                generation,
            },
            None => ScanState {
                position: Position::default(),
                history: Vec::new(),
                generation,
            },
        };

        let Some((batch_index, matched)) =
            program.scan(subject.text(), state.position, self.options.sticky)
        else {
            debug!(engine = %self.id, offset = state.position.offset, "no match, subject exhausted");
            subject.set_cursor(self.id, Cursor::Exhausted);
            return Ok(None);
        };

        debug!(
            engine = %self.id,
            batch = batch_index,
            leaf = matched.index(),
            namespace = matched.namespace(),
            start = matched.start(),
            end = matched.last_index(),
            "accepted match"
        );
        state.history.push(state.position);
        state.position = Position {
            batch_index,
            offset: matched.last_index(),
        };
        subject.set_cursor(self.id, Cursor::Positioned(state));
        Ok(Some(matched))
    }

    /// Check whether any batch matches anywhere in `text`.
    ///
    /// The batch that answered last time is tried first. No cursor is
    /// read or written.
    pub fn test(&mut self, text: &str) -> Result<bool, RemixError> {
        let program = self.compile(false)?;
        let count = program.batches().len();
        let first = if self.test_hint < count { self.test_hint } else { 0 };

        for batch_index in (first..count).chain(0..first) {
            if program.batches()[batch_index].pattern().is_match(text) {
                self.test_hint = batch_index;
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Undo the most recent accepted match on `subject`, so the next
    /// [`exec`](Self::exec) re-attempts it.
    ///
    /// Each call rewinds one more match. Fails with
    /// [`InvalidState`](RemixError::InvalidState) when there is nothing
    /// left to undo.
    pub fn reject(&self, subject: &mut Subject<'_>) -> Result<(), RemixError> {
        let invalid = || RemixError::InvalidState { engine: self.id };
        let Some(Cursor::Positioned(state)) = subject.cursor_mut(self.id) else {
            return Err(invalid());
        };
        let previous = state.history.pop().ok_or_else(invalid)?;
        debug!(
            engine = %self.id,
            from = state.position.offset,
            to = previous.offset,
            "rejected match"
        );
        state.position = previous;
        Ok(())
    }

    /// Continue scanning `subject` at byte `offset`, from the first batch.
    ///
    /// Clears exhaustion and the rewind history.
    pub fn set_last_index(&self, subject: &mut Subject<'_>, offset: usize) {
        subject.set_cursor(
            self.id,
            Cursor::Positioned(ScanState {
                position: Position {
                    batch_index: 0,
                    offset,
                },
                history: Vec::new(),
                generation: self.generation,
            }),
        );
    }

    /// Forget this engine's cursor on `subject`; scanning restarts at 0.
    pub fn reset(&self, subject: &mut Subject<'_>) {
        if subject.remove_cursor(self.id).is_some() {
            trace!(engine = %self.id, "cursor reset");
        }
    }
}

impl Clone for Remix {
    /// Clones get a fresh identity, so they never share cursors with the
    /// original.
    fn clone(&self) -> Self {
        Remix {
            id: EngineId::next(),
            name: self.name.clone(),
            specs: self.specs.clone(),
            options: self.options.clone(),
            registry: Arc::clone(&self.registry),
            program: self.program.clone(),
            generation: self.generation,
            test_hint: self.test_hint,
        }
    }
}

#[cfg(test)]
mod tests;

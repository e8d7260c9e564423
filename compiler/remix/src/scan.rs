//! Subjects, cursors and match results.
//!
//! A [`Subject`] is the text being scanned together with one cursor per
//! engine that has scanned it. Cursors are keyed by [`EngineId`], so any
//! number of engines can walk the same subject without seeing each other's
//! positions, and an engine resumes where it left off as long as the caller
//! keeps passing the same `Subject`.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use rustc_hash::FxHashMap;

/// Process-unique identity of an engine.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EngineId(u64);

impl EngineId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        EngineId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine#{}", self.0)
    }
}

/// Batch to try first and byte offset to match at.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Position {
    pub batch_index: usize,
    pub offset: usize,
}

/// Resumable scan state of one engine over one subject.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScanState {
    pub(crate) position: Position,
    /// Positions preceding each accepted match, most recent last.
    pub(crate) history: Vec<Position>,
    /// Program generation the position was computed against.
    pub(crate) generation: u64,
}

impl ScanState {
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of accepted matches that can still be rejected.
    #[inline]
    pub fn depth(&self) -> usize {
        self.history.len()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Cursor {
    Positioned(ScanState),
    /// The last scan found nothing; stays failing until reset.
    Exhausted,
}

/// Text under scan plus the per-engine cursors over it.
#[derive(Clone, Debug)]
pub struct Subject<'s> {
    text: &'s str,
    cursors: FxHashMap<EngineId, Cursor>,
}

impl<'s> Subject<'s> {
    pub fn new(text: &'s str) -> Self {
        Subject {
            text,
            cursors: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// Scan state of `engine`, if it is positioned on this subject.
    pub fn scan_state(&self, engine: EngineId) -> Option<&ScanState> {
        match self.cursors.get(&engine)? {
            Cursor::Positioned(state) => Some(state),
            Cursor::Exhausted => None,
        }
    }

    /// Offset where `engine` will match next, or `None` if it hasn't
    /// scanned this subject or is exhausted.
    pub fn last_index(&self, engine: EngineId) -> Option<usize> {
        self.scan_state(engine).map(|state| state.position.offset)
    }

    /// Whether `engine` ran out of matches on this subject.
    pub fn is_exhausted(&self, engine: EngineId) -> bool {
        matches!(self.cursors.get(&engine), Some(Cursor::Exhausted))
    }

    pub(crate) fn cursor_mut(&mut self, engine: EngineId) -> Option<&mut Cursor> {
        self.cursors.get_mut(&engine)
    }

    pub(crate) fn set_cursor(&mut self, engine: EngineId, cursor: Cursor) {
        self.cursors.insert(engine, cursor);
    }

    pub(crate) fn remove_cursor(&mut self, engine: EngineId) -> Option<Cursor> {
        self.cursors.remove(&engine)
    }
}

impl<'s> From<&'s str> for Subject<'s> {
    fn from(text: &'s str) -> Self {
        Subject::new(text)
    }
}

/// One accepted match, attributed to the leaf that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match<'s> {
    /// One slice per leaf of the program, in leaf order. Slice `i` holds
    /// `group_count + 1` values: the leaf's whole match, then its captures.
    /// Slices of leaves that did not match are all `None`.
    pub(crate) groups: Vec<Vec<Option<&'s str>>>,
    pub(crate) namespace: Arc<str>,
    pub(crate) index: usize,
    pub(crate) start: usize,
    pub(crate) last_index: usize,
}

impl<'s> Match<'s> {
    #[inline]
    pub fn groups(&self) -> &[Vec<Option<&'s str>>] {
        &self.groups
    }

    /// The matched leaf's slice.
    pub fn captures(&self) -> &[Option<&'s str>] {
        self.groups.get(self.index).map(Vec::as_slice).unwrap_or_default()
    }

    /// The matched text.
    pub fn as_str(&self) -> &'s str {
        self.captures().first().copied().flatten().unwrap_or_default()
    }

    /// Namespace of the matched leaf; empty at the root.
    #[inline]
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Flattening index of the matched leaf.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    /// Offset just past the match, where the next `exec` starts.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.last_index
    }

    #[inline]
    pub fn span(&self) -> std::ops::Range<usize> {
        self.start..self.last_index
    }
}

//! Batch compilation.
//!
//! Adjacent flag-compatible leaves are joined into one alternation so a
//! whole batch costs one search. Every member is wrapped in one capturing
//! group, so a member with `n` captures owns `n + 1` consecutive groups of
//! the joined pattern:
//!
//! ```text
//! leaves:  /(foo)o/   /ba(r)/   /x/
//! joined:  /((foo)o)|(ba(r))|(x)/
//! groups:    1 2        3  4    5
//! owner:     [0 0]      [1 1]   [2]
//! ```
//!
//! Group 0 of the joined pattern is never reported.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

use remix_pattern::{Captures, Flags, Pattern};
use tracing::debug;

use crate::scan::{Match, Position};
use crate::RemixError;

/// A leaf copied out of a spec tree, tagged with its namespace.
#[derive(Clone, Debug)]
pub struct NamedLeaf {
    /// Delimiter-joined namespace path; empty at the root.
    pub namespace: Arc<str>,
    pub pattern: Pattern,
    /// Capturing groups of `pattern`, excluding group 0.
    pub group_count: usize,
    /// Position in flattening order.
    pub index: usize,
}

/// A run of adjacent compatible leaves sharing one joined pattern.
#[derive(Clone, Debug)]
pub struct Batch {
    pattern: Pattern,
    leaves: Range<usize>,
    /// Joined-pattern group index of each member's wrapping group.
    first_groups: Vec<usize>,
}

impl Batch {
    fn join(leaves: &[NamedLeaf], range: Range<usize>, defaults: Flags) -> Result<Self, RemixError> {
        let members = &leaves[range.clone()];
        let mut source = String::new();
        let mut flags = defaults;
        let mut first_groups = Vec::with_capacity(members.len());
        let mut next_group = 1;

        for (i, leaf) in members.iter().enumerate() {
            if i > 0 {
                source.push('|');
            }
            source.push('(');
            source.push_str(leaf.pattern.source());
            source.push(')');
            flags |= leaf.pattern.flags();
            first_groups.push(next_group);
            next_group += leaf.group_count + 1;
        }

        let pattern = Pattern::with_flags(&source, flags).map_err(|error| {
            RemixError::PatternConstruction {
                namespaces: members.iter().map(|leaf| leaf.namespace.to_string()).collect(),
                source: error,
            }
        })?;
        debug_assert_eq!(
            pattern.group_count() + 1,
            next_group,
            "joined pattern group count disagrees with its members"
        );

        Ok(Batch {
            pattern,
            leaves: range,
            first_groups,
        })
    }

    /// The joined pattern.
    #[inline]
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Indices of the member leaves in the program's leaf list.
    #[inline]
    pub fn leaves(&self) -> Range<usize> {
        self.leaves.clone()
    }

    /// Index of the first member whose wrapping group participated.
    fn matched_leaf(&self, captures: &Captures<'_>) -> Option<usize> {
        self.first_groups
            .iter()
            .position(|&group| captures.get(group).is_some())
            .map(|member| self.leaves.start + member)
    }
}

/// Ordered batches plus the flattened leaves they were built from.
#[derive(Debug)]
pub struct CompiledProgram {
    leaves: Vec<NamedLeaf>,
    batches: Vec<Batch>,
    generation: u64,
}

impl CompiledProgram {
    /// Partition `leaves` into batches and join each one.
    ///
    /// Two neighbours share a batch when their flags agree on every axis
    /// not in `defaults`. The joined pattern carries the union of its
    /// members' flags plus `defaults`.
    pub(crate) fn build(
        leaves: Vec<NamedLeaf>,
        defaults: Flags,
        generation: u64,
    ) -> Result<Self, RemixError> {
        let mut batches = Vec::new();
        let mut start = 0;
        for i in 1..leaves.len() {
            let previous = leaves[i - 1].pattern.flags();
            if !leaves[i].pattern.flags().compatible_with(previous, defaults) {
                batches.push(Batch::join(&leaves, start..i, defaults)?);
                start = i;
            }
        }
        if start < leaves.len() {
            batches.push(Batch::join(&leaves, start..leaves.len(), defaults)?);
        }

        debug!(
            generation,
            leaves = leaves.len(),
            batches = batches.len(),
            "compiled program"
        );
        Ok(CompiledProgram {
            leaves,
            batches,
            generation,
        })
    }

    #[inline]
    pub fn leaves(&self) -> &[NamedLeaf] {
        &self.leaves
    }

    #[inline]
    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    /// Counter of the compile that produced this program.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Find the next match from `position`.
    ///
    /// Batches are tried starting at `position.batch_index`, wrapping
    /// around once. In sticky mode the first batch matching exactly at
    /// `position.offset` wins; otherwise the earliest match at or after
    /// the offset wins, ties going to the batch tried first. Returns the
    /// winning batch index with the attributed match.
    pub(crate) fn scan<'s>(
        &self,
        text: &'s str,
        position: Position,
        sticky: bool,
    ) -> Option<(usize, Match<'s>)> {
        let count = self.batches.len();
        let first = if position.batch_index < count {
            position.batch_index
        } else {
            0
        };

        let mut best: Option<(usize, Captures<'s>)> = None;
        for batch_index in (first..count).chain(0..first) {
            let Some(captures) = self.batches[batch_index]
                .pattern
                .captures_at(text, position.offset)
            else {
                continue;
            };
            let start = captures.get(0).map_or(usize::MAX, |m| m.start());
            if sticky {
                if start == position.offset {
                    best = Some((batch_index, captures));
                    break;
                }
            } else if best
                .as_ref()
                .and_then(|(_, current)| current.get(0))
                .map_or(true, |current| start < current.start())
            {
                best = Some((batch_index, captures));
            }
        }

        let (batch_index, captures) = best?;
        let matched = self.attribute(batch_index, &captures)?;
        Some((batch_index, matched))
    }

    /// Slice the joined captures into one slice per leaf of the program.
    fn attribute<'s>(&self, batch_index: usize, captures: &Captures<'s>) -> Option<Match<'s>> {
        let batch = &self.batches[batch_index];
        let index = batch.matched_leaf(captures)?;
        let whole = captures.get(0)?;

        let groups = self
            .leaves
            .iter()
            .map(|leaf| {
                if batch.leaves.contains(&leaf.index) {
                    let first = batch.first_groups[leaf.index - batch.leaves.start];
                    (first..=first + leaf.group_count)
                        .map(|group| captures.get(group).map(|m| m.as_str()))
                        .collect()
                } else {
                    vec![None; leaf.group_count + 1]
                }
            })
            .collect();

        Some(Match {
            groups,
            namespace: Arc::clone(&self.leaves[index].namespace),
            index,
            start: whole.start(),
            last_index: whole.end(),
        })
    }
}

impl fmt::Display for CompiledProgram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, batch) in self.batches.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", batch.pattern)?;
        }
        Ok(())
    }
}

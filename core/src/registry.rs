// penstock/src/registry.rs

//! The ordered pipe registry: holds entries as submitted and normalizes them
//! (priority defaulting, stable sort) only when the list is read for
//! execution.

use crate::core::entry::PipeEntry;
use tracing::{event, Level};

/// Priority given to pipes registered without an explicit one, unless
/// overridden with `Pipeline::default_priority`.
pub const DEFAULT_PRIORITY: i32 = 10;

/// Ordered set of pipes plus per-pipe metadata.
///
/// Registration is lazy: entries are stored exactly as submitted, and the
/// default priority is applied only in [`ordered`](Self::ordered). Calls to
/// `set_default_priority` made at any point before execution therefore apply
/// uniformly to every bare entry, regardless of registration order.
pub struct PipeRegistry<T, R> {
  entries: Vec<PipeEntry<T, R>>,
  default_priority: i32,
}

impl<T, R> PipeRegistry<T, R> {
  pub(crate) fn new() -> Self {
    Self {
      entries: Vec::new(),
      default_priority: DEFAULT_PRIORITY,
    }
  }

  /// Replace the full pipe set.
  pub(crate) fn replace<I>(&mut self, pipes: I)
  where
    I: IntoIterator,
    I::Item: Into<PipeEntry<T, R>>,
  {
    self.entries = pipes.into_iter().map(Into::into).collect();
  }

  /// Append a single pipe; never touches existing entries.
  pub(crate) fn push(&mut self, entry: PipeEntry<T, R>) {
    self.entries.push(entry);
  }

  /// Append a sequence of pipes; never touches existing entries.
  pub(crate) fn extend<I>(&mut self, pipes: I)
  where
    I: IntoIterator,
    I::Item: Into<PipeEntry<T, R>>,
  {
    self.entries.extend(pipes.into_iter().map(Into::into));
  }

  pub(crate) fn set_default_priority(&mut self, priority: i32) {
    self.default_priority = priority;
  }

  pub fn entries(&self) -> &[PipeEntry<T, R>] {
    &self.entries
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// The ordered view read at execution time: every entry's priority
  /// materialized, sorted ascending. The sort is stable, so entries with
  /// equal priority keep their registration order. Lower priority runs
  /// earlier.
  pub(crate) fn ordered(&self) -> Vec<PipeEntry<T, R>>
  where
    T: Clone,
  {
    let mut ordered: Vec<PipeEntry<T, R>> = self
      .entries
      .iter()
      .map(|entry| PipeEntry {
        pipe: entry.pipe.clone(),
        priority: Some(entry.priority.unwrap_or(self.default_priority)),
        params: entry.params.clone(),
      })
      .collect();
    ordered.sort_by_key(|entry| entry.priority);
    event!(
      Level::TRACE,
      num_pipes = ordered.len(),
      "Pipe list normalized for execution."
    );
    ordered
  }
}

// penstock/src/core/entry.rs

//! One chain link: a pipe reference plus its registration metadata.

use crate::core::pipe::PipeRef;

/// A registered pipe together with its ordering priority and bound params.
///
/// `priority` stays unset (`None`) for bare references and is materialized
/// from the pipeline's default priority only when the ordered pipe list is
/// read for execution; see `PipeRegistry::ordered`.
pub struct PipeEntry<T, R> {
  pub(crate) pipe: PipeRef<T, R>,
  pub(crate) priority: Option<i32>,
  pub(crate) params: Vec<T>,
}

impl<T, R> PipeEntry<T, R> {
  pub fn new(pipe: impl Into<PipeRef<T, R>>) -> Self {
    Self {
      pipe: pipe.into(),
      priority: None,
      params: Vec::new(),
    }
  }

  /// Explicit ordering priority. Lower values run earlier.
  pub fn priority(mut self, priority: i32) -> Self {
    self.priority = Some(priority);
    self
  }

  /// Bound params handed to the pipe after the continuation, in order, on
  /// every invocation.
  pub fn params(mut self, params: impl IntoIterator<Item = T>) -> Self {
    self.params = params.into_iter().collect();
    self
  }

  pub fn pipe(&self) -> &PipeRef<T, R> {
    &self.pipe
  }

  pub fn bound_params(&self) -> &[T] {
    &self.params
  }
}

impl<T: Clone, R> Clone for PipeEntry<T, R> {
  fn clone(&self) -> Self {
    Self {
      pipe: self.pipe.clone(),
      priority: self.priority,
      params: self.params.clone(),
    }
  }
}

impl<T, R> std::fmt::Debug for PipeEntry<T, R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("PipeEntry")
      .field("pipe", &self.pipe)
      .field("priority", &self.priority)
      .field("num_params", &self.params.len())
      .finish()
  }
}

impl<T, R> From<PipeRef<T, R>> for PipeEntry<T, R> {
  fn from(pipe: PipeRef<T, R>) -> Self {
    Self::new(pipe)
  }
}

impl<T, R> From<&str> for PipeEntry<T, R> {
  fn from(alias: &str) -> Self {
    Self::new(PipeRef::from(alias))
  }
}

impl<T, R> From<String> for PipeEntry<T, R> {
  fn from(alias: String) -> Self {
    Self::new(PipeRef::from(alias))
  }
}

// penstock/src/pipeline/definition.rs

//! Contains the `Pipeline<T, R, M>` struct definition and its builder
//! methods. Chain construction and execution live in `execution.rs`.

use crate::core::entry::PipeEntry;
use crate::core::mode::{Awaited, Immediate};
use crate::registry::PipeRegistry;
use crate::resolver::PipeResolver;
use std::marker::PhantomData;
use std::sync::Arc;

/// Method invoked on resolved stages unless overridden with
/// [`Pipeline::via`].
pub const DEFAULT_METHOD: &str = "handle";

/// The pipeline builder/executor.
///
/// `T` is the payload element type: the "passable" threaded through the chain
/// is the ordered `Vec<T>` set with [`send`](Self::send). `R` is the result
/// type produced by the destination (and by any pipe that short-circuits);
/// it defaults to `Vec<T>` so `then_return` is available without naming it.
/// `M` is the execution mode, [`Awaited`] by default; see
/// [`sync`](Self::sync). Because the mode is part of the type, it cannot
/// change once execution starts.
///
/// Builder methods take and return `self` for chaining. Execution methods
/// (`then`, `then_return`, defined per mode in `execution.rs`) borrow
/// `&self`: running the pipeline again replays the same registered pipes
/// from the last `send` payload.
pub struct Pipeline<T, R = Vec<T>, M = Awaited> {
  pub(crate) registry: PipeRegistry<T, R>,
  pub(crate) method: String,
  pub(crate) passable: Vec<T>,
  pub(crate) resolver: Option<Arc<dyn PipeResolver<T, R>>>,
  _mode: PhantomData<fn() -> M>,
}

impl<T, R> Pipeline<T, R, Awaited> {
  /// Create a pipeline with no resolver. `Constructor` pipes are
  /// instantiated directly; `Alias` pipes will fail to resolve.
  pub fn new() -> Self {
    Self {
      registry: PipeRegistry::new(),
      method: DEFAULT_METHOD.to_string(),
      passable: Vec::new(),
      resolver: None,
      _mode: PhantomData,
    }
  }

  /// Create a pipeline delegating `Constructor` and `Alias` resolution to
  /// the given collaborator.
  pub fn with_resolver(resolver: impl PipeResolver<T, R> + 'static) -> Self {
    Self {
      resolver: Some(Arc::new(resolver)),
      ..Self::new()
    }
  }
}

impl<T, R> Default for Pipeline<T, R, Awaited> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T, R, M> Pipeline<T, R, M> {
  /// Set the payload values sent through the chain. The values are an
  /// immutable snapshot: each `then`/`then_return` call starts from a clone
  /// of the last payload set here.
  pub fn send(mut self, values: impl IntoIterator<Item = T>) -> Self {
    self.passable = values.into_iter().collect();
    self
  }

  /// Replace the full pipe set. Accepts anything convertible to
  /// [`PipeEntry`]: bare references ([`PipeRef`](crate::core::pipe::PipeRef),
  /// string aliases) get no materialized priority and no bound params;
  /// explicit ordering and params use `PipeEntry::new(..).priority(..)
  /// .params(..)`.
  pub fn through<I>(mut self, pipes: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<PipeEntry<T, R>>,
  {
    self.registry.replace(pipes);
    self
  }

  /// Append one pipe onto the pipeline; existing entries are untouched.
  pub fn pipe(mut self, pipe: impl Into<PipeEntry<T, R>>) -> Self {
    self.registry.push(pipe.into());
    self
  }

  /// Append a sequence of pipes onto the pipeline.
  pub fn pipe_all<I>(mut self, pipes: I) -> Self
  where
    I: IntoIterator,
    I::Item: Into<PipeEntry<T, R>>,
  {
    self.registry.extend(pipes);
    self
  }

  /// Set the method name invoked on resolved stages.
  pub fn via(mut self, method: impl Into<String>) -> Self {
    self.method = method.into();
    self
  }

  /// Set the priority given to pipes registered without one. Applied lazily
  /// when the pipe list is read for execution, so the call order relative to
  /// `through`/`pipe` does not matter.
  pub fn default_priority(mut self, priority: i32) -> Self {
    self.registry.set_default_priority(priority);
    self
  }

  /// Switch to synchronous (immediate) execution: `then`/`then_return`
  /// become plain calls and every pipe must complete without suspending.
  pub fn sync(self) -> Pipeline<T, R, Immediate> {
    self.into_mode()
  }

  /// Switch to asynchronous (awaited) execution, the default mode.
  pub fn awaited(self) -> Pipeline<T, R, Awaited> {
    self.into_mode()
  }

  fn into_mode<N>(self) -> Pipeline<T, R, N> {
    Pipeline {
      registry: self.registry,
      method: self.method,
      passable: self.passable,
      resolver: self.resolver,
      _mode: PhantomData,
    }
  }

  /// The registered entries, in registration order, priorities not yet
  /// materialized.
  pub fn entries(&self) -> &[PipeEntry<T, R>] {
    self.registry.entries()
  }

  pub fn len(&self) -> usize {
    self.registry.len()
  }

  pub fn is_empty(&self) -> bool {
    self.registry.is_empty()
  }

  /// The method name invoked on resolved stages.
  pub fn method(&self) -> &str {
    &self.method
  }

  pub fn resolver(&self) -> Option<&Arc<dyn PipeResolver<T, R>>> {
    self.resolver.as_ref()
  }
}

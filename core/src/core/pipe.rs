// penstock/src/core/pipe.rs

//! Pipe references and the callable shapes the chain is built from:
//! the boxed step future, the functional pipe signature, and the
//! continuation handed to every pipe.

use crate::core::stage::Stage;
use crate::error::PenstockResult;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Boxed future produced by every chain step.
pub type PipeFuture<R> = Pin<Box<dyn Future<Output = PenstockResult<R>> + Send>>;

/// Signature of a functional pipe: the current payload values, the
/// continuation, and the bound params declared on the pipe's entry.
///
/// A pipe advances the chain by returning `next.call(new_passable)`; it may
/// instead produce its own result without calling the continuation, which
/// short-circuits the chain at this step.
pub type PipeFn<T, R> = dyn Fn(Vec<T>, Next<T, R>, Vec<T>) -> PipeFuture<R> + Send + Sync;

/// No-argument stage factory backing [`PipeRef::Constructor`].
pub type StageCtor<T, R> = dyn Fn() -> Arc<dyn Stage<T, R>> + Send + Sync;

/// The continuation handed to each pipe. Calling it invokes the next step of
/// the chain (ultimately the destination) with the payload values to
/// propagate. Dropping it without calling terminates the chain at this pipe.
pub struct Next<T, R> {
  step: Box<dyn FnOnce(Vec<T>) -> PipeFuture<R> + Send>,
}

impl<T, R> Next<T, R> {
  pub(crate) fn new(step: Box<dyn FnOnce(Vec<T>) -> PipeFuture<R> + Send>) -> Self {
    Self { step }
  }

  /// Advance the chain with the payload values to hand to the next step.
  pub fn call(self, passable: Vec<T>) -> PipeFuture<R> {
    (self.step)(passable)
  }
}

/// A pipe reference as registered on the pipeline.
///
/// The reference kinds form a closed set; which kind a reference is decides
/// how the executor invokes it. Validation of `Constructor` and `Alias`
/// references happens lazily, at execution time; registration never fails.
pub enum PipeRef<T, R> {
  /// A bare function pipe, invoked directly with payload, continuation, and
  /// bound params.
  Function(Arc<PipeFn<T, R>>),
  /// A constructible stage: instantiated through the resolver when one is
  /// present, otherwise by calling the factory with no arguments.
  Constructor(Arc<StageCtor<T, R>>),
  /// A string alias; only a resolver can turn it into a stage.
  Alias(String),
}

impl<T, R> PipeRef<T, R> {
  /// Wrap a function pipe.
  pub fn function<F>(f: F) -> Self
  where
    F: Fn(Vec<T>, Next<T, R>, Vec<T>) -> PipeFuture<R> + Send + Sync + 'static,
  {
    PipeRef::Function(Arc::new(f))
  }

  /// Reference a stage type constructed with no arguments.
  pub fn constructor<S>() -> Self
  where
    S: Stage<T, R> + Default + 'static,
    T: 'static,
    R: 'static,
  {
    PipeRef::Constructor(Arc::new(|| Arc::new(S::default()) as Arc<dyn Stage<T, R>>))
  }

  /// Reference a stage produced by a custom factory.
  pub fn constructor_with<F>(factory: F) -> Self
  where
    F: Fn() -> Arc<dyn Stage<T, R>> + Send + Sync + 'static,
  {
    PipeRef::Constructor(Arc::new(factory))
  }

  /// Reference a stage by alias, to be resolved externally.
  pub fn alias(alias: impl Into<String>) -> Self {
    PipeRef::Alias(alias.into())
  }

  /// Diagnostic label used in error messages and traces.
  pub fn label(&self) -> String {
    match self {
      PipeRef::Function(_) => "function".to_string(),
      PipeRef::Constructor(_) => "constructor".to_string(),
      PipeRef::Alias(alias) => format!("alias '{}'", alias),
    }
  }
}

impl<T, R> Clone for PipeRef<T, R> {
  fn clone(&self) -> Self {
    match self {
      PipeRef::Function(f) => PipeRef::Function(Arc::clone(f)),
      PipeRef::Constructor(ctor) => PipeRef::Constructor(Arc::clone(ctor)),
      PipeRef::Alias(alias) => PipeRef::Alias(alias.clone()),
    }
  }
}

// Arc'd callables do not implement Debug; report the reference kind instead.
impl<T, R> std::fmt::Debug for PipeRef<T, R> {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_tuple("PipeRef").field(&self.label()).finish()
  }
}

impl<T, R> From<&str> for PipeRef<T, R> {
  fn from(alias: &str) -> Self {
    PipeRef::Alias(alias.to_string())
  }
}

impl<T, R> From<String> for PipeRef<T, R> {
  fn from(alias: String) -> Self {
    PipeRef::Alias(alias)
  }
}

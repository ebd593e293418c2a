// penstock/src/pipeline/execution.rs

//! Chain construction and the two drivers.
//!
//! Building the chain is a right-fold over the ordered pipe list: the
//! terminal step wraps the destination, and each pipe, walked last to first,
//! wraps the previously-built step. The fold is shared by both execution
//! modes; only the driver differs: `Awaited` awaits the composed future,
//! `Immediate` polls it once and treats suspension as a configuration error.

use crate::core::entry::PipeEntry;
use crate::core::mode::{Awaited, Immediate, Mode};
use crate::core::pipe::{Next, PipeFuture, PipeRef};
use crate::error::{PenstockError, PenstockResult};
use crate::pipeline::definition::Pipeline;
use crate::resolver::resolve_stage;
use std::future::Future;
use std::task::{Context, Poll, Waker};
use tracing::{event, instrument, Level};

/// One step of the composed chain. Steps consume the payload and each other,
/// so a chain is built fresh for every execution.
pub(crate) type ChainStep<T, R> = Box<dyn FnOnce(Vec<T>) -> PipeFuture<R> + Send>;

impl<T, R, M> Pipeline<T, R, M>
where
  T: Clone + Send + 'static,
  R: Send + 'static,
  M: Mode,
{
  /// Fold the ordered pipe list into a single chain step.
  ///
  /// Each wrapping step classifies its pipe reference when invoked, not
  /// when built: a `Function` is called directly; a `Constructor` or
  /// `Alias` is resolved, checked for the configured method, and its entry
  /// point invoked. Resolution failures become an immediately-ready error
  /// future, so no later pipe (nor the destination) runs.
  pub(crate) fn build_chain(&self, destination: ChainStep<T, R>) -> ChainStep<T, R> {
    let ordered = self.registry.ordered();
    event!(
      Level::DEBUG,
      num_pipes = ordered.len(),
      mode = M::NAME,
      "Building chain."
    );

    let mut next = destination;
    for entry in ordered.into_iter().rev() {
      let method = self.method.clone();
      let resolver = self.resolver.clone();
      let prev = next;
      next = Box::new(move |passable: Vec<T>| -> PipeFuture<R> {
        let continuation = Next::new(prev);
        let PipeEntry { pipe, params, .. } = entry;
        match pipe {
          PipeRef::Function(f) => {
            event!(Level::TRACE, pipe = "function", "Invoking pipe.");
            let handler = f.as_ref();
            handler(passable, continuation, params)
          }
          ref resolvable => {
            event!(Level::TRACE, pipe = %resolvable.label(), "Resolving pipe.");
            let stage = match resolve_stage(resolvable, resolver.as_ref()) {
              Ok(stage) => stage,
              Err(error) => return failed_step(error),
            };
            if !stage.exposes(&method) {
              let error = PenstockError::MissingMethod {
                method,
                stage: stage.name().to_string(),
              };
              event!(Level::ERROR, error = %error, "Stage lacks the configured method.");
              return failed_step(error);
            }
            Box::pin(async move {
              stage.invoke(&method, passable, continuation, params).await
            })
          }
        }
      });
    }
    next
  }
}

impl<T, R> Pipeline<T, R, Awaited>
where
  T: Clone + Send + 'static,
  R: Send + 'static,
{
  /// Run the pipeline with a final destination callback.
  ///
  /// Builds the chain with `destination` as the terminal step and invokes
  /// it with a clone of the stored payload. Errors from resolution, from
  /// any pipe, or from the destination surface as the `Err` arm of the
  /// awaited result.
  #[instrument(
    name = "Pipeline::then",
    skip_all,
    fields(num_pipes = self.registry.len(), mode = Awaited::NAME),
    err(Display)
  )]
  pub async fn then<D, Fut>(&self, destination: D) -> PenstockResult<R>
  where
    D: FnOnce(Vec<T>) -> Fut + Send + 'static,
    Fut: Future<Output = PenstockResult<R>> + Send + 'static,
  {
    let terminal: ChainStep<T, R> = Box::new(move |passable| Box::pin(destination(passable)));
    let chain = self.build_chain(terminal);
    chain(self.passable.clone()).await
  }
}

impl<T> Pipeline<T, Vec<T>, Awaited>
where
  T: Clone + Send + 'static,
{
  /// Run the pipeline and return the final payload values unchanged.
  pub async fn then_return(&self) -> PenstockResult<Vec<T>> {
    self.then(|passable| std::future::ready(Ok(passable))).await
  }
}

impl<T, R> Pipeline<T, R, Immediate>
where
  T: Clone + Send + 'static,
  R: Send + 'static,
{
  /// Run the pipeline with a final destination callback, synchronously.
  ///
  /// The composed chain is driven on the spot; a pipe that suspends fails
  /// the run with a configuration error instead of blocking.
  #[instrument(
    name = "Pipeline::then",
    skip_all,
    fields(num_pipes = self.registry.len(), mode = Immediate::NAME),
    err(Display)
  )]
  pub fn then<D>(&self, destination: D) -> PenstockResult<R>
  where
    D: FnOnce(Vec<T>) -> PenstockResult<R> + Send + 'static,
  {
    let terminal: ChainStep<T, R> =
      Box::new(move |passable| Box::pin(std::future::ready(destination(passable))));
    let chain = self.build_chain(terminal);
    drive_immediate(chain(self.passable.clone()))
  }
}

impl<T> Pipeline<T, Vec<T>, Immediate>
where
  T: Clone + Send + 'static,
{
  /// Run the pipeline and return the final payload values unchanged.
  pub fn then_return(&self) -> PenstockResult<Vec<T>> {
    self.then(Ok)
  }
}

/// Immediately-ready error step result.
fn failed_step<R>(error: PenstockError) -> PipeFuture<R>
where
  R: Send + 'static,
{
  Box::pin(std::future::ready(Err(error)))
}

/// Drive a composed chain future without an executor.
///
/// A chain whose pipes never suspend completes in a single poll. `Pending`
/// means some pipe performed genuinely deferred work, which a synchronous
/// chain cannot honor.
fn drive_immediate<R>(mut future: PipeFuture<R>) -> PenstockResult<R> {
  let mut cx = Context::from_waker(Waker::noop());
  match future.as_mut().poll(&mut cx) {
    Poll::Ready(outcome) => outcome,
    Poll::Pending => {
      event!(
        Level::ERROR,
        "A pipe suspended while the pipeline was executing synchronously."
      );
      Err(PenstockError::Configuration {
        message: "a pipe performed deferred work in a synchronous pipeline; \
                  use the awaited mode for asynchronous pipes"
          .to_string(),
      })
    }
  }
}

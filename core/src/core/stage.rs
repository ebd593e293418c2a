// penstock/src/core/stage.rs

//! The `Stage` trait: the invocable form of a `Constructor` or `Alias` pipe.

use crate::core::pipe::Next;
use crate::error::PenstockResult;
use async_trait::async_trait;

/// A resolved pipe instance exposing named entry points.
///
/// Stages are what `Constructor` and `Alias` references resolve to. The
/// pipeline invokes the entry point selected with `Pipeline::via` (default
/// `"handle"`), after checking `exposes`; a stage that does not expose the
/// configured method fails resolution with `MissingMethod` rather than being
/// skipped.
///
/// `exposes` is the capability check: it must return `true` exactly for the
/// method names `invoke` can run. The engine only calls `invoke` with a
/// method name for which `exposes` returned `true`.
#[async_trait]
pub trait Stage<T, R>: Send + Sync {
  /// Diagnostic name of this stage, used in error messages. Defaults to the
  /// concrete type name.
  fn name(&self) -> &'static str {
    std::any::type_name::<Self>()
  }

  /// Whether this stage exposes the named entry point.
  fn exposes(&self, method: &str) -> bool;

  /// Run the named entry point with the current payload values, the
  /// continuation, and the bound params declared on the pipe's entry.
  async fn invoke(
    &self,
    method: &str,
    passable: Vec<T>,
    next: Next<T, R>,
    params: Vec<T>,
  ) -> PenstockResult<R>;
}

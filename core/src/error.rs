// penstock/src/error.rs

use anyhow::Error as AnyhowError;
use thiserror::Error;

/// Errors surfaced by chain construction, resolution, and execution.
///
/// Every variant propagates unchanged to the caller of `then`/`then_return`;
/// the engine performs no recovery and no retries. Wrapped sources keep the
/// original error reachable through `std::error::Error::source`.
#[derive(Debug, Error)]
pub enum PenstockError {
  /// An alias pipe was registered but no resolver was supplied; there is no
  /// way to turn a bare string into a stage without a collaborator.
  #[error("Pipe alias '{alias}' cannot be resolved: no resolver was provided")]
  UnresolvedAlias { alias: String },

  /// The resolver collaborator failed for the given pipe reference.
  #[error("Resolver failed for pipe {pipe}. Source: {source}")]
  ResolutionFailure {
    pipe: String,
    #[source]
    source: AnyhowError,
  },

  /// The resolved stage does not expose the configured method name.
  #[error("No method named '{method}' exists on stage '{stage}'")]
  MissingMethod { method: String, stage: String },

  /// The pipeline was configured in a way the selected execution mode cannot
  /// honor, e.g. a pipe suspending inside a synchronous chain.
  #[error("Configuration error: {message}")]
  Configuration { message: String },

  /// Error raised by a pipe's own logic or by the destination callback.
  #[error("Error in user-provided pipe or destination. Source: {source}")]
  Handler {
    #[source]
    source: AnyhowError,
  },

  #[error("Internal pipeline error: {0}")]
  Internal(String),
}

impl From<AnyhowError> for PenstockError {
  fn from(err: AnyhowError) -> Self {
    // An anyhow::Error that already wraps a PenstockError is unwrapped rather
    // than re-wrapped, so variant matching keeps working for callers.
    match err.downcast::<PenstockError>() {
      Ok(inner) => inner,
      Err(err) => PenstockError::Handler { source: err },
    }
  }
}

pub type PenstockResult<T, E = PenstockError> = std::result::Result<T, E>;

// penstock/src/core/mode.rs

//! Execution-mode markers. The mode is part of the `Pipeline` type, so it is
//! selected once and cannot change mid-execution.

/// Step-invoker strategy of a pipeline. Implemented only by [`Awaited`] and
/// [`Immediate`].
pub trait Mode: sealed::Sealed + Send + Sync + 'static {
  /// Mode label used in diagnostics.
  const NAME: &'static str;
}

/// Asynchronous execution: `then`/`then_return` are async and every step's
/// future is awaited before its caller resumes. This is the default mode.
pub struct Awaited;

/// Synchronous execution: `then`/`then_return` are plain calls and the
/// composed chain must complete without suspending. A pipe that performs
/// deferred work in this mode fails with a configuration error.
pub struct Immediate;

impl Mode for Awaited {
  const NAME: &'static str = "awaited";
}

impl Mode for Immediate {
  const NAME: &'static str = "immediate";
}

mod sealed {
  pub trait Sealed {}
  impl Sealed for super::Awaited {}
  impl Sealed for super::Immediate {}
}

// penstock/src/lib.rs

//! Penstock: a pipeline / chain-of-responsibility executor.
//!
//! Given an ordered collection of processing units ("pipes") and an initial
//! payload, a [`Pipeline`] folds the pipes into a single callable chain that
//! threads the payload through every pipe in order and finally delivers it
//! to a terminal destination callback. Features:
//!  - Pipes as plain functions, constructible stages, or string aliases
//!    resolved through an external collaborator.
//!  - Deterministic ordering: ascending priority, registration order for
//!    ties, with priorities applied lazily at execution time.
//!  - Bound params delivered to a pipe after its continuation.
//!  - Each pipe decides whether to advance the chain; not calling the
//!    continuation short-circuits it.
//!  - One chain builder, two drivers: asynchronous (awaited) and
//!    synchronous (immediate) execution with the same semantics.
//!
//! ```
//! use penstock::{PipeRef, Pipeline};
//!
//! let doubled = Pipeline::<i32>::new()
//!   .send([1, 2, 3])
//!   .pipe(PipeRef::function(|values: Vec<i32>, next, _params| {
//!     next.call(values.into_iter().map(|v| v * 2).collect())
//!   }))
//!   .sync()
//!   .then_return()
//!   .unwrap();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

pub mod core;
pub mod error;
pub mod pipeline;
pub mod registry;
pub mod resolver;

// --- Re-exports for the Public API ---

pub use crate::core::entry::PipeEntry;
pub use crate::core::mode::{Awaited, Immediate, Mode};
pub use crate::core::pipe::{Next, PipeFn, PipeFuture, PipeRef, StageCtor};
pub use crate::core::stage::Stage;

pub use crate::pipeline::definition::{Pipeline, DEFAULT_METHOD};

pub use crate::registry::{PipeRegistry, DEFAULT_PRIORITY};
pub use crate::resolver::{FnResolver, PipeResolver};

pub use crate::error::{PenstockError, PenstockResult};

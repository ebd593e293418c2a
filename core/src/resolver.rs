// penstock/src/resolver.rs

//! Resolver adapter: turns `Constructor` and `Alias` pipe references into
//! invocable stages, optionally delegating to an external collaborator.

use crate::core::pipe::PipeRef;
use crate::core::stage::Stage;
use crate::error::{PenstockError, PenstockResult};
use std::sync::Arc;
use tracing::{event, Level};

/// External collaborator mapping a pipe reference to a stage instance.
///
/// A resolver typically fronts a dependency-injection container. It receives
/// the reference unchanged (only `Constructor` and `Alias` references are
/// ever passed in, function pipes never go through resolution) and must
/// return an error when it cannot resolve; the `Result` return makes a
/// silent placeholder value unrepresentable.
pub trait PipeResolver<T, R>: Send + Sync {
  fn resolve(&self, pipe: &PipeRef<T, R>) -> anyhow::Result<Arc<dyn Stage<T, R>>>;
}

/// Adapts a plain closure into a [`PipeResolver`].
pub struct FnResolver<F>(F);

impl<F> FnResolver<F> {
  pub fn new(resolve: F) -> Self {
    Self(resolve)
  }
}

impl<T, R, F> PipeResolver<T, R> for FnResolver<F>
where
  F: Fn(&PipeRef<T, R>) -> anyhow::Result<Arc<dyn Stage<T, R>>> + Send + Sync,
{
  fn resolve(&self, pipe: &PipeRef<T, R>) -> anyhow::Result<Arc<dyn Stage<T, R>>> {
    (self.0)(pipe)
  }
}

/// Resolve a `Constructor` or `Alias` reference to a stage.
///
/// With a resolver present, resolution is delegated wholesale. Without one,
/// a `Constructor` is instantiated by calling its factory with no arguments,
/// and an `Alias` fails: nothing can turn a bare string into a stage.
pub(crate) fn resolve_stage<T, R>(
  pipe: &PipeRef<T, R>,
  resolver: Option<&Arc<dyn PipeResolver<T, R>>>,
) -> PenstockResult<Arc<dyn Stage<T, R>>> {
  match pipe {
    PipeRef::Function(_) => Err(PenstockError::Internal(
      "function pipes are invoked directly and never resolved".to_string(),
    )),
    PipeRef::Constructor(ctor) => match resolver {
      Some(resolver) => delegate(pipe, resolver),
      None => {
        let make = ctor.as_ref();
        Ok(make())
      }
    },
    PipeRef::Alias(alias) => match resolver {
      Some(resolver) => delegate(pipe, resolver),
      None => {
        event!(Level::ERROR, alias = %alias, "No resolver available for alias pipe.");
        Err(PenstockError::UnresolvedAlias {
          alias: alias.clone(),
        })
      }
    },
  }
}

fn delegate<T, R>(
  pipe: &PipeRef<T, R>,
  resolver: &Arc<dyn PipeResolver<T, R>>,
) -> PenstockResult<Arc<dyn Stage<T, R>>> {
  resolver.resolve(pipe).map_err(|source| {
    event!(Level::ERROR, pipe = %pipe.label(), error = %source, "Resolver failed.");
    PenstockError::ResolutionFailure {
      pipe: pipe.label(),
      source,
    }
  })
}

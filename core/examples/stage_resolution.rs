// penstock/examples/stage_resolution.rs

use async_trait::async_trait;
use penstock::{FnResolver, Next, PenstockError, PenstockResult, PipeRef, Pipeline, Stage};
use std::sync::Arc;
use tracing::info;

// Stages are the instance-backed pipe kind: a constructible type exposing
// named entry points. This example registers one stage by constructor and a
// second by alias, with a resolver standing in for a service container.

#[derive(Default)]
struct AuthStage;

#[async_trait]
impl Stage<String, Vec<String>> for AuthStage {
  fn exposes(&self, method: &str) -> bool {
    method == "handle"
  }

  async fn invoke(
    &self,
    _method: &str,
    passable: Vec<String>,
    next: Next<String, Vec<String>>,
    _params: Vec<String>,
  ) -> PenstockResult<Vec<String>> {
    let mut passable = passable;
    passable[0].push_str(" +authorized");
    next.call(passable).await
  }
}

#[derive(Default)]
struct HostStage;

#[async_trait]
impl Stage<String, Vec<String>> for HostStage {
  fn exposes(&self, method: &str) -> bool {
    method == "handle"
  }

  async fn invoke(
    &self,
    _method: &str,
    passable: Vec<String>,
    next: Next<String, Vec<String>>,
    _params: Vec<String>,
  ) -> PenstockResult<Vec<String>> {
    let mut passable = passable;
    passable[0].push_str(" +host=www.example.com");
    next.call(passable).await
  }
}

#[tokio::main]
async fn main() -> Result<(), PenstockError> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  info!("--- Stage Resolution Example ---");

  let resolver = FnResolver::new(|pipe: &PipeRef<String, Vec<String>>| match pipe {
    PipeRef::Alias(alias) if alias == "host" => {
      Ok(Arc::new(HostStage) as Arc<dyn Stage<String, Vec<String>>>)
    }
    PipeRef::Constructor(ctor) => Ok((ctor.as_ref())()),
    other => Err(anyhow::anyhow!("no binding for pipe {}", other.label())),
  });

  let pipeline = Pipeline::with_resolver(resolver)
    .send(["GET /".to_string()])
    .pipe(PipeRef::constructor::<AuthStage>())
    .pipe("host");

  let result = pipeline.then_return().await?;
  info!("request after middleware: {}", result[0]);

  Ok(())
}

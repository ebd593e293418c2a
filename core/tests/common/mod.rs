// tests/common/mod.rs
#![allow(dead_code)] // Allow unused helpers in this common test module

use async_trait::async_trait;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use penstock::{Next, PenstockResult, PipeRef, PipeResolver, Stage};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tracing::Level;

// --- Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok();
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Shared order-recording probe ---
pub type Probe = Arc<Mutex<Vec<String>>>;

pub fn probe() -> Probe {
  Arc::new(Mutex::new(Vec::new()))
}

// --- Function pipe helpers ---

/// Appends `label` to the probe, then continues with the payload unchanged.
pub fn recording_pipe(label: &'static str, probe: Probe) -> PipeRef<i32, Vec<i32>> {
  PipeRef::function(move |values, next, _params| {
    probe.lock().push(label.to_string());
    next.call(values)
  })
}

/// Adds `amount` to every payload value, then continues.
///
/// Generic over the destination result type `R` so the same helper works
/// both in pipelines that return the payload (`R = Vec<i32>`) and in ones
/// whose destination maps to a different type (e.g. `Pipeline::<i32, i32>`);
/// the pipe never produces `R` itself, it only threads through `next`.
pub fn add_pipe<R>(amount: i32) -> PipeRef<i32, R> {
  PipeRef::function(move |values: Vec<i32>, next, _params| {
    next.call(values.into_iter().map(|v| v + amount).collect())
  })
}

/// Suspends once before adding, for awaited-mode coverage.
pub fn deferred_add_pipe(amount: i32) -> PipeRef<i32, Vec<i32>> {
  PipeRef::function(move |values: Vec<i32>, next, _params| {
    Box::pin(async move {
      yield_once().await;
      next
        .call(values.into_iter().map(|v| v + amount).collect())
        .await
    })
  })
}

/// Never calls its continuation: the chain ends here with `result`.
pub fn halt_pipe(result: Vec<i32>) -> PipeRef<i32, Vec<i32>> {
  PipeRef::function(move |_values, _next, _params| {
    let result = result.clone();
    Box::pin(std::future::ready(Ok(result)))
  })
}

/// Adds its first bound param to every payload value, then continues.
pub fn param_add_pipe() -> PipeRef<i32, Vec<i32>> {
  PipeRef::function(|values: Vec<i32>, next, params: Vec<i32>| {
    let bump = params.first().copied().unwrap_or(0);
    next.call(values.into_iter().map(|v| v + bump).collect())
  })
}

// --- A future that suspends exactly once before completing ---

pub struct YieldOnce(bool);

impl Future for YieldOnce {
  type Output = ();

  fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
    if self.0 {
      Poll::Ready(())
    } else {
      self.0 = true;
      cx.waker().wake_by_ref();
      Poll::Pending
    }
  }
}

pub fn yield_once() -> YieldOnce {
  YieldOnce(false)
}

// --- Stages ---

/// Doubles every value via the default `handle` entry point.
#[derive(Default)]
pub struct DoubleStage;

#[async_trait]
impl Stage<i32, Vec<i32>> for DoubleStage {
  fn exposes(&self, method: &str) -> bool {
    method == "handle"
  }

  async fn invoke(
    &self,
    _method: &str,
    passable: Vec<i32>,
    next: Next<i32, Vec<i32>>,
    _params: Vec<i32>,
  ) -> PenstockResult<Vec<i32>> {
    next
      .call(passable.into_iter().map(|v| v * 2).collect())
      .await
  }
}

/// Triples every value, but only through a `transform` entry point.
#[derive(Default)]
pub struct TransformOnlyStage;

#[async_trait]
impl Stage<i32, Vec<i32>> for TransformOnlyStage {
  fn exposes(&self, method: &str) -> bool {
    method == "transform"
  }

  async fn invoke(
    &self,
    _method: &str,
    passable: Vec<i32>,
    next: Next<i32, Vec<i32>>,
    _params: Vec<i32>,
  ) -> PenstockResult<Vec<i32>> {
    next
      .call(passable.into_iter().map(|v| v * 3).collect())
      .await
  }
}

// --- Resolver recording every reference it is handed ---

pub struct RecordingResolver {
  pub seen: Probe,
}

impl PipeResolver<i32, Vec<i32>> for RecordingResolver {
  fn resolve(&self, pipe: &PipeRef<i32, Vec<i32>>) -> anyhow::Result<Arc<dyn Stage<i32, Vec<i32>>>> {
    self.seen.lock().push(pipe.label());
    match pipe {
      PipeRef::Constructor(ctor) => Ok((ctor.as_ref())()),
      PipeRef::Alias(alias) if alias == "double" => Ok(Arc::new(DoubleStage)),
      other => Err(anyhow::anyhow!("unknown pipe {}", other.label())),
    }
  }
}

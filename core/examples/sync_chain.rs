// penstock/examples/sync_chain.rs

use penstock::{PenstockError, PipeEntry, PipeRef, Pipeline};
use tracing::info;

// Synchronous execution needs no async runtime: the pipeline type carries the
// mode, and `then`/`then_return` are plain calls. This example also shows
// priority ordering: pipes run by ascending priority, not registration
// order.

fn append(label: &'static str) -> PipeRef<String, Vec<String>> {
  PipeRef::function(move |values: Vec<String>, next, _params| {
    next.call(
      values
        .into_iter()
        .map(|v| format!("{}{}", v, label))
        .collect(),
    )
  })
}

fn main() -> Result<(), PenstockError> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  info!("--- Sync Chain Example ---");

  let pipeline = Pipeline::<String>::new()
    .send(["start".to_string()])
    .pipe(PipeEntry::new(append(" -> last")).priority(30))
    .pipe(PipeEntry::new(append(" -> first")).priority(10))
    .pipe(append(" -> default")) // takes the default priority (10), after "first"
    .sync();

  let result = pipeline.then_return()?;
  info!("result: {}", result[0]);
  assert_eq!(result[0], "start -> first -> default -> last");

  Ok(())
}

// penstock/examples/short_circuit.rs

use penstock::{PenstockError, PipeRef, Pipeline};
use tracing::info;

// A pipe decides whether the chain advances by calling (or not calling) its
// continuation. The guard below rejects payloads containing negatives: the
// later pipes and the destination never run for them.

fn guard() -> PipeRef<i64, Vec<i64>> {
  PipeRef::function(|values: Vec<i64>, next, _params| {
    if values.iter().any(|v| *v < 0) {
      // The chain ends here; this pipe's own result becomes the outcome.
      Box::pin(std::future::ready(Ok(Vec::new())))
    } else {
      next.call(values)
    }
  })
}

fn double() -> PipeRef<i64, Vec<i64>> {
  PipeRef::function(|values: Vec<i64>, next, _params| {
    next.call(values.into_iter().map(|v| v * 2).collect())
  })
}

fn main() -> Result<(), PenstockError> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  info!("--- Short Circuit Example ---");

  let accepted = Pipeline::<i64>::new()
    .send([1, 2, 3])
    .through([guard(), double()])
    .sync()
    .then_return()?;
  info!("accepted payload: {:?}", accepted);
  assert_eq!(accepted, vec![2, 4, 6]);

  let rejected = Pipeline::<i64>::new()
    .send([1, -2, 3])
    .through([guard(), double()])
    .sync()
    .then_return()?;
  info!("rejected payload: {:?}", rejected);
  assert!(rejected.is_empty());

  Ok(())
}

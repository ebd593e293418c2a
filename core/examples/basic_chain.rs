// penstock/examples/basic_chain.rs

use penstock::{PenstockError, PipeRef, Pipeline};
use tracing::info;

// A request/response pair threaded through a chain of tagging middleware.
// Each pipe transforms both payload values and passes them onward; the
// destination picks the response out of the final payload.

#[tokio::main]
async fn main() -> Result<(), PenstockError> {
  tracing_subscriber::fmt()
    .with_max_level(tracing::Level::INFO)
    .init();

  info!("--- Basic Chain Example ---");

  let tag = |step: &'static str, mark: &'static str| {
    PipeRef::function(move |values: Vec<String>, next, _params| {
      let request = format!("{} - {}", values[0], step);
      let response = format!("{} - {}", values[1], mark);
      next.call(vec![request, response])
    })
  };

  let pipeline = Pipeline::<String, String>::new()
    .send(["Request".to_string(), "Response".to_string()])
    .through([tag("1", "A"), tag("2", "B"), tag("3", "C")])
    .pipe(PipeRef::function(|values: Vec<String>, next, _params| {
      Box::pin(async move {
        // Deferred work is awaited transparently in the default mode.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        next.call(values).await
      })
    }));

  let response = pipeline
    .then(|values| std::future::ready(Ok(values[1].clone())))
    .await?;

  info!("final response: {}", response);
  assert_eq!(response, "Response - A - B - C");

  Ok(())
}

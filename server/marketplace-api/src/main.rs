//! Binary entrypoint for the marketplace API.

use marketplace_api::{init_tracing, serve, Config};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  let config = Config::from_env()?;
  init_tracing(&config);
  config.log_defaults();
  serve(config).await
}

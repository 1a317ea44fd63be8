//! Binary entrypoint: read one ImpactRequest from stdin, write one ActionResult to stdout.
//!
//! Logs go to stderr so stdout stays a single JSON object.

use impact_engine::{get_impact, ActionResult, ImpactError, ImpactRequest, SERVER_ERROR_MESSAGE};
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("impact_engine=info")),
    )
    .with_writer(io::stderr)
    .with_target(false)
    .compact()
    .init();

  let (out, ok) = match run_binary() {
    Ok(out) => (out, true),
    Err(e) => {
      tracing::error!(error = %e, "impact-engine failed");
      (ActionResult::failed(SERVER_ERROR_MESSAGE), false)
    }
  };

  if let Err(e) = write_result(&out) {
    let _ = writeln!(io::stderr(), "impact-engine error: {}", e);
    std::process::exit(1);
  }
  if !ok {
    std::process::exit(1);
  }
}

fn run_binary() -> Result<ActionResult, ImpactError> {
  let mut raw = String::new();
  io::stdin().lock().read_to_string(&mut raw)?;
  let input: ImpactRequest = serde_json::from_str(&raw)?;
  Ok(get_impact(&input))
}

fn write_result(out: &ActionResult) -> Result<(), Box<dyn std::error::Error>> {
  let json = serde_json::to_vec(out)?;
  io::stdout().write_all(&json)?;
  Ok(())
}

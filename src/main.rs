use ucd_compiler::config::Settings;
use ucd_compiler::error::Result;
use ucd_compiler::{emitter, logging, pipeline};

fn run() -> Result<()> {
  let settings = Settings::new(None)?;
  let compiled = pipeline::compile(&settings)?;
  for warning in compiled.warnings.iter() {
    tracing::debug!(%warning, "compiled with warning");
  }
  emitter::emit(&compiled, &settings)?;
  return Ok(());
}

fn main() {
  logging::setup_logging();
  if let Err(e) = run() {
    tracing::error!("{}", e);
    std::process::exit(1);
  }
}

use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::Registry;

/// Log to stderr, filtered by `RUST_LOG` (warnings and errors when unset)
pub fn init_tracer() {
  let filter = EnvFilter::builder()
    .with_default_directive(tracing::level_filters::LevelFilter::WARN.into())
    .from_env_lossy();

  let layer = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_target(false)
    .with_filter(filter);

  let subscriber = Registry::default().with(layer);
  if tracing::subscriber::set_global_default(subscriber).is_err() {
    eprintln!("A global tracing subscriber is already set");
  }
}

use std::env;
use tracing_subscriber::EnvFilter;

/// Used when `RUST_LOG` is unset or unparsable. sqlx logs every statement at
/// `info`, so it is held to warnings.
const DEFAULT_DIRECTIVES: &str = "info,sqlx=warn";

fn filter_from(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_DIRECTIVES))
}

/// Installs the global fmt subscriber. Call once, before anything logs.
pub fn init_logging() {
    let directives = env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::fmt()
        .with_env_filter(filter_from(directives.as_deref()))
        .with_target(false)
        .init();
}

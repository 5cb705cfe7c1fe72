use std::env;

use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let filter = match env::var("RUST_LOG") {
        Ok(directives) => EnvFilter::new(directives),
        Err(_) => {
            let level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
            EnvFilter::new(level.to_lowercase())
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

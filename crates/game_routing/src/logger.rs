// This module setup the logger level.

use tracing_subscriber::EnvFilter;

/// An existing `RUST_LOG` wins over the configured level.
pub fn setup(logger_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "game_app={logger_level},game_routing={logger_level},game_infrastructure={logger_level},tower_http={logger_level}"
        ))
    });

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

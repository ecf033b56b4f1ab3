use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static INIT: Once = Once::new();

/// Install the stderr subscriber. Filter comes from `FOOTBALL_STATS_LOG`
/// (e.g. `football_stats=debug`), defaulting to `football_stats=info`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env("FOOTBALL_STATS_LOG")
            .unwrap_or_else(|_| EnvFilter::new("football_stats=info"));

        tracing_subscriber::registry()
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .with(filter)
            .init();
    });
}

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Server notices such as "relation already exists, skipping" are only shown from warn up.
const QUIET_NOTICES: &str = "sqlx::postgres::notice=warn";

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
///
/// Output goes to stderr so stdout only carries command results.
pub fn init(level: &str) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(level)));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}

fn default_directives(level: &str) -> String {
    format!("{level},{QUIET_NOTICES}")
}

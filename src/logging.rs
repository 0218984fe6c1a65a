use tracing_subscriber::{EnvFilter, fmt, prelude::*};

pub const LOG_FILTER_ENV: &str = "HR_PORTAL_LOG";
pub const LOG_FORMAT_ENV: &str = "HR_PORTAL_LOG_FORMAT";

/// Install the global subscriber for the binaries. Filter comes from
/// `HR_PORTAL_LOG`; `HR_PORTAL_LOG_FORMAT=json` switches to JSON lines.
/// Output goes to stderr so CLI stdout stays clean.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new("hr_portal=info,warn"));

    let format = std::env::var(LOG_FORMAT_ENV).unwrap_or_else(|_| "compact".to_string());
    let registry = tracing_subscriber::registry().with(filter);

    let result = match format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_ansi(false).with_writer(std::io::stderr))
            .try_init(),
        _ => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .try_init(),
    };
    if let Err(err) = result {
        eprintln!("tracing already initialized: {err}");
    }
}

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber for binaries.
///
/// `RUST_LOG` wins when set; otherwise `default_filter` applies. `json`
/// switches to one JSON object per line.
pub fn init_tracing(default_filter: &str, json: bool) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false)
        .with_writer(std::io::stderr);

    let registry = tracing_subscriber::registry().with(env_filter);
    let result = if json {
        registry.with(fmt_layer.json()).try_init()
    } else {
        registry.with(fmt_layer).try_init()
    };
    // A subscriber may already be installed (tests, embedding); keep it.
    result.ok();
}

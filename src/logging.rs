use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "IDEA_FORGE_LOG";

/// First parseable directive out of `IDEA_FORGE_LOG`, `RUST_LOG`, then `default`.
fn resolve_directives<F>(lookup: F, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    [LOG_ENV, "RUST_LOG"]
        .into_iter()
        .filter_map(|key| lookup(key))
        .find(|value| !value.trim().is_empty() && EnvFilter::try_new(value).is_ok())
        .unwrap_or_else(|| default.to_string())
}

fn env_filter(default: &str) -> EnvFilter {
    let directives = resolve_directives(|key| std::env::var(key).ok(), default);
    EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn init_tracing(component: &str) {
    let filter = env_filter(&format!("info,idea_forge=debug,{component}=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::CLOSE)
        .compact()
        .try_init();
}

/// Stdout belongs to the interactive UI, so the frontend logs to stderr and
/// stays at warn unless asked otherwise.
pub fn init_console_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter("warn"))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}

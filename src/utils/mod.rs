use tracing_subscriber::{filter::Directive, fmt, EnvFilter};

const DEFAULT_DIRECTIVE: &str = "cadence=info";

/// Installs the global fmt subscriber using [`build_filter`].
pub fn init_tracing(extra: Option<&str>) {
    // A host application may already own the global subscriber.
    let _ = fmt().with_env_filter(build_filter(extra)).try_init();
}

/// `RUST_LOG` is honoured first; the default directive and any comma-separated
/// `extra` directives are layered on top. Malformed directives are ignored.
pub fn build_filter(extra: Option<&str>) -> EnvFilter {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = DEFAULT_DIRECTIVE.parse::<Directive>() {
        filter = filter.add_directive(directive);
    }
    for raw in extra.unwrap_or_default().split(',') {
        let raw = raw.trim();
        if raw.is_empty() {
            continue;
        }
        if let Ok(directive) = raw.parse::<Directive>() {
            filter = filter.add_directive(directive);
        }
    }
    filter
}

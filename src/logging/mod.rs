use tracing_subscriber::EnvFilter;

/// Diagnostics go to stderr so they never interleave with unlock output on stdout.
pub fn init() {
    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = "truenas_unlock=info".parse() {
        filter = filter.add_directive(directive);
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

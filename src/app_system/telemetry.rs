use tracing_subscriber::EnvFilter;

/// Configure tracing once at startup for the whole process.
///
/// Verbosity comes from `RUST_LOG` (default `info`). Output goes to stderr so
/// it stays out of the console's renderings on stdout.
///
/// ```bash
/// RUST_LOG=debug user-directory
/// RUST_LOG=user_directory::api=debug,info user-directory
/// ```
pub fn setup_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// Targets that log at the configured level. Everything else (`web3`, `reqwest`, `hyper`) only
/// gets through at `WARN` or above.
const OWN_TARGETS: [&str; 3] = ["safe_msg_signer", "msg_hash", "propose_sign_msg"];

/// Installs the global subscriber. `RUST_LOG`, when set, replaces the `log_level` filter
/// entirely. Output goes to stderr so that stdout only carries the command's result lines.
pub fn init_logging(log_level: LevelFilter) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(filter_directives(log_level))
    });

    let stderr = fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr)
        .init();
}

fn filter_directives(log_level: LevelFilter) -> String {
    OWN_TARGETS
        .iter()
        .map(|target| format!("{target}={log_level}"))
        .collect::<Vec<_>>()
        .join(",")
}

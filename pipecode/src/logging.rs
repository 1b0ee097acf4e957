use tracing_subscriber::EnvFilter;

/// Workspace crate targets that receive log output.
const CRATE_TARGETS: &[&str] = &["pipecode", "pc_core", "pc_time", "pc_rules"];

/// Map a verbosity count to a level name.
///
/// - 0 -> warn (auto-corrections only)
/// - 1 -> info
/// - 2 -> debug (normalization and parsing)
/// - 3+ -> trace (match enumeration)
pub fn level_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Default filter directive for `verbosity`, one entry per crate target.
pub fn default_directive(verbosity: u8) -> String {
    let level = level_for(verbosity);
    CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Install a global fmt subscriber.
///
/// `RUST_LOG` overrides the verbosity if set. Returns `false` when a global
/// subscriber is already installed; the existing one is left in place.
pub fn init(verbosity: u8) -> bool {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .try_init()
        .is_ok();
    if installed {
        tracing::debug!(level = level_for(verbosity), "logging initialized");
    }
    installed
}

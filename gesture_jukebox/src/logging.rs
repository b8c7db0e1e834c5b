//! Tracing setup for the binary.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const OWN_CRATES: [&str; 3] = ["gesture_jukebox", "hand_gesture", "jukebox_library"];

/// Filter used when `RUST_LOG` is unset: `level` for this workspace's
/// crates, `warn` for everything else.
pub fn default_filter(level: &str) -> String {
    let mut directives: Vec<String> = OWN_CRATES.iter().map(|c| format!("{c}={level}")).collect();
    directives.push("warn".to_string());
    directives.join(",")
}

/// Initialize logging to stderr.  `RUST_LOG` takes precedence over `level`.
pub fn init_logging(level: &str) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter(level)))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
        .try_init()?;

    tracing::debug!(level, "Logging initialized");
    Ok(())
}

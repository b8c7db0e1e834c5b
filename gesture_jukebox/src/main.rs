//! gesture_jukebox: interactive entry point.

use anyhow::Context;
use clap::Parser;
use gesture_jukebox::{app, config, logging};

fn main() -> anyhow::Result<()> {
    let args = config::Args::parse();

    let file_config = config::find_config_file(args.config.as_deref())
        .and_then(|path| match config::load_config(&path) {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("warning: ignoring {}: {e}", path.display());
                None
            }
        });
    let cfg = config::AppConfig::resolve(file_config, &args).context("invalid configuration")?;

    logging::init_logging(&cfg.log_level)?;

    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║           Gesture Jukebox — Hand-Controlled Player           ║");
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();

    #[cfg(feature = "leap")]
    println!("  Mode: LeapMotion hardware");
    #[cfg(not(feature = "leap"))]
    println!("  Mode: Keyboard simulation  (use --features leap for hardware)");
    println!("  Music: {}  ({} files)", cfg.music_dir.display(), cfg.extension);
    println!();
    println!("  Opening window…");
    println!();

    if let Err(e) = app::run(cfg) {
        tracing::error!(error = %e, "Jukebox stopped");
        return Err(e.into());
    }
    Ok(())
}

//! Application configuration: built-in defaults, overridden by an optional
//! TOML file, overridden by command-line flags.

use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use hand_gesture::DebounceMode;
use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "gesture_jukebox.toml";

// ════════════════════════════════════════════════════════════════════════════
// Command line
// ════════════════════════════════════════════════════════════════════════════

#[derive(Parser, Debug, Default)]
#[command(
    name = "gesture_jukebox",
    about = "Control a local music playlist with hand gestures",
    version,
)]
pub struct Args {
    /// Path to TOML config file (default: ./gesture_jukebox.toml if present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the audio files [default: music]
    #[arg(short, long, value_name = "DIR")]
    pub music_dir: Option<PathBuf>,

    /// Audio file extension to pick up [default: mp3]
    #[arg(long)]
    pub extension: Option<String>,

    /// Cover shown when a track has none of its own [default: covers/no-cover.jpg]
    #[arg(long, value_name = "FILE")]
    pub default_cover: Option<PathBuf>,

    /// Frames per second of the control loop [default: 30]
    #[arg(long)]
    pub fps: Option<u32>,

    /// Seconds before the same gesture may fire again [default: 1.0]
    #[arg(long, value_name = "SECS")]
    pub cooldown: Option<f64>,

    /// Debounce policy: split or combined [default: split]
    #[arg(long)]
    pub debounce: Option<DebounceMode>,

    /// Tracks per page in the on-screen list [default: 5]
    #[arg(long)]
    pub page_size: Option<usize>,

    /// Initial volume, 0.0–1.0 [default: 0.5]
    #[arg(long)]
    pub volume: Option<f32>,

    /// Window and camera width in pixels [default: 1280]
    #[arg(long)]
    pub width: Option<usize>,

    /// Window and camera height in pixels [default: 720]
    #[arg(long)]
    pub height: Option<usize>,

    /// Camera device index [default: 0]
    #[arg(long)]
    pub camera: Option<u32>,

    /// Do not draw the detected hand skeleton
    #[arg(long)]
    pub no_annotate: bool,

    /// Use silent output even when a sound device exists
    #[arg(long)]
    pub mute: bool,

    /// Log filter when RUST_LOG is unset [default: info]
    #[arg(long)]
    pub log_level: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// TOML file
// ════════════════════════════════════════════════════════════════════════════

#[derive(Deserialize, Default, Debug)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub music_dir:     Option<PathBuf>,
    pub extension:     Option<String>,
    pub default_cover: Option<PathBuf>,
    pub fps:           Option<u32>,
    pub cooldown:      Option<f64>,
    pub debounce:      Option<String>,
    pub page_size:     Option<usize>,
    pub volume:        Option<f32>,
    pub camera:        Option<u32>,
    pub window_width:  Option<usize>,
    pub window_height: Option<usize>,
    pub annotate:      Option<bool>,
    pub log_level:     Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid setting: {0}")]
    Invalid(String),
}

pub fn find_config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_owned());
    }
    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    cwd_config.exists().then_some(cwd_config)
}

pub fn load_config(path: &Path) -> Result<FileConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

// ════════════════════════════════════════════════════════════════════════════
// AppConfig
// ════════════════════════════════════════════════════════════════════════════

/// Configuration for the full application.
#[derive(Clone, Debug, PartialEq)]
pub struct AppConfig {
    pub music_dir:        PathBuf,
    pub extension:        String,
    pub default_cover:    PathBuf,
    pub fps:              u32,
    pub gesture_cooldown: Duration,
    pub debounce:         DebounceMode,
    pub page_size:        usize,
    pub volume:           f32,
    pub camera_index:     u32,
    pub window_width:     usize,
    pub window_height:    usize,
    /// Draw the detected hand skeleton onto the camera image.
    pub annotate:         bool,
    pub mute:             bool,
    pub log_level:        String,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            music_dir:        PathBuf::from("music"),
            extension:        "mp3".to_string(),
            default_cover:    PathBuf::from("covers/no-cover.jpg"),
            fps:              30,
            gesture_cooldown: Duration::from_secs(1),
            debounce:         DebounceMode::Split,
            page_size:        5,
            volume:           0.5,
            camera_index:     0,
            window_width:     1280,
            window_height:    720,
            annotate:         true,
            mute:             false,
            log_level:        "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Layer `args` over `file` over the defaults, then validate.
    pub fn resolve(file: Option<FileConfig>, args: &Args) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let base = AppConfig::default();

        let debounce = match (args.debounce, file.debounce) {
            (Some(mode), _)    => mode,
            (None, Some(name)) => name.parse().map_err(ConfigError::Invalid)?,
            (None, None)       => base.debounce,
        };

        let cooldown_secs = args.cooldown.or(file.cooldown);
        let gesture_cooldown = match cooldown_secs {
            Some(s) => Duration::try_from_secs_f64(s)
                .map_err(|_| ConfigError::Invalid(format!("cooldown must be a non-negative number of seconds, got {s}")))?,
            None => base.gesture_cooldown,
        };

        let fps = args.fps.or(file.fps).unwrap_or(base.fps);
        if fps == 0 {
            return Err(ConfigError::Invalid("fps must be at least 1".into()));
        }
        let page_size = args.page_size.or(file.page_size).unwrap_or(base.page_size);
        if page_size == 0 {
            return Err(ConfigError::Invalid("page_size must be at least 1".into()));
        }
        let volume = args.volume.or(file.volume).unwrap_or(base.volume);
        if !(0.0..=1.0).contains(&volume) {
            return Err(ConfigError::Invalid(format!("volume must be within 0.0–1.0, got {volume}")));
        }

        let window_width  = args.width.or(file.window_width).unwrap_or(base.window_width);
        let window_height = args.height.or(file.window_height).unwrap_or(base.window_height);
        if window_width == 0 || window_height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window size must be non-zero, got {window_width}x{window_height}"
            )));
        }

        Ok(AppConfig {
            music_dir:     args.music_dir.clone().or(file.music_dir).unwrap_or(base.music_dir),
            extension:     args.extension.clone().or(file.extension).unwrap_or(base.extension),
            default_cover: args.default_cover.clone().or(file.default_cover).unwrap_or(base.default_cover),
            fps,
            gesture_cooldown,
            debounce,
            page_size,
            volume,
            camera_index:  args.camera.or(file.camera).unwrap_or(base.camera_index),
            window_width,
            window_height,
            annotate:      !args.no_annotate && file.annotate.unwrap_or(base.annotate),
            mute:          args.mute,
            log_level:     args.log_level.clone().or(file.log_level).unwrap_or(base.log_level),
        })
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.fps.max(1)
    }
}

mod animation;
mod app;
mod audio;
mod clock;
mod input;
mod render;
mod state;
mod sync;

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::{App, AppConfig};
use audio::{AudioBackend, AudioEngine};
use clock::SystemTimeSource;
use state::{DisplayPreferences, FileStore};

/// Highest accepted frame rate
const MAX_FPS: u32 = 240;

/// ringclock: a digital clock with a seconds ring
///
/// Hours and minutes in large digits, a ring that fills once a minute with a
/// tick mark for every second, and optional tick and chime sounds.
#[derive(Parser, Debug)]
#[command(name = "ringclock")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target frame rate while the terminal has focus
    #[arg(long, value_name = "N", default_value_t = animation::TARGET_FPS)]
    fps: u32,

    /// Preference store file (defaults to the user config directory)
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Write logs to this file (logging is off otherwise)
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Use ASCII characters only
    #[arg(long)]
    ascii: bool,

    /// Start as if the terminal did not have focus
    #[arg(long)]
    start_hidden: bool,

    /// Never open a sound device, use the terminal bell instead
    #[arg(long)]
    no_sound_device: bool,

    /// Never ring the terminal bell; without a sound device the clock is silent
    #[arg(long)]
    no_bell: bool,

    /// Discard stored preferences and start from the defaults
    #[arg(long)]
    reset_prefs: bool,
}

fn init_logging(path: &PathBuf) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ringclock=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();

    Ok(())
}

/// Sound output for the flags given and the features built in
fn audio_backend(cli: &Cli) -> AudioBackend {
    if cli.no_sound_device || !cfg!(feature = "rodio") {
        if cli.no_bell {
            AudioBackend::Silent
        } else {
            AudioBackend::Bell
        }
    } else {
        AudioBackend::Device
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut store = FileStore::new(cli.store.clone().unwrap_or_else(FileStore::default_path));
    if cli.reset_prefs {
        info!(path = %store.path().display(), "Resetting preferences");
        DisplayPreferences::default().save_to(&mut store);
    }

    let config = AppConfig {
        fps: cli.fps.clamp(1, MAX_FPS),
        use_unicode: !cli.ascii && render::detect_unicode(),
        start_hidden: cli.start_hidden,
    };
    let backend = audio_backend(&cli);

    info!(fps = config.fps, unicode = config.use_unicode, ?backend, "Starting ringclock");

    let mut app = App::new(
        config,
        Box::new(store),
        Box::new(SystemTimeSource),
        AudioEngine::new(backend),
    );

    app.run().await
}

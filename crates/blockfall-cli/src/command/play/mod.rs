use std::path::PathBuf;

use blockfall_engine::PieceSeed;
use log::info;
use rand::Rng as _;

use crate::{command::play::app::PlayApp, config::PlayConfig, logging, tui::Tui};

mod app;

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Piece seed as 32 hex digits (random if omitted)
    #[clap(long)]
    pub(super) seed: Option<PieceSeed>,
    /// JSON configuration file
    #[clap(long)]
    pub(super) config: Option<PathBuf>,
    /// Write log records to this file
    #[clap(long)]
    pub(super) log_file: Option<PathBuf>,
    /// Disable mouse gestures
    #[clap(long)]
    pub(super) no_mouse: bool,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        seed,
        config,
        log_file,
        no_mouse,
    } = arg;

    if let Some(path) = log_file {
        logging::init(path)?;
    }

    let mut config = match config {
        Some(path) => PlayConfig::load(path)?,
        None => PlayConfig::default(),
    };
    merge_args(&mut config, *seed, *no_mouse);

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    info!("piece seed: {seed}");

    let mut app = PlayApp::new(seed, &config);
    Tui::new().with_mouse_capture(config.mouse).run(&mut app)?;

    let stats = app.session().stats();
    info!(
        "exit: score {}, lines {}, level {}",
        stats.score(),
        stats.cleared_lines(),
        stats.level()
    );
    Ok(())
}

/// Command-line flags override the configuration file.
fn merge_args(config: &mut PlayConfig, seed: Option<PieceSeed>, no_mouse: bool) {
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if no_mouse {
        config.mouse = false;
    }
}

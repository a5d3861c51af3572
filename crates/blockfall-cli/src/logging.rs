use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Env, Target};

/// Sends log records to `path`.
///
/// The terminal belongs to the UI, so logging stays off unless a file is
/// given. The filter is read from `RUST_LOG` and defaults to `info`.
pub fn init(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}

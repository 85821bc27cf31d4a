use std::fs::{self, File};
use std::path::Path;

use color_eyre::eyre::{Result, eyre};
use tracing_subscriber::fmt::format::FmtSpan;

/// Writes span events for each poll (`sampler.sample`, `app.poll_cycle`) as
/// JSON lines, so a slow enumeration can be diagnosed offline.
pub fn init_tracing_json(output_path: &Path) -> Result<()> {
    ensure_parent_dir(output_path)?;
    let file = File::create(output_path)?;
    let make_writer = move || {
        file.try_clone()
            .expect("failed to clone trace output file")
    };

    let subscriber = tracing_subscriber::fmt()
        .with_ansi(false)
        .json()
        .with_span_events(FmtSpan::CLOSE)
        .with_max_level(tracing::Level::DEBUG)
        .with_writer(make_writer)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| eyre!("failed to set tracing subscriber: {e}"))?;
    Ok(())
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    Ok(())
}

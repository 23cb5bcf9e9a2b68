use std::fs::{File, OpenOptions};
use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::JsonFields;
use tracing_subscriber::prelude::*;

use crate::config;

/// Installs the global subscriber: a compact stderr layer, plus JSON lines appended
/// to the log file when it can be opened. `verbose` raises the default level to DEBUG.
pub fn init(verbose: bool) -> anyhow::Result<()> {
    let file_layer = open_log_file(&config::log_path()).map(|file| {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(file)
            .fmt_fields(JsonFields::default())
    });

    let stderr_layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    // RUST_LOG wins over --verbose
    let default_level = if verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .try_init()?;

    Ok(())
}

/// Opens `path` for appending, creating its directory. `None` leaves logging on
/// stderr only.
fn open_log_file(path: &Path) -> Option<File> {
    let opened = path
        .parent()
        .map_or(Ok(()), std::fs::create_dir_all)
        .and_then(|()| OpenOptions::new().create(true).append(true).open(path));

    match opened {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Not writing log file {:?}: {}", path, e);
            None
        }
    }
}

use std::{
    fs::{File, OpenOptions},
    io,
    path::Path,
    sync::Mutex,
};

use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for the bot.
///
/// Events go to stderr and are appended to `log_file` as
/// `timestamp level message` lines. Can be overridden with `RUST_LOG`.
/// An unwritable log file only degrades logging to stderr.
pub fn init(service_name: &str, log_file: &Path) {
    let (file, open_err) = match open_log_file(log_file) {
        Ok(file) => (Some(file), None),
        Err(e) => (None, Some(e)),
    };

    // Default: info for our crates, warn for everything else.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(service_name)));

    tracing_subscriber::registry()
        .with(filter)
        .with(file.map(|file| {
            fmt::layer()
                .with_writer(Mutex::new(file))
                .with_target(false)
                .with_ansi(false)
        }))
        .with(fmt::layer().with_writer(io::stderr).with_target(false))
        .init();

    if let Some(e) = open_err {
        warn!(
            "Cannot open log file {}: {e}; logging to stderr only",
            log_file.display()
        );
    }
}

fn open_log_file(path: &Path) -> io::Result<File> {
    OpenOptions::new().create(true).append(true).open(path)
}

fn default_directives(service_name: &str) -> String {
    let crate_name = service_name.replace('-', "_");
    format!("warn,hwb=info,hwb_core=info,hwb_practicum=info,hwb_telegram=info,{crate_name}=info")
}

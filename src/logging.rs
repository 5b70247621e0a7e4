use std::fs::File;
use std::path::PathBuf;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the log file path.
pub const LOG_PATH_ENV: &str = "ITEMGRID_LOG";

/// Initialize tracing.
///
/// Stdout carries the rendered view, so logs never go there:
/// - `ITEMGRID_LOG=<path>` writes to `{path}.{timestamp}.{pid}`
/// - otherwise logs go to stderr, but only when `RUST_LOG` is set
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match std::env::var(LOG_PATH_ENV) {
        Ok(base) => {
            let path = session_log_path(&base);
            match File::create(&path) {
                Ok(file) => install(filter, file, false),
                Err(err) => eprintln!("Warning: Failed to create log file {}: {}", path.display(), err),
            }
        }
        Err(_) if std::env::var_os("RUST_LOG").is_some() => install(filter, std::io::stderr, true),
        Err(_) => {}
    }
}

fn install<W>(filter: EnvFilter, writer: W, ansi: bool)
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .with_timer(fmt::time::UtcTime::rfc_3339());

    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

/// Per-process log file next to `base`, so concurrent sessions never share one.
fn session_log_path(base: &str) -> PathBuf {
    let started = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    PathBuf::from(format!("{}.{}.{}", base, started, std::process::id()))
}

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

/// Debug log location (~/.calloutmd/debug/calloutmd.log)
pub fn log_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".calloutmd").join("debug").join("calloutmd.log"))
}

/// Installs a file subscriber when `CALLOUTMD_DEBUG=1`.
/// The terminal belongs to the UI, so nothing is ever logged to stdout.
pub fn init() {
    let enabled = std::env::var("CALLOUTMD_DEBUG").map(|v| v == "1").unwrap_or(false);
    if !enabled {
        return;
    }
    let Some(path) = log_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = std::fs::create_dir_all(dir);
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "debug logging enabled");
}

use crate::web_preferences::SecurityPosture;

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
pub(crate) const MAIN_WINDOW_TITLE: &str = "Remote Bridge Desktop";
pub(crate) const MAIN_WINDOW_WIDTH: f64 = 1200.0;
pub(crate) const MAIN_WINDOW_HEIGHT: f64 = 800.0;

/// Elevated unless built with the `isolated-webview` feature, which ships
/// the window without the bridge or `process`.
pub(crate) const MAIN_WINDOW_SECURITY_POSTURE: SecurityPosture =
    if cfg!(feature = "isolated-webview") {
        SecurityPosture::Isolated
    } else {
        SecurityPosture::Elevated
    };

pub(crate) const INDEX_DOCUMENT: &str = "index.html";
pub(crate) const PRELOAD_SCRIPT: &str = "preload.js";

pub(crate) const APP_DATA_DIR_NAME: &str = ".remote-bridge-desktop";
pub(crate) const DESKTOP_LOG_FILE: &str = "desktop.log";
pub(crate) const DESKTOP_LOG_MAX_BYTES: u64 = 5 * 1024 * 1024;

pub(crate) const REMOTE_BRIDGE_CALL_COMMAND: &str = "remote_bridge_call";

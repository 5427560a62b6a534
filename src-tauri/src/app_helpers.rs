use crate::{logging, runtime_paths, DESKTOP_LOG_FILE, DESKTOP_LOG_MAX_BYTES};

fn append_scoped_log(scope: &str, message: &str) {
    let path = logging::resolve_desktop_log_path(
        runtime_paths::default_data_root_dir(),
        DESKTOP_LOG_FILE,
    );
    if let Err(error) = logging::append_log_line(&path, scope, message, DESKTOP_LOG_MAX_BYTES) {
        eprintln!("{error}; dropped [{scope}] {message}");
    }
    #[cfg(debug_assertions)]
    eprintln!("[{scope}] {message}");
}

pub(crate) fn append_desktop_log(message: &str) {
    append_scoped_log("desktop", message);
}

pub(crate) fn append_startup_log(message: &str) {
    append_scoped_log("startup", message);
}

pub(crate) fn append_bridge_log(message: &str) {
    append_scoped_log("bridge", message);
}

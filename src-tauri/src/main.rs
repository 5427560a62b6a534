#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app_assets;
mod app_constants;
mod app_helpers;
mod app_runtime;
mod lifecycle;
mod logging;
mod main_window;
mod remote_bridge;
mod remote_bridge_commands;
mod remote_objects;
mod runtime_paths;
mod web_preferences;
mod window_spec;

pub(crate) use app_constants::*;
pub(crate) use app_helpers::{append_bridge_log, append_desktop_log, append_startup_log};

fn main() {
    app_runtime::run();
}

use serde_json::Value;
use tauri::{AppHandle, Manager, Webview, Window};
use url::Url;

use crate::{
    append_bridge_log,
    remote_bridge::{self, RemoteBridgeState},
    remote_objects::{self, ProcessSnapshot, RemoteCall, RemoteHost},
};

struct TauriRemoteHost {
    app_handle: AppHandle,
    window: Window,
}

impl RemoteHost for TauriRemoteHost {
    fn app_name(&self) -> String {
        self.app_handle.package_info().name.clone()
    }

    fn app_version(&self) -> String {
        self.app_handle.package_info().version.to_string()
    }

    fn quit(&self) {
        append_bridge_log(&format!("quit requested by window '{}'", self.window.label()));
        self.app_handle.exit(0);
    }

    fn window_size(&self) -> Result<(u32, u32), String> {
        let physical = self
            .window
            .inner_size()
            .map_err(|error| format!("Failed to read window size: {error}"))?;
        let scale_factor = self
            .window
            .scale_factor()
            .map_err(|error| format!("Failed to read window scale factor: {error}"))?;
        let logical = physical.to_logical::<u32>(scale_factor);
        Ok((logical.width, logical.height))
    }

    fn set_window_title(&self, title: &str) -> Result<(), String> {
        self.window
            .set_title(title)
            .map_err(|error| format!("Failed to set window title: {error}"))
    }

    fn minimize_window(&self) -> Result<(), String> {
        self.window
            .minimize()
            .map_err(|error| format!("Failed to minimize window: {error}"))
    }

    fn maximize_window(&self) -> Result<(), String> {
        self.window
            .maximize()
            .map_err(|error| format!("Failed to maximize window: {error}"))
    }

    fn close_window(&self) -> Result<(), String> {
        self.window
            .close()
            .map_err(|error| format!("Failed to close window: {error}"))
    }

    fn window_labels(&self) -> Vec<String> {
        self.app_handle.webview_windows().into_keys().collect()
    }
}

/// Calls are only served to windows whose bridge was enabled and which are
/// still showing the embedded application.
pub(crate) fn authorize_bridge_call(
    bridge: &RemoteBridgeState,
    label: &str,
    url: Option<&Url>,
) -> Result<(), String> {
    if !bridge.is_enabled(label) {
        return Err(format!("Remote bridge is not enabled for window '{label}'."));
    }

    match url {
        Some(url) if remote_bridge::is_local_app_origin(url) => Ok(()),
        Some(url) => Err(format!(
            "Remote bridge refused call from foreign origin {url} in window '{label}'."
        )),
        None => Err(format!(
            "Remote bridge could not determine the origin of window '{label}'."
        )),
    }
}

#[tauri::command]
pub(crate) fn remote_bridge_is_enabled(webview: Webview) -> bool {
    let bridge = webview.app_handle().state::<RemoteBridgeState>();
    bridge.is_enabled(webview.label())
}

#[tauri::command]
pub(crate) fn remote_bridge_call(
    webview: Webview,
    target: String,
    member: String,
    args: Option<Vec<Value>>,
) -> Result<Value, String> {
    let app_handle = webview.app_handle().clone();
    let label = webview.label().to_string();
    let url = webview.url().ok();

    let authorized = {
        let bridge = app_handle.state::<RemoteBridgeState>();
        authorize_bridge_call(&bridge, &label, url.as_ref())
    };
    if let Err(error) = authorized {
        append_bridge_log(&error);
        return Err(error);
    }

    let args = args.unwrap_or_default();
    let call = RemoteCall::parse(&target, &member, &args)?;
    let snapshot = ProcessSnapshot::current(&app_handle.package_info().version.to_string());
    let host = TauriRemoteHost {
        window: webview.window(),
        app_handle,
    };

    remote_objects::execute(&host, call, &snapshot).map_err(|error| {
        append_bridge_log(&format!("{target}.{member} failed in window '{label}': {error}"));
        error
    })
}

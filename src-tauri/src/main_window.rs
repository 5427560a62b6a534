use std::path::PathBuf;

use tauri::{AppHandle, Manager, WebviewUrl, WebviewWindowBuilder};

use crate::{
    app_assets::AppAssets,
    lifecycle::WindowHost,
    remote_bridge::{self, BridgeToken, RemoteBridgeState},
    remote_objects::ProcessSnapshot,
    window_spec::{self, WindowSpec},
};

/// [`WindowHost`] backed by the running Tauri application.
pub(crate) struct TauriWindowHost<'a, F>
where
    F: Fn(&str),
{
    app_handle: &'a AppHandle,
    log: F,
}

impl<'a, F> TauriWindowHost<'a, F>
where
    F: Fn(&str),
{
    pub(crate) fn new(app_handle: &'a AppHandle, log: F) -> Self {
        Self { app_handle, log }
    }
}

impl<F> WindowHost for TauriWindowHost<'_, F>
where
    F: Fn(&str),
{
    fn open_window_count(&self) -> usize {
        self.app_handle.webview_windows().len()
    }

    fn create_window(&self, spec: &WindowSpec) -> Result<(), String> {
        create_main_window(self.app_handle, spec, &self.log)
    }

    fn quit(&self, exit_code: i32) {
        (self.log)(&format!("exiting with code {exit_code}"));
        self.app_handle.exit(exit_code);
    }
}

/// Builds the native webview for a spec once the bridge state is settled.
pub(crate) trait WebviewBuilder {
    fn build_webview(&self, spec: &WindowSpec, token: Option<&BridgeToken>) -> Result<(), String>;
}

struct TauriWebviewBuilder<'a> {
    app_handle: &'a AppHandle,
    assets: &'a AppAssets,
}

impl WebviewBuilder for TauriWebviewBuilder<'_> {
    fn build_webview(&self, spec: &WindowSpec, token: Option<&BridgeToken>) -> Result<(), String> {
        window_spec::check_bridge_precondition(spec, token)?;

        let preload_source = self
            .assets
            .preload_source_for(&spec.web_preferences.preload_script)?;
        let snapshot =
            ProcessSnapshot::current(&self.app_handle.package_info().version.to_string());
        let script = remote_bridge::build_initialization_script(
            &spec.web_preferences,
            preload_source,
            &snapshot,
        )?;

        WebviewWindowBuilder::new(
            self.app_handle,
            &spec.label,
            WebviewUrl::App(PathBuf::from(&spec.document)),
        )
        .title(&spec.title)
        .inner_size(spec.width, spec.height)
        .initialization_script(&script)
        .build()
        .map(|_| ())
        .map_err(|error| format!("Failed to create window '{}': {}", spec.label, error))
    }
}

pub(crate) fn create_main_window<F>(
    app_handle: &AppHandle,
    spec: &WindowSpec,
    log: F,
) -> Result<(), String>
where
    F: Fn(&str),
{
    let assets = app_handle
        .try_state::<AppAssets>()
        .ok_or_else(|| "Application assets were not resolved before window creation.".to_string())?;
    let bridge = app_handle.state::<RemoteBridgeState>();
    let builder = TauriWebviewBuilder {
        app_handle,
        assets: &assets,
    };
    open_window_with_bridge(&bridge, &builder, spec, log)
}

/// Enables the bridge for `spec.label`, then builds the window pointed at
/// the application document. The registry entry is rolled back if the
/// window cannot be built.
pub(crate) fn open_window_with_bridge<B, F>(
    bridge: &RemoteBridgeState,
    builder: &B,
    spec: &WindowSpec,
    log: F,
) -> Result<(), String>
where
    B: WebviewBuilder,
    F: Fn(&str),
{
    let token = if spec.web_preferences.remote_module_enabled {
        let token = bridge.enable(&spec.label, &spec.web_preferences)?;
        log(&format!("remote bridge enabled for window '{}'", spec.label));
        Some(token)
    } else {
        None
    };

    let result = builder.build_webview(spec, token.as_ref());
    match &result {
        Ok(()) => log(&format!(
            "window '{}' created ({}x{}) loading {}",
            spec.label, spec.width, spec.height, spec.document
        )),
        Err(error) => {
            if token.is_some() {
                bridge.disable(&spec.label);
            }
            log(&format!("failed to create window '{}': {error}", spec.label));
        }
    }
    result
}

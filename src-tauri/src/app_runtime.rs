use tauri::{AppHandle, Manager, RunEvent, WindowEvent};

use crate::{
    app_assets, append_desktop_log, append_startup_log,
    lifecycle::{self, HostPlatform, LifecycleController, LifecycleEvent},
    logging,
    main_window::TauriWindowHost,
    remote_bridge::{self, RemoteBridgeState},
    runtime_paths, DESKTOP_LOG_FILE,
};

fn dispatch_lifecycle_event(app_handle: &AppHandle, event: LifecycleEvent) {
    let controller = app_handle.state::<LifecycleController>();
    let host = TauriWindowHost::new(app_handle, append_desktop_log);
    if let Err(error) = controller.handle(&host, event, append_desktop_log) {
        append_desktop_log(&format!("lifecycle {event:?} failed: {error}"));
        let platform = controller
            .platform()
            .unwrap_or_else(|_| HostPlatform::current());
        if let Some(exit_code) = lifecycle::fallback_exit_code(event, platform) {
            eprintln!("Lifecycle {event:?} failed: {error}");
            app_handle.exit(exit_code);
        }
    }
}

pub(crate) fn run() {
    append_startup_log("desktop process starting");
    append_startup_log(&format!(
        "desktop log path: {}",
        logging::resolve_desktop_log_path(
            runtime_paths::default_data_root_dir(),
            DESKTOP_LOG_FILE,
        )
        .display()
    ));

    tauri::Builder::default()
        .plugin(tauri_plugin_process::init())
        .manage(RemoteBridgeState::default())
        .manage(LifecycleController::new(HostPlatform::current()))
        .invoke_handler(tauri::generate_handler![
            crate::remote_bridge_commands::remote_bridge_call,
            crate::remote_bridge_commands::remote_bridge_is_enabled,
        ])
        .on_window_event(|window, event| {
            if let WindowEvent::Destroyed = event {
                let state = window.app_handle().state::<RemoteBridgeState>();
                remote_bridge::release_destroyed_window(
                    &state,
                    window.label(),
                    append_desktop_log,
                );
            }
        })
        .setup(|app| {
            let assets = app_assets::resolve_app_assets(app.handle()).map_err(|error| {
                append_startup_log(&format!("startup aborted: {error}"));
                error
            })?;
            append_startup_log(&format!(
                "app assets resolved: document={} preload={}",
                assets.document, assets.preload_script
            ));
            app.manage(assets);
            Ok(())
        })
        .build(tauri::generate_context!())
        .expect("error while building tauri application")
        .run(|app_handle, event| match event {
            RunEvent::Ready => {
                append_startup_log("application ready");
                dispatch_lifecycle_event(app_handle, LifecycleEvent::Ready);
            }
            #[cfg(target_os = "macos")]
            RunEvent::Reopen { .. } => {
                dispatch_lifecycle_event(app_handle, LifecycleEvent::Activate);
            }
            RunEvent::ExitRequested { code, api, .. } => {
                if let Some(event) = lifecycle::lifecycle_event_for_exit_request(code) {
                    // The lifecycle decides whether to exit.
                    api.prevent_exit();
                    dispatch_lifecycle_event(app_handle, event);
                }
            }
            RunEvent::Exit => {
                append_desktop_log("desktop process exiting");
            }
            _ => {}
        });
}

use std::{collections::HashSet, sync::Mutex};

use url::Url;

use crate::{
    remote_objects::ProcessSnapshot, web_preferences::WebPreferences, REMOTE_BRIDGE_CALL_COMMAND,
};

const BRIDGE_SCRIPT_TEMPLATE: &str = r#"(() => {
  const invoke = (target, member, args) =>
    window.__TAURI_INTERNALS__.invoke("__COMMAND__", { target, member, args });
  const hostObject = (target) =>
    new Proxy(Object.create(null), {
      get: (_, member) =>
        typeof member === "string" && member !== "then"
          ? (...args) => invoke(target, member, args)
          : undefined,
    });
  const remote = __REMOTE_ENABLED__
    ? Object.freeze({
        app: hostObject("app"),
        process: hostObject("process"),
        getCurrentWindow: () => hostObject("window"),
      })
    : undefined;
  const process = __PROCESS_SNAPSHOT__;
  if (__EXPOSE_GLOBALS__) {
    if (remote) window.remote = remote;
    if (process) window.process = process;
  }
  (function (remote, process) {
__PRELOAD__
  })(remote, process);
})();
"#;

/// Proof that the bridge was enabled for one window label. Only
/// [`RemoteBridgeState::enable`] hands these out.
#[derive(Debug)]
pub(crate) struct BridgeToken {
    label: String,
}

impl BridgeToken {
    pub(crate) fn label(&self) -> &str {
        &self.label
    }
}

#[derive(Debug, Default)]
pub(crate) struct RemoteBridgeState {
    enabled: Mutex<HashSet<String>>,
}

impl RemoteBridgeState {
    pub(crate) fn enable(
        &self,
        label: &str,
        prefs: &WebPreferences,
    ) -> Result<BridgeToken, String> {
        if !prefs.remote_module_enabled {
            return Err(format!(
                "Remote module is disabled for window '{label}'; refusing to enable bridge."
            ));
        }

        self.enabled
            .lock()
            .map_err(|_| "Remote bridge registry lock poisoned.".to_string())?
            .insert(label.to_string());
        Ok(BridgeToken {
            label: label.to_string(),
        })
    }

    pub(crate) fn disable(&self, label: &str) -> bool {
        self.enabled
            .lock()
            .map(|mut guard| guard.remove(label))
            .unwrap_or(false)
    }

    pub(crate) fn is_enabled(&self, label: &str) -> bool {
        self.enabled
            .lock()
            .map(|guard| guard.contains(label))
            .unwrap_or(false)
    }
}

/// Drops the bridge entry of a destroyed window so a later window reusing
/// the label starts without one.
pub(crate) fn release_destroyed_window<F>(
    bridge: &RemoteBridgeState,
    label: &str,
    log: F,
) -> bool
where
    F: Fn(&str),
{
    let released = bridge.disable(label);
    if released {
        log(&format!("remote bridge released for window '{label}'"));
    }
    released
}

/// Origins Tauri serves embedded application assets from.
pub(crate) fn is_local_app_origin(url: &Url) -> bool {
    match (url.scheme(), url.host_str()) {
        ("tauri", Some("localhost")) => true,
        ("http" | "https", Some("tauri.localhost")) => true,
        _ => false,
    }
}

/// Builds the script Tauri runs in every document of a window before the
/// page's own scripts: host-object proxies, the `process` snapshot and the
/// user preload, scoped according to `prefs`.
pub(crate) fn build_initialization_script(
    prefs: &WebPreferences,
    preload_source: &str,
    process_snapshot: &ProcessSnapshot,
) -> Result<String, String> {
    let process_json = if prefs.node_integration {
        serde_json::to_string(process_snapshot)
            .map_err(|error| format!("Failed to serialize process snapshot: {error}"))?
    } else {
        "undefined".to_string()
    };

    Ok(BRIDGE_SCRIPT_TEMPLATE
        .replace("__COMMAND__", REMOTE_BRIDGE_CALL_COMMAND)
        .replace("__REMOTE_ENABLED__", bool_literal(prefs.remote_module_enabled))
        .replace("__PROCESS_SNAPSHOT__", &process_json)
        .replace("__EXPOSE_GLOBALS__", bool_literal(prefs.exposes_globals_to_page()))
        .replace("__PRELOAD__", preload_source))
}

fn bool_literal(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

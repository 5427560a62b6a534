use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

/// Host process facts handed to documents synchronously at window creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProcessSnapshot {
    pub(crate) platform: String,
    pub(crate) arch: String,
    pub(crate) pid: u32,
    pub(crate) versions: BTreeMap<String, String>,
}

impl ProcessSnapshot {
    pub(crate) fn current(app_version: &str) -> Self {
        let versions = BTreeMap::from([
            ("app".to_string(), app_version.to_string()),
            ("tauri".to_string(), tauri::VERSION.to_string()),
        ]);
        Self {
            platform: platform_name(std::env::consts::OS).to_string(),
            arch: std::env::consts::ARCH.to_string(),
            pid: std::process::id(),
            versions,
        }
    }
}

/// Page scripts written against the conventional `process.platform` values
/// expect `darwin`/`win32` rather than Rust's target names.
pub(crate) fn platform_name(os: &str) -> &str {
    match os {
        "macos" => "darwin",
        "windows" => "win32",
        other => other,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum RemoteCall {
    AppName,
    AppVersion,
    AppQuit,
    ProcessPlatform,
    ProcessArch,
    ProcessPid,
    ProcessVersions,
    WindowSize,
    WindowSetTitle(String),
    WindowMinimize,
    WindowMaximize,
    WindowClose,
    WindowList,
}

impl RemoteCall {
    pub(crate) fn parse(target: &str, member: &str, args: &[Value]) -> Result<Self, String> {
        let call = match (target, member) {
            ("app", "getName") => Self::AppName,
            ("app", "getVersion") => Self::AppVersion,
            ("app", "quit") => Self::AppQuit,
            ("process", "platform") => Self::ProcessPlatform,
            ("process", "arch") => Self::ProcessArch,
            ("process", "pid") => Self::ProcessPid,
            ("process", "versions") => Self::ProcessVersions,
            ("window", "getSize") => Self::WindowSize,
            ("window", "setTitle") => {
                let title = args
                    .first()
                    .and_then(Value::as_str)
                    .ok_or_else(|| "window.setTitle expects a string title.".to_string())?;
                return Ok(Self::WindowSetTitle(title.to_string()));
            }
            ("window", "minimize") => Self::WindowMinimize,
            ("window", "maximize") => Self::WindowMaximize,
            ("window", "close") => Self::WindowClose,
            ("window", "getAllWindows") => Self::WindowList,
            ("app" | "process" | "window", _) => {
                return Err(format!("Unknown member '{member}' on remote object '{target}'."));
            }
            _ => return Err(format!("Unknown remote object '{target}'.")),
        };
        Ok(call)
    }
}

/// Host-side operations the bridge can reach, scoped to the calling window.
pub(crate) trait RemoteHost {
    fn app_name(&self) -> String;
    fn app_version(&self) -> String;
    fn quit(&self);
    fn window_size(&self) -> Result<(u32, u32), String>;
    fn set_window_title(&self, title: &str) -> Result<(), String>;
    fn minimize_window(&self) -> Result<(), String>;
    fn maximize_window(&self) -> Result<(), String>;
    fn close_window(&self) -> Result<(), String>;
    fn window_labels(&self) -> Vec<String>;
}

pub(crate) fn execute<H: RemoteHost>(
    host: &H,
    call: RemoteCall,
    snapshot: &ProcessSnapshot,
) -> Result<Value, String> {
    let value = match call {
        RemoteCall::AppName => Value::String(host.app_name()),
        RemoteCall::AppVersion => Value::String(host.app_version()),
        RemoteCall::AppQuit => {
            host.quit();
            Value::Null
        }
        RemoteCall::ProcessPlatform => Value::String(snapshot.platform.clone()),
        RemoteCall::ProcessArch => Value::String(snapshot.arch.clone()),
        RemoteCall::ProcessPid => json!(snapshot.pid),
        RemoteCall::ProcessVersions => json!(snapshot.versions),
        RemoteCall::WindowSize => {
            let (width, height) = host.window_size()?;
            json!({ "width": width, "height": height })
        }
        RemoteCall::WindowSetTitle(title) => {
            host.set_window_title(&title)?;
            Value::Null
        }
        RemoteCall::WindowMinimize => {
            host.minimize_window()?;
            Value::Null
        }
        RemoteCall::WindowMaximize => {
            host.maximize_window()?;
            Value::Null
        }
        RemoteCall::WindowClose => {
            host.close_window()?;
            Value::Null
        }
        RemoteCall::WindowList => {
            let mut labels = host.window_labels();
            labels.sort();
            json!(labels)
        }
    };
    Ok(value)
}

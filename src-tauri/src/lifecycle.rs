//! Application lifecycle decisions, kept apart from the Tauri event loop so
//! the ready/activate/all-closed rules can be exercised against any host.

use std::sync::Mutex;

use crate::window_spec::{self, WindowLabelAllocator, WindowSpec};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum HostPlatform {
    MacOs,
    Other,
}

impl HostPlatform {
    pub(crate) fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Other
        }
    }

    /// macOS apps conventionally stay alive with zero windows until quit.
    pub(crate) fn stays_resident_without_windows(self) -> bool {
        matches!(self, Self::MacOs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleEvent {
    Ready,
    Activate,
    AllWindowsClosed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LifecycleAction {
    CreateWindow,
    Quit { exit_code: i32 },
    StayResident,
    Ignore,
}

/// Tauri reports the last window being destroyed as an exit request with
/// no code. Requests carrying a code come from an explicit `exit` and are
/// not lifecycle events.
pub(crate) fn lifecycle_event_for_exit_request(code: Option<i32>) -> Option<LifecycleEvent> {
    match code {
        None => Some(LifecycleEvent::AllWindowsClosed),
        Some(_) => None,
    }
}

/// Exit code to fall back to when handling `event` failed, so a failed
/// startup or a failed quit never leaves a windowless process behind.
pub(crate) fn fallback_exit_code(event: LifecycleEvent, platform: HostPlatform) -> Option<i32> {
    match event {
        LifecycleEvent::Ready => Some(1),
        LifecycleEvent::AllWindowsClosed if !platform.stays_resident_without_windows() => Some(0),
        LifecycleEvent::AllWindowsClosed | LifecycleEvent::Activate => None,
    }
}

pub(crate) trait WindowHost {
    fn open_window_count(&self) -> usize;
    fn create_window(&self, spec: &WindowSpec) -> Result<(), String>;
    fn quit(&self, exit_code: i32);
}

#[derive(Debug)]
pub(crate) struct LifecycleState {
    platform: HostPlatform,
    ready: bool,
}

impl LifecycleState {
    pub(crate) fn new(platform: HostPlatform) -> Self {
        Self {
            platform,
            ready: false,
        }
    }

    pub(crate) fn decide(&mut self, event: LifecycleEvent, open_windows: usize) -> LifecycleAction {
        match event {
            LifecycleEvent::Ready if self.ready => LifecycleAction::Ignore,
            LifecycleEvent::Ready => {
                self.ready = true;
                LifecycleAction::CreateWindow
            }
            LifecycleEvent::Activate if self.ready && open_windows == 0 => {
                LifecycleAction::CreateWindow
            }
            LifecycleEvent::Activate => LifecycleAction::Ignore,
            LifecycleEvent::AllWindowsClosed if self.platform.stays_resident_without_windows() => {
                LifecycleAction::StayResident
            }
            LifecycleEvent::AllWindowsClosed => LifecycleAction::Quit { exit_code: 0 },
        }
    }
}

#[derive(Debug)]
pub(crate) struct LifecycleController {
    state: Mutex<LifecycleState>,
    labels: WindowLabelAllocator,
}

impl LifecycleController {
    pub(crate) fn new(platform: HostPlatform) -> Self {
        Self {
            state: Mutex::new(LifecycleState::new(platform)),
            labels: WindowLabelAllocator::default(),
        }
    }

    pub(crate) fn platform(&self) -> Result<HostPlatform, String> {
        self.state
            .lock()
            .map(|guard| guard.platform)
            .map_err(|_| "Lifecycle state lock poisoned.".to_string())
    }

    /// Decides under the state lock, then acts on `host` with the lock
    /// released.
    pub(crate) fn handle<H, F>(
        &self,
        host: &H,
        event: LifecycleEvent,
        log: F,
    ) -> Result<LifecycleAction, String>
    where
        H: WindowHost,
        F: Fn(&str),
    {
        let open_windows = host.open_window_count();
        let action = self
            .state
            .lock()
            .map_err(|_| "Lifecycle state lock poisoned.".to_string())?
            .decide(event, open_windows);
        log(&format!(
            "lifecycle {event:?} with {open_windows} open window(s) -> {action:?}"
        ));

        match action {
            LifecycleAction::CreateWindow => {
                let spec = window_spec::main_window_spec(&self.labels.next_label());
                host.create_window(&spec)?;
            }
            LifecycleAction::Quit { exit_code } => host.quit(exit_code),
            LifecycleAction::StayResident | LifecycleAction::Ignore => {}
        }
        Ok(action)
    }
}

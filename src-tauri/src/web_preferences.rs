//! Capability flags applied to every webview the shell creates.
//!
//! The shell never falls back to an implicit posture: windows are built
//! from a named [`SecurityPosture`].

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SecurityPosture {
    /// Page scripts reach `remote` and `process` directly.
    Elevated,
    /// No bridge, no `process`; nothing host-side leaks into the page.
    Isolated,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct WebPreferences {
    /// Expose a synchronous `process` snapshot to the document.
    pub(crate) node_integration: bool,
    /// Keep host objects out of the page's `window` global; only the
    /// preload scope sees them.
    pub(crate) context_isolation: bool,
    /// Inject the remote-object bridge and require it to be enabled before
    /// navigation.
    pub(crate) remote_module_enabled: bool,
    /// Preload script path relative to the application root.
    pub(crate) preload_script: String,
}

impl WebPreferences {
    pub(crate) fn for_posture(posture: SecurityPosture, preload_script: &str) -> Self {
        match posture {
            SecurityPosture::Elevated => Self::elevated(preload_script),
            SecurityPosture::Isolated => Self::isolated(preload_script),
        }
    }

    /// Full host-object access for the loaded page. Trades page sandboxing
    /// for direct access to `remote` and `process` from page scripts.
    pub(crate) fn elevated(preload_script: &str) -> Self {
        Self {
            node_integration: true,
            context_isolation: false,
            remote_module_enabled: true,
            preload_script: preload_script.to_string(),
        }
    }

    pub(crate) fn isolated(preload_script: &str) -> Self {
        Self {
            node_integration: false,
            context_isolation: true,
            remote_module_enabled: false,
            preload_script: preload_script.to_string(),
        }
    }

    pub(crate) fn exposes_globals_to_page(&self) -> bool {
        !self.context_isolation
    }
}

#[cfg(test)]
mod tests {
    use super::{SecurityPosture, WebPreferences};

    #[test]
    fn elevated_preferences_open_host_access() {
        let prefs = WebPreferences::elevated("preload.js");
        assert!(prefs.node_integration);
        assert!(!prefs.context_isolation);
        assert!(prefs.remote_module_enabled);
        assert!(prefs.exposes_globals_to_page());
        assert_eq!(prefs.preload_script, "preload.js");
    }

    #[test]
    fn isolated_preferences_close_host_access() {
        let prefs = WebPreferences::isolated("preload.js");
        assert!(!prefs.node_integration);
        assert!(prefs.context_isolation);
        assert!(!prefs.remote_module_enabled);
        assert!(!prefs.exposes_globals_to_page());
    }

    #[test]
    fn for_posture_selects_matching_preferences() {
        assert_eq!(
            WebPreferences::for_posture(SecurityPosture::Elevated, "preload.js"),
            WebPreferences::elevated("preload.js")
        );
        assert_eq!(
            WebPreferences::for_posture(SecurityPosture::Isolated, "preload.js"),
            WebPreferences::isolated("preload.js")
        );
    }
}

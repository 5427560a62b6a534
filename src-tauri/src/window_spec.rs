use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    remote_bridge::BridgeToken, web_preferences::WebPreferences, INDEX_DOCUMENT,
    MAIN_WINDOW_HEIGHT, MAIN_WINDOW_LABEL, MAIN_WINDOW_SECURITY_POSTURE, MAIN_WINDOW_TITLE,
    MAIN_WINDOW_WIDTH, PRELOAD_SCRIPT,
};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct WindowSpec {
    pub(crate) label: String,
    pub(crate) title: String,
    pub(crate) width: f64,
    pub(crate) height: f64,
    /// Document path relative to the application root.
    pub(crate) document: String,
    pub(crate) web_preferences: WebPreferences,
}

pub(crate) fn main_window_spec(label: &str) -> WindowSpec {
    WindowSpec {
        label: label.to_string(),
        title: MAIN_WINDOW_TITLE.to_string(),
        width: MAIN_WINDOW_WIDTH,
        height: MAIN_WINDOW_HEIGHT,
        document: INDEX_DOCUMENT.to_string(),
        web_preferences: WebPreferences::for_posture(
            MAIN_WINDOW_SECURITY_POSTURE,
            PRELOAD_SCRIPT,
        ),
    }
}

/// Navigation to `spec.document` is only allowed once the bridge has been
/// enabled for this exact window, or when the window has no bridge at all.
pub(crate) fn check_bridge_precondition(
    spec: &WindowSpec,
    token: Option<&BridgeToken>,
) -> Result<(), String> {
    match (spec.web_preferences.remote_module_enabled, token) {
        (true, Some(token)) if token.label() == spec.label => Ok(()),
        (true, Some(token)) => Err(format!(
            "Bridge token for window '{}' cannot be used to load window '{}'.",
            token.label(),
            spec.label
        )),
        (true, None) => Err(format!(
            "Remote bridge must be enabled for window '{}' before loading {}.",
            spec.label, spec.document
        )),
        (false, Some(_)) => Err(format!(
            "Window '{}' has the remote module disabled but was given a bridge token.",
            spec.label
        )),
        (false, None) => Ok(()),
    }
}

/// Hands out `main`, then `main-1`, `main-2`, ... so a recreated window
/// never collides with one that is still being torn down.
#[derive(Debug, Default)]
pub(crate) struct WindowLabelAllocator {
    next: AtomicUsize,
}

impl WindowLabelAllocator {
    pub(crate) fn next_label(&self) -> String {
        match self.next.fetch_add(1, Ordering::Relaxed) {
            0 => MAIN_WINDOW_LABEL.to_string(),
            index => format!("{MAIN_WINDOW_LABEL}-{index}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::remote_bridge::RemoteBridgeState;

    #[test]
    fn main_window_spec_uses_fixed_dimensions_and_configured_posture() {
        let spec = main_window_spec("main");
        assert_eq!(spec.width, 1200.0);
        assert_eq!(spec.height, 800.0);
        assert_eq!(spec.document, "index.html");
        assert_eq!(
            spec.web_preferences,
            WebPreferences::for_posture(MAIN_WINDOW_SECURITY_POSTURE, "preload.js")
        );
    }

    #[test]
    fn every_spec_loads_the_same_document() {
        let first = main_window_spec("main");
        let second = main_window_spec("main-1");
        assert_eq!(first.document, second.document);
        assert_eq!(first.web_preferences, second.web_preferences);
    }

    #[test]
    fn precondition_requires_a_token_when_remote_module_is_enabled() {
        let spec = main_window_spec("main");
        let error = check_bridge_precondition(&spec, None).unwrap_err();
        assert!(error.contains("before loading index.html"));
    }

    #[test]
    fn precondition_rejects_a_token_for_another_window() {
        let bridge = RemoteBridgeState::default();
        let token = bridge
            .enable("main", &WebPreferences::elevated("preload.js"))
            .expect("bridge should enable");

        let spec = main_window_spec("main-1");
        let error = check_bridge_precondition(&spec, Some(&token)).unwrap_err();
        assert!(error.contains("'main'"));
        assert!(error.contains("'main-1'"));
    }

    #[test]
    fn precondition_accepts_matching_token() {
        let bridge = RemoteBridgeState::default();
        let spec = main_window_spec("main");
        let token = bridge
            .enable(&spec.label, &spec.web_preferences)
            .expect("bridge should enable");

        assert!(check_bridge_precondition(&spec, Some(&token)).is_ok());
    }

    #[test]
    fn precondition_allows_isolated_windows_without_token() {
        let mut spec = main_window_spec("main");
        spec.web_preferences = WebPreferences::isolated("preload.js");
        assert!(check_bridge_precondition(&spec, None).is_ok());
    }

    #[test]
    fn label_allocator_numbers_recreated_windows() {
        let allocator = WindowLabelAllocator::default();
        assert_eq!(allocator.next_label(), "main");
        assert_eq!(allocator.next_label(), "main-1");
        assert_eq!(allocator.next_label(), "main-2");
    }
}

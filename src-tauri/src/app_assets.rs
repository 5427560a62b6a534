use tauri::AppHandle;

use crate::{INDEX_DOCUMENT, PRELOAD_SCRIPT};

/// Application-root files every window depends on, checked once at startup.
#[derive(Debug, Clone)]
pub(crate) struct AppAssets {
    pub(crate) document: String,
    pub(crate) preload_script: String,
    pub(crate) preload_source: String,
}

impl AppAssets {
    pub(crate) fn preload_source_for(&self, preload_script: &str) -> Result<&str, String> {
        if preload_script != self.preload_script {
            return Err(format!(
                "Preload script {preload_script} was not resolved at startup (resolved: {}).",
                self.preload_script
            ));
        }
        Ok(&self.preload_source)
    }
}

pub(crate) fn resolve_app_assets(app_handle: &AppHandle) -> Result<AppAssets, String> {
    let resolver = app_handle.asset_resolver();
    validate_app_assets(INDEX_DOCUMENT, PRELOAD_SCRIPT, |path| {
        resolver
            .get(path.to_string())
            .map(|asset| asset.bytes().to_vec())
    })
}

pub(crate) fn validate_app_assets<F>(
    document: &str,
    preload_script: &str,
    lookup: F,
) -> Result<AppAssets, String>
where
    F: Fn(&str) -> Option<Vec<u8>>,
{
    if lookup(document).is_none() {
        return Err(format!(
            "Application document is missing from the app root: {document}"
        ));
    }

    let preload_bytes = lookup(preload_script).ok_or_else(|| {
        format!("Preload script is missing from the app root: {preload_script}")
    })?;
    let preload_source = String::from_utf8(preload_bytes)
        .map_err(|error| format!("Preload script {preload_script} is not valid UTF-8: {error}"))?;

    Ok(AppAssets {
        document: document.to_string(),
        preload_script: preload_script.to_string(),
        preload_source,
    })
}

#[cfg(test)]
mod tests {
    use super::validate_app_assets;

    fn lookup(path: &str) -> Option<Vec<u8>> {
        match path {
            "index.html" => Some(b"<html></html>".to_vec()),
            "preload.js" => Some(b"window.ready = true;".to_vec()),
            "broken.js" => Some(vec![0xff, 0xfe]),
            _ => None,
        }
    }

    #[test]
    fn validate_app_assets_reads_preload_source() {
        let assets = validate_app_assets("index.html", "preload.js", lookup).expect("assets");
        assert_eq!(assets.document, "index.html");
        assert_eq!(assets.preload_source, "window.ready = true;");
        assert_eq!(
            assets.preload_source_for("preload.js"),
            Ok("window.ready = true;")
        );
        assert!(assets.preload_source_for("other.js").is_err());
    }

    #[test]
    fn validate_app_assets_reports_missing_document() {
        let error = validate_app_assets("missing.html", "preload.js", lookup).unwrap_err();
        assert!(error.contains("missing.html"));
    }

    #[test]
    fn validate_app_assets_reports_missing_preload() {
        let error = validate_app_assets("index.html", "missing.js", lookup).unwrap_err();
        assert!(error.contains("Preload script is missing"));
    }

    #[test]
    fn validate_app_assets_rejects_non_utf8_preload() {
        let error = validate_app_assets("index.html", "broken.js", lookup).unwrap_err();
        assert!(error.contains("not valid UTF-8"));
    }
}

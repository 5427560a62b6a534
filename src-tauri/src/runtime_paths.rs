use std::path::PathBuf;

use crate::APP_DATA_DIR_NAME;

pub(crate) fn default_data_root_dir() -> Option<PathBuf> {
    home::home_dir().map(|home| home.join(APP_DATA_DIR_NAME))
}

pub(crate) fn logs_dir(data_root_dir: Option<PathBuf>) -> PathBuf {
    data_root_dir
        .unwrap_or_else(|| std::env::temp_dir().join(APP_DATA_DIR_NAME))
        .join("logs")
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::logs_dir;

    #[test]
    fn logs_dir_nests_under_data_root() {
        let dir = logs_dir(Some(PathBuf::from("/tmp/bridge-root")));
        assert_eq!(dir, PathBuf::from("/tmp/bridge-root").join("logs"));
    }

    #[test]
    fn logs_dir_falls_back_to_temp_dir() {
        let dir = logs_dir(None);
        assert!(dir.starts_with(std::env::temp_dir()));
        assert!(dir.ends_with("logs"));
    }
}

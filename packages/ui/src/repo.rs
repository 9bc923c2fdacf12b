//! Shared repository constructor for all platforms.
//!
//! Returns a [`store::HydrationRepo`] backed by a [`store::FileStore`] under the
//! platform data directory, next to the `hydrate.toml` config file.

use std::path::PathBuf;

/// `<data_dir>/hydrate/`, or `./hydrate` when the platform data dir is unknown.
pub fn data_dir() -> PathBuf {
    platform_data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("hydrate")
}

#[cfg(not(target_os = "android"))]
fn platform_data_dir() -> Option<PathBuf> {
    dirs::data_dir()
}

// `dirs` knows nothing about Android; the app's internal files dir is keyed by package.
#[cfg(target_os = "android")]
fn platform_data_dir() -> Option<PathBuf> {
    let cmdline = std::fs::read("/proc/self/cmdline").ok()?;
    android_files_dir(&cmdline)
}

/// `/data/data/<package>/files` from the raw contents of `/proc/self/cmdline`.
#[cfg_attr(not(target_os = "android"), allow(dead_code))]
fn android_files_dir(cmdline: &[u8]) -> Option<PathBuf> {
    let process = cmdline.split(|b| *b == 0).next()?;
    let process = std::str::from_utf8(process).ok()?;
    // Secondary processes are named `<package>:<suffix>`
    let package = process.split(':').next()?.trim();
    if package.is_empty() || package.contains('/') {
        return None;
    }
    Some(PathBuf::from("/data/data").join(package).join("files"))
}

/// Path of the app config file.
pub fn config_path() -> PathBuf {
    data_dir().join(store::AppConfig::filename())
}

/// Create the device-backed repository.
pub fn make_repo() -> store::HydrationRepo<store::FileStore> {
    store::HydrationRepo::new(store::FileStore::new(data_dir()))
}

/// Load the app config, falling back to defaults when it is unreadable.
pub fn load_config() -> store::AppConfig {
    let path = config_path();
    match store::AppConfig::load(&path) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "using default config");
            store::AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_android_files_dir_from_cmdline() {
        assert_eq!(
            android_files_dir(b"org.hydrate.app\0"),
            Some(PathBuf::from("/data/data/org.hydrate.app/files"))
        );
        assert_eq!(
            android_files_dir(b"org.hydrate.app:remote\0--flag\0"),
            Some(PathBuf::from("/data/data/org.hydrate.app/files"))
        );
    }

    #[test]
    fn test_android_files_dir_rejects_odd_names() {
        assert_eq!(android_files_dir(b""), None);
        assert_eq!(android_files_dir(b"/system/bin/app_process\0"), None);
        assert_eq!(android_files_dir(&[0xff, 0xfe, 0]), None);
    }

    #[test]
    fn test_config_lives_next_to_data() {
        assert_eq!(config_path(), data_dir().join("hydrate.toml"));
        assert!(data_dir().ends_with("hydrate"));
    }
}

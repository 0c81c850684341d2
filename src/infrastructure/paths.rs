//! Path utilities for the studio's user-scoped files.
//!
//! Resolves where the studio keeps per-user state (recent solutions, logs) and
//! provides the lexical path normalization used when comparing solution paths.

use std::path::{Component, Path, PathBuf};

/// Name of the studio's directory inside the platform config directory.
const APP_DIR_NAME: &str = "webweaver";

/// Returns the default user config directory for the studio.
///
/// Resolves to `<platform config dir>/webweaver`, e.g. `~/.config/webweaver` on
/// Linux or `%APPDATA%\webweaver` on Windows. Falls back to `./.webweaver` when the
/// platform directory cannot be determined.
#[must_use]
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR_NAME}")))
}

/// `<config_dir>/recent_solutions.json`
#[must_use]
pub fn recent_solutions_path(config_dir: &Path) -> PathBuf {
    config_dir.join("recent_solutions.json")
}

/// `<config_dir>/logs`
#[must_use]
pub fn logs_dir(config_dir: &Path) -> PathBuf {
    config_dir.join("logs")
}

/// `<config_dir>/logs/studio.log`
#[must_use]
pub fn log_file_path(config_dir: &Path) -> PathBuf {
    logs_dir(config_dir).join("studio.log")
}

/// Lexically normalizes a path without touching the filesystem.
///
/// Removes `.` components and resolves `..` against preceding normal components.
/// Leading `..` of a relative path are kept; `..` directly below the root is dropped.
///
/// # Examples
///
/// ```
/// use webweaver_studio::infrastructure::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// assert_eq!(normalize_path(Path::new("../x/./y")), PathBuf::from("../x/y"));
/// ```
#[must_use]
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                Some(Component::RootDir | Component::Prefix(_)) => {}
                Some(Component::ParentDir | Component::CurDir) | None => {
                    normalized.push(component.as_os_str());
                }
            },
            Component::Prefix(_) | Component::RootDir | Component::Normal(_) => {
                normalized.push(component.as_os_str());
            }
        }
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_resolves_dots() {
        assert_eq!(normalize_path(Path::new("/a/b/./c/../d")), PathBuf::from("/a/b/d"));
        assert_eq!(normalize_path(Path::new("/../a")), PathBuf::from("/a"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
        assert_eq!(normalize_path(Path::new("./a/b/")), PathBuf::from("a/b"));
    }

    #[test]
    fn user_files_live_under_config_dir() {
        let config = Path::new("/home/user/.config/webweaver");
        assert_eq!(
            recent_solutions_path(config),
            PathBuf::from("/home/user/.config/webweaver/recent_solutions.json")
        );
        assert_eq!(
            log_file_path(config),
            PathBuf::from("/home/user/.config/webweaver/logs/studio.log")
        );
    }

    #[test]
    fn default_config_dir_ends_with_app_name() {
        assert!(default_config_dir().ends_with("webweaver") || default_config_dir().ends_with(".webweaver"));
    }
}

//! Solution descriptor and derived on-disk layout.
//!
//! A [`Solution`] holds the facts about a project that stay fixed while it is open:
//! its name, where it lives, the site under test, the browser and how to launch it.
//! Every path the rest of the crate touches (solution file, `pages`, `scripts`,
//! `recordings`) is derived from these fields and never stored.

use super::error::{ManagedDirectory, SolutionLoadError};
use std::fmt;
use std::path::{Path, PathBuf};

/// File extension of solution files.
pub const SOLUTION_EXTENSION: &str = "wws";

/// File extension of recording files.
pub const RECORDING_EXTENSION: &str = "wwrec";

/// Browsers the studio knows how to drive.
///
/// The solution stores its browser as an opaque identifier so unknown values
/// survive a load/save cycle; this enum is the typed view of the known ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBrowser {
    Chromium,
    Firefox,
    GoogleChrome,
    MicrosoftEdge,
}

impl KnownBrowser {
    pub const ALL: [Self; 4] = [
        Self::Chromium,
        Self::Firefox,
        Self::GoogleChrome,
        Self::MicrosoftEdge,
    ];

    /// Stable identifier written to solution files.
    #[must_use]
    pub const fn identifier(self) -> &'static str {
        match self {
            Self::Chromium => "chromium",
            Self::Firefox => "firefox",
            Self::GoogleChrome => "chrome",
            Self::MicrosoftEdge => "edge",
        }
    }

    /// Looks up a browser by identifier, ignoring ASCII case.
    #[must_use]
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|browser| browser.identifier().eq_ignore_ascii_case(identifier))
    }
}

impl fmt::Display for KnownBrowser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.identifier())
    }
}

/// Fixed browser window dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

/// How the recording browser window is sized.
///
/// The three modes are mutually exclusive; a window size only exists in
/// [`WindowMode::Custom`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    /// Let the browser pick its own size.
    #[default]
    Default,
    /// Start maximised.
    Maximised,
    /// Start with an explicit size.
    Custom(WindowSize),
}

impl WindowMode {
    /// The explicit window size, if any.
    #[must_use]
    pub const fn window_size(&self) -> Option<WindowSize> {
        match self {
            Self::Custom(size) => Some(*size),
            Self::Default | Self::Maximised => None,
        }
    }
}

/// Options used when launching the browser for a recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserLaunchOptions {
    pub private_mode: bool,
    pub disable_extensions: bool,
    pub disable_notifications: bool,
    pub ignore_certificate_errors: bool,
    /// Replaces the browser's user agent string when set.
    pub user_agent: Option<String>,
    pub window: WindowMode,
}

impl Default for BrowserLaunchOptions {
    fn default() -> Self {
        Self {
            private_mode: true,
            disable_extensions: true,
            disable_notifications: true,
            ignore_certificate_errors: false,
            user_agent: None,
            window: WindowMode::Default,
        }
    }
}

/// An automation project: base URL, target browser and a directory tree holding
/// pages, scripts and recordings.
///
/// Immutable after load except through an explicit re-save. Paths are derived:
///
/// ```text
/// effective_root = base_directory[/name]   (subdirectory only if requested)
/// ├── <name>.wws
/// ├── pages/
/// ├── scripts/
/// └── recordings/
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub name: String,
    pub base_directory: PathBuf,
    /// When set, the effective root is `base_directory/name`.
    pub create_subdirectory: bool,
    pub base_url: String,
    /// Opaque browser identifier, see [`KnownBrowser`].
    pub browser: String,
    pub launch_options: BrowserLaunchOptions,
}

impl Solution {
    /// Creates a solution with default launch options.
    ///
    /// # Examples
    ///
    /// ```
    /// use webweaver_studio::domain::Solution;
    /// use std::path::Path;
    ///
    /// let solution = Solution::new("Demo", "/tmp/x", true, "https://example.com", "firefox");
    /// assert_eq!(solution.effective_root(), Path::new("/tmp/x/Demo"));
    /// assert_eq!(solution.solution_file_path(), Path::new("/tmp/x/Demo/Demo.wws"));
    /// ```
    pub fn new(
        name: impl Into<String>,
        base_directory: impl Into<PathBuf>,
        create_subdirectory: bool,
        base_url: impl Into<String>,
        browser: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            base_directory: base_directory.into(),
            create_subdirectory,
            base_url: base_url.into(),
            browser: browser.into(),
            launch_options: BrowserLaunchOptions::default(),
        }
    }

    /// Replaces the launch options.
    #[must_use]
    pub fn with_launch_options(mut self, launch_options: BrowserLaunchOptions) -> Self {
        self.launch_options = launch_options;
        self
    }

    /// Root directory of the solution on disk.
    #[must_use]
    pub fn effective_root(&self) -> PathBuf {
        compute_effective_root(&self.base_directory, &self.name, self.create_subdirectory)
    }

    /// Path of the `<name>.wws` solution file inside the effective root.
    #[must_use]
    pub fn solution_file_path(&self) -> PathBuf {
        self.effective_root()
            .join(format!("{}.{SOLUTION_EXTENSION}", self.name))
    }

    #[must_use]
    pub fn pages_path(&self) -> PathBuf {
        self.managed_path(ManagedDirectory::Pages)
    }

    #[must_use]
    pub fn scripts_path(&self) -> PathBuf {
        self.managed_path(ManagedDirectory::Scripts)
    }

    #[must_use]
    pub fn recordings_path(&self) -> PathBuf {
        self.managed_path(ManagedDirectory::Recordings)
    }

    /// Path of one managed directory.
    #[must_use]
    pub fn managed_path(&self, directory: ManagedDirectory) -> PathBuf {
        let root = self.effective_root();
        match directory.dir_name() {
            Some(name) => root.join(name),
            None => root,
        }
    }

    /// Checks the fields that must hold before the solution touches the disk.
    ///
    /// # Errors
    ///
    /// Returns [`SolutionLoadError::InvalidField`] naming the offending field.
    pub fn validate(&self) -> Result<(), SolutionLoadError> {
        if is_valid_solution_name(&self.name) {
            Ok(())
        } else {
            Err(SolutionLoadError::InvalidField("solutionName"))
        }
    }

    /// Typed view of the browser identifier, `None` when it is not a known browser.
    #[must_use]
    pub fn known_browser(&self) -> Option<KnownBrowser> {
        KnownBrowser::from_identifier(&self.browser)
    }
}

/// Whether `name` is usable as a solution name.
///
/// The name becomes both a directory and a file stem, so it must not be blank, must
/// not be `.` or `..`, and must not contain path separators or NUL.
///
/// # Examples
///
/// ```
/// use webweaver_studio::domain::is_valid_solution_name;
///
/// assert!(is_valid_solution_name("Demo"));
/// assert!(!is_valid_solution_name("  "));
/// assert!(!is_valid_solution_name("a/b"));
/// ```
#[must_use]
pub fn is_valid_solution_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed != "."
        && trimmed != ".."
        && !name.contains(|c: char| matches!(c, '/' | '\\' | '\0'))
}

/// Computes the effective root from its three inputs.
#[must_use]
pub fn compute_effective_root(base_directory: &Path, name: &str, create_subdirectory: bool) -> PathBuf {
    if create_subdirectory {
        base_directory.join(name)
    } else {
        base_directory.to_path_buf()
    }
}

//! Solution file codec and I/O.
//!
//! A solution file (`<name>.wws`) is a versioned JSON document holding every
//! descriptor field except the derived paths. Decoding validates in a fixed order so
//! that the most specific error is reported first:
//!
//! 1. **Structure**: document is an object, `version` present and an integer
//! 2. **Version**: `version` is a known value (forward-compatibility guard)
//! 3. **Presence**: `solution` object and each required field exist
//! 4. **Types**: every field has the expected JSON type
//! 5. **Semantics**: field values are acceptable (a usable solution name)

use crate::domain::error::{Result, SolutionLoadError, StudioError};
use crate::domain::Solution;
use crate::storage::json::{integer_value, read_json_value, write_json_atomic, ReadError};
use crate::storage::models::{LaunchOptionsRecord, SolutionRecord, FORMAT_VERSION};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Members of the `solution` object that must be present, in check order.
const REQUIRED_FIELDS: [&str; 5] = [
    "solutionName",
    "solutionDirectory",
    "solutionDirectoryCreated",
    "baseUrl",
    "browser",
];

/// Encodes a solution as a versioned JSON document.
///
/// # Examples
///
/// ```
/// use webweaver_studio::domain::Solution;
/// use webweaver_studio::storage::solution_file;
///
/// let solution = Solution::new("Demo", "/tmp/x", true, "https://example.com", "firefox");
/// let json = solution_file::serialize(&solution);
/// assert_eq!(json["version"], 1);
/// assert_eq!(json["solution"]["solutionName"], "Demo");
/// assert_eq!(solution_file::deserialize(&json), Ok(solution));
/// ```
#[must_use]
pub fn serialize(solution: &Solution) -> Value {
    let record = SolutionRecord {
        solution_name: solution.name.clone(),
        solution_directory: solution.base_directory.to_string_lossy().into_owned(),
        solution_directory_created: solution.create_subdirectory,
        base_url: solution.base_url.clone(),
        browser: solution.browser.clone(),
        browser_launch_options: LaunchOptionsRecord::from(&solution.launch_options),
    };

    json!({
        "version": FORMAT_VERSION,
        "solution": record,
    })
}

/// Decodes a solution document.
///
/// # Errors
///
/// Returns the first applicable [`SolutionLoadError`] in the precedence order
/// described in the module documentation.
pub fn deserialize(raw: &Value) -> std::result::Result<Solution, SolutionLoadError> {
    let Some(document) = raw.as_object() else {
        return Err(SolutionLoadError::FileMalformed);
    };

    let version = document.get("version").ok_or(SolutionLoadError::MissingVersion)?;
    let version = integer_value(version).ok_or(SolutionLoadError::FileMalformed)?;
    if version != i128::from(FORMAT_VERSION) {
        return Err(SolutionLoadError::UnsupportedVersion { found: version });
    }

    let solution = document
        .get("solution")
        .filter(|value| value.is_object())
        .ok_or(SolutionLoadError::MissingSolutionObject)?;

    if let Some(missing) = REQUIRED_FIELDS
        .into_iter()
        .find(|field| solution.get(*field).is_none())
    {
        return Err(SolutionLoadError::MissingRequiredField(missing));
    }

    let record: SolutionRecord = serde_json::from_value(solution.clone()).map_err(|e| {
        tracing::debug!(error = %e, "solution object has mistyped fields");
        SolutionLoadError::FileMalformed
    })?;

    let solution = Solution {
        name: record.solution_name,
        base_directory: PathBuf::from(record.solution_directory),
        create_subdirectory: record.solution_directory_created,
        base_url: record.base_url,
        browser: record.browser,
        launch_options: record.browser_launch_options.into(),
    };
    solution.validate()?;
    Ok(solution)
}

/// Loads a solution from a `.wws` file.
///
/// # Errors
///
/// - [`SolutionLoadError::FileNotFound`] if the file does not exist
/// - [`SolutionLoadError::FileMalformed`] if it is not JSON
/// - any other [`SolutionLoadError`] from [`deserialize`]
/// - [`StudioError::Io`] if the file exists but cannot be read
pub fn load_solution(path: &Path) -> Result<Solution> {
    let _span = tracing::debug_span!("load_solution", path = ?path).entered();

    let raw = read_json_value(path).map_err(|e| match e {
        ReadError::NotFound => StudioError::Solution(SolutionLoadError::FileNotFound),
        ReadError::Io(e) => StudioError::Io(e),
        ReadError::Parse(e) => {
            tracing::debug!(error = %e, "solution file is not valid JSON");
            StudioError::Solution(SolutionLoadError::FileMalformed)
        }
    })?;

    let solution = deserialize(&raw)?;

    tracing::debug!(
        solution_name = %solution.name,
        root = ?solution.effective_root(),
        "solution loaded"
    );
    Ok(solution)
}

/// Writes the solution to its `<effective root>/<name>.wws` file and returns that path.
///
/// The effective root must already exist; see
/// [`ensure_directory_structure`](crate::storage::layout::ensure_directory_structure).
///
/// # Errors
///
/// Returns [`StudioError::Io`] if the file cannot be written.
pub fn save_solution(solution: &Solution) -> Result<PathBuf> {
    let path = solution.solution_file_path();
    let _span = tracing::debug_span!("save_solution", path = ?path).entered();

    write_json_atomic(&path, &serialize(solution))?;

    tracing::debug!("solution saved");
    Ok(path)
}

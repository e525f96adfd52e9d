//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: write to `.tmp`, re-parse it, then rename over the target
//! - **Version validation**: refuse files written by an incompatible schema
//!
//! Projects are saved as `.rcs` files containing pretty-printed JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use section_core::file_io::{save_project, load_project};
//! use section_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("columns.rcs");
//! save_project(&project, path).unwrap();
//! let loaded = load_project(path).unwrap();
//! assert_eq!(loaded.meta.job_id, "25-001");
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use log::{debug, info};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Save a project with atomic write semantics.
///
/// 1. Serialize to JSON
/// 2. Write and fsync `<path>.tmp`
/// 3. Re-read the temp file and check it parses back into a project
/// 4. Rename over `path`
///
/// # Example
///
/// ```rust,no_run
/// use section_core::file_io::save_project;
/// use section_core::project::Project;
/// use std::path::Path;
///
/// let project = Project::new("Engineer", "25-001", "Client");
/// save_project(&project, Path::new("columns.rcs"))?;
/// # Ok::<(), section_core::errors::CalcError>(())
/// ```
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)?;
    let tmp_path = path.with_extension("rcs.tmp");

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        CalcError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        CalcError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    tmp_file.sync_all().map_err(|e| {
        CalcError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    drop(tmp_file);

    if let Err(e) = verify_written(&tmp_path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        CalcError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!("Saved {} item(s) to {}", project.item_count(), path.display());
    Ok(())
}

fn verify_written(tmp_path: &Path) -> CalcResult<()> {
    let contents = fs::read_to_string(tmp_path).map_err(|e| {
        CalcError::file_error("verify temp file", tmp_path.display().to_string(), e.to_string())
    })?;
    serde_json::from_str::<Project>(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Written file does not parse back: {}", e),
    })?;
    debug!("Verified {}", tmp_path.display());
    Ok(())
}

/// Load a project from a file.
///
/// # Returns
///
/// * `Ok(Project)` - Successfully loaded project
/// * `Err(CalcError::VersionMismatch)` - File version is incompatible
/// * `Err(CalcError::SerializationError)` - Invalid JSON
/// * `Err(CalcError::FileError)` - I/O error
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    info!(
        "Loaded project '{}' ({} item(s)) from {}",
        project.meta.job_id,
        project.item_count(),
        path.display()
    );
    Ok(project)
}

/// Check a file's schema version against [`SCHEMA_VERSION`].
///
/// Major versions must match. While the schema is `0.x`, a file with a newer
/// minor version than ours is rejected as well.
pub fn validate_version(file_version: &str) -> CalcResult<()> {
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let parse = |v: &str| -> Option<Vec<u32>> { v.split('.').map(|p| p.parse().ok()).collect() };
    let file_parts = parse(file_version).ok_or_else(mismatch)?;
    let current_parts = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_parts.is_empty() || file_parts[0] != current_parts[0] {
        return Err(mismatch());
    }

    if current_parts[0] == 0 {
        let file_minor = file_parts.get(1).copied().unwrap_or(0);
        let current_minor = current_parts.get(1).copied().unwrap_or(0);
        if file_minor > current_minor {
            return Err(mismatch());
        }
    }

    Ok(())
}

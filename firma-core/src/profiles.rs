//! Per-organization YAML profile store.
//!
//! # Storage layout
//!
//! ```text
//! ~/.firma/
//!   profiles/
//!     <profile_id>.yaml   (one file per organization — mode 0600)
//! ```
//!
//! # API pattern
//!
//! Every function touching the store has two forms:
//! - `fn_at(home: &Path, …)` — explicit home; used in tests with `TempDir`
//! - `fn(…)` — derives home from `dirs::home_dir()`, delegates to `_at`
//!
//! Tests must NEVER call the no-arg wrappers; always use `_at`.

use std::path::{Path, PathBuf};

use crate::error::ProfileError;
use crate::types::{OrganizationConfig, ProfileId};

// ---------------------------------------------------------------------------
// 1. Path helpers
// ---------------------------------------------------------------------------

/// `<home>/.firma/profiles/`
///
/// Creates the directory (mode `0700`) if it does not yet exist.
pub fn profiles_dir_at(home: &Path) -> Result<PathBuf, ProfileError> {
    let dir = home.join(".firma").join("profiles");
    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
        set_dir_permissions(&dir)?;
    }
    Ok(dir)
}

/// `profiles_dir_at` convenience wrapper.
pub fn profiles_dir() -> Result<PathBuf, ProfileError> {
    profiles_dir_at(&home()?)
}

/// `<home>/.firma/profiles/<id>.yaml` — pure, no I/O.
pub fn profile_path_at(home: &Path, id: &ProfileId) -> PathBuf {
    home.join(".firma")
        .join("profiles")
        .join(format!("{}.yaml", id.0))
}

// ---------------------------------------------------------------------------
// 2. Load
// ---------------------------------------------------------------------------

/// Load and validate a profile from an arbitrary YAML file.
///
/// Returns `ProfileError::NotFound` if absent,
/// `ProfileError::Parse` (with path + line context) if malformed YAML,
/// `ProfileError::Invalid` if the content fails schema validation.
pub fn load_profile_file(path: &Path) -> Result<OrganizationConfig, ProfileError> {
    if !path.exists() {
        return Err(ProfileError::NotFound { path: path.to_path_buf() });
    }
    let contents = std::fs::read_to_string(path)?;
    let profile: OrganizationConfig = serde_yaml::from_str(&contents)
        .map_err(|e| ProfileError::Parse { path: path.to_path_buf(), source: e })?;
    profile.validate()?;
    Ok(profile)
}

/// Load a profile by id from `<home>/.firma/profiles/<id>.yaml`.
pub fn load_profile_at(home: &Path, id: &ProfileId) -> Result<OrganizationConfig, ProfileError> {
    load_profile_file(&profile_path_at(home, id))
}

/// `load_profile_at` convenience wrapper.
pub fn load_profile(id: &ProfileId) -> Result<OrganizationConfig, ProfileError> {
    load_profile_at(&home()?, id)
}

/// Walk `<home>/.firma/profiles/*.yaml` and return all profiles, sorted by
/// file name for deterministic output.
pub fn list_profiles_at(home: &Path) -> Result<Vec<OrganizationConfig>, ProfileError> {
    let dir = home.join(".firma").join("profiles");
    if !dir.exists() {
        return Ok(vec![]);
    }

    let mut entries: Vec<_> = std::fs::read_dir(&dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.file_name().to_string_lossy().ends_with(".yaml"))
        .collect();
    entries.sort_by_key(|e| e.file_name());

    let mut profiles = Vec::with_capacity(entries.len());
    for entry in entries {
        profiles.push(load_profile_file(&entry.path())?);
    }
    Ok(profiles)
}

/// `list_profiles_at` convenience wrapper.
pub fn list_profiles() -> Result<Vec<OrganizationConfig>, ProfileError> {
    list_profiles_at(&home()?)
}

// ---------------------------------------------------------------------------
// 3. Save (atomic)
// ---------------------------------------------------------------------------

/// Atomically save a profile to `<home>/.firma/profiles/<id>.yaml`.
///
/// Validates first, then: serialize → `.yaml.tmp` sibling → `chmod 0600` →
/// `rename`. The `.tmp` is always in the same directory as the target (same
/// filesystem — no EXDEV on macOS). Overwrites an existing profile.
pub fn save_profile_at(home: &Path, profile: &OrganizationConfig) -> Result<(), ProfileError> {
    profile.validate()?;
    profiles_dir_at(home)?; // create dir + 0700 if absent
    let path = profile_path_at(home, &profile.id);
    let tmp_path = path.with_file_name(format!("{}.yaml.tmp", profile.id.0));

    let yaml = serde_yaml::to_string(profile)?;
    std::fs::write(&tmp_path, yaml)?;
    set_file_permissions(&tmp_path)?;
    std::fs::rename(&tmp_path, &path)?;
    Ok(())
}

/// `save_profile_at` convenience wrapper.
pub fn save_profile(profile: &OrganizationConfig) -> Result<(), ProfileError> {
    save_profile_at(&home()?, profile)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn home() -> Result<PathBuf, ProfileError> {
    dirs::home_dir().ok_or(ProfileError::HomeNotFound)
}

#[cfg(unix)]
fn set_dir_permissions(path: &Path) -> Result<(), ProfileError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_dir_permissions(_path: &Path) -> Result<(), ProfileError> {
    Ok(())
}

#[cfg(unix)]
fn set_file_permissions(path: &Path) -> Result<(), ProfileError> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))?;
    Ok(())
}
#[cfg(not(unix))]
fn set_file_permissions(_path: &Path) -> Result<(), ProfileError> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

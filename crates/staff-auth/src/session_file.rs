//! Session persistence as a JSON file.
//!
//! The file lives at a caller-supplied path (see `staff-config`'s
//! `SessionConfig`). On Unix the parent directory is `0700` and the file `0600`.

use std::fs;
use std::path::Path;

use crate::error::AuthError;
use crate::session::Session;

/// Write `session` to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if the directory or file cannot be written.
pub fn store(path: &Path, session: &Session) -> Result<(), AuthError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .map_err(|e| AuthError::SessionStore(format!("mkdir {}: {e}", parent.display())))?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) = fs::set_permissions(parent, fs::Permissions::from_mode(0o700)) {
                tracing::warn!("failed to chmod 0700 {}: {e}", parent.display());
            }
        }
    }

    let json = serde_json::to_string_pretty(session)
        .map_err(|e| AuthError::SessionStore(format!("serialize session: {e}")))?;
    fs::write(path, json)
        .map_err(|e| AuthError::SessionStore(format!("write {}: {e}", path.display())))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))
            .map_err(|e| AuthError::SessionStore(format!("chmod {}: {e}", path.display())))?;
    }

    Ok(())
}

/// Read a persisted session. Missing, empty, or unreadable files load as `None`.
#[must_use]
pub fn load(path: &Path) -> Option<Session> {
    let raw = fs::read_to_string(path)
        .ok()
        .filter(|s| !s.trim().is_empty())?;
    match serde_json::from_str::<Session>(&raw) {
        Ok(session) if !session.access_token.trim().is_empty() => Some(session),
        Ok(_) => None,
        Err(error) => {
            tracing::warn!(%error, path = %path.display(), "ignoring unreadable session file");
            None
        }
    }
}

/// Remove the persisted session, if any.
///
/// # Errors
///
/// Returns `AuthError::SessionStore` if the file exists but cannot be removed.
pub fn delete(path: &Path) -> Result<(), AuthError> {
    if path.exists() {
        fs::remove_file(path)
            .map_err(|e| AuthError::SessionStore(format!("failed to delete {}: {e}", path.display())))?;
    }
    Ok(())
}

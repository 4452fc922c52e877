use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rusqlite::{ffi::ErrorCode, Connection, Error as SqliteError};

use crate::{CoreError, CoreResult};

pub fn resolve_home(home_override: Option<&Path>) -> CoreResult<PathBuf> {
    let candidate = match home_override {
        Some(path) => path.to_path_buf(),
        None => {
            if let Some(override_path) = std::env::var_os("POCKETSAGE_HOME") {
                PathBuf::from(override_path)
            } else if let Some(home_path) = home::home_dir() {
                home_path.join(".pocketsage")
            } else {
                return Err(CoreError::store_init_failed(
                    Path::new("."),
                    "Could not resolve a home directory for store initialization.",
                ));
            }
        }
    };

    absolutize(&candidate)
}

pub fn ensure_home_directory(path: &Path) -> CoreResult<()> {
    fs::create_dir_all(path).map_err(|error| map_io_error(path, &error))?;
    set_private_permissions_best_effort(path);
    Ok(())
}

pub fn store_db_path(home: &Path) -> PathBuf {
    home.join("finance.db")
}

pub fn aliases_path(home: &Path) -> PathBuf {
    home.join("accounts.json")
}

pub fn open_connection(db_path: &Path) -> CoreResult<Connection> {
    let connection =
        Connection::open(db_path).map_err(|error| map_sqlite_error(db_path, &error))?;
    connection
        .busy_timeout(Duration::from_millis(250))
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    connection
        .pragma_update(None, "journal_mode", "WAL")
        .map_err(|error| map_sqlite_error(db_path, &error))?;
    Ok(connection)
}

pub fn map_io_error(path: &Path, error: &std::io::Error) -> CoreError {
    if error.kind() == std::io::ErrorKind::PermissionDenied {
        return CoreError::store_init_permission_denied(path, &error.to_string());
    }

    CoreError::store_init_failed(path, &error.to_string())
}

pub fn map_sqlite_error(path: &Path, error: &SqliteError) -> CoreError {
    let error_code = error.sqlite_error_code();

    if matches!(
        error_code,
        Some(ErrorCode::DatabaseBusy | ErrorCode::DatabaseLocked)
    ) {
        return CoreError::store_locked(path);
    }

    if matches!(error_code, Some(ErrorCode::NotADatabase)) {
        return CoreError::store_corrupt(path);
    }

    if matches!(
        error_code,
        Some(ErrorCode::CannotOpen | ErrorCode::ReadOnly)
    ) {
        return CoreError::store_init_permission_denied(path, &error.to_string());
    }

    CoreError::store_init_failed(path, &error.to_string())
}

fn absolutize(path: &Path) -> CoreResult<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|error| CoreError::store_init_failed(path, &error.to_string()))
}

#[cfg(unix)]
fn set_private_permissions_best_effort(path: &Path) {
    use std::os::unix::fs::PermissionsExt;

    let _ = fs::set_permissions(path, fs::Permissions::from_mode(0o700));
}

#[cfg(not(unix))]
fn set_private_permissions_best_effort(_path: &Path) {}

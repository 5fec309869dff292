//! Whole-file JSON persistence.

use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Serialize, de::DeserializeOwned};

use crate::BatchError;

/// The sibling file a write goes through before it replaces `path`.
#[must_use]
pub fn temp_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}

/// Reads and parses `path`, or returns `None` if it does not exist.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn read_json<T>(path: &Path) -> Result<Option<T>, BatchError>
where
    T: DeserializeOwned,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(BatchError::Read {
                path: path.to_owned(),
                source,
            });
        }
    };
    serde_json::from_str(&text)
        .map(Some)
        .map_err(|source| BatchError::Parse {
            path: path.to_owned(),
            source,
        })
}

/// Writes `value` to `path` as pretty JSON, all or nothing.
///
/// The JSON goes to [`temp_path`] first and is then renamed over `path`, so a
/// crash mid-write leaves the previous contents intact.
///
/// # Errors
///
/// Returns an error if serialization, the write, or the rename fails.
pub fn write_json_atomic<T>(path: &Path, value: &T) -> Result<(), BatchError>
where
    T: Serialize + ?Sized,
{
    let mut json = serde_json::to_string_pretty(value).map_err(|source| BatchError::Serialize {
        path: path.to_owned(),
        source,
    })?;
    json.push('\n');

    let tmp = temp_path(path);
    let write_err = |source| BatchError::Write {
        path: path.to_owned(),
        source,
    };
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(write_err)?;
    }
    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, path).map_err(write_err)
}

/// Removes `path`, ignoring a missing file.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub fn remove_if_exists(path: &Path) -> Result<(), BatchError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(BatchError::Write {
            path: path.to_owned(),
            source,
        }),
    }
}

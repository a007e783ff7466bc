//! Settings persistence: wrap the rendered array in a source-file preamble and
//! hand it to a [`FileWriter`].
//!
//! The writer is the only part that touches the filesystem. [`FsWriter`]
//! writes through a temporary file in the target directory and renames it
//! into place, so readers never observe a half-written settings file.
//! Creates parent directories as needed.

use std::fmt;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::ArrayfigError;
use crate::value::{Properties, Value};

/// Everything before the array expression in a settings file.
pub const PREAMBLE: &str = "<?php\n$settings = ";

/// Permission bits applied when neither the caller nor the store names any.
pub const DEFAULT_WRITE_MODE: u32 = 0o644;

/// Group and key holding the store's own write mode.
const MODE_GROUP: &str = "file";
const MODE_KEY: &str = "write_mode";

/// Wrap a rendered array in the settings-file preamble and terminator.
pub fn document(array_text: &str) -> String {
    format!("{PREAMBLE}{array_text};\n")
}

/// The file-write collaborator. Implementations create or truncate `path`,
/// apply `permissions` (or their own default when `None`), and report failure
/// as an error. The store never retries.
pub trait FileWriter: fmt::Debug {
    fn write_file(
        &self,
        path: &Path,
        contents: &str,
        permissions: Option<u32>,
    ) -> Result<(), ArrayfigError>;
}

/// Atomic filesystem writer.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsWriter;

impl FileWriter for FsWriter {
    fn write_file(
        &self,
        path: &Path,
        contents: &str,
        permissions: Option<u32>,
    ) -> Result<(), ArrayfigError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(dir).map_err(|e| ArrayfigError::IoError {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let io_err = |e: std::io::Error| ArrayfigError::IoError {
            path: path.to_path_buf(),
            source: e,
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
        tmp.write_all(contents.as_bytes()).map_err(io_err)?;
        tmp.as_file().sync_all().map_err(io_err)?;
        set_mode(tmp.as_file(), permissions.unwrap_or(DEFAULT_WRITE_MODE)).map_err(io_err)?;
        tmp.persist(path).map_err(|e| io_err(e.error))?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_mode(file: &std::fs::File, mode: u32) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(std::fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
fn set_mode(_file: &std::fs::File, _mode: u32) -> std::io::Result<()> {
    Ok(())
}

/// Read the store's own `file.write_mode` setting, if present and non-empty.
pub fn write_mode(properties: &Properties) -> Result<Option<u32>, ArrayfigError> {
    let Some(value) = properties
        .get(MODE_GROUP)
        .and_then(Value::as_group)
        .and_then(|g| g.get(MODE_KEY))
    else {
        return Ok(None);
    };
    if value.text_len() == 0 {
        return Ok(None);
    }
    parse_write_mode(value).map(Some)
}

/// Integers are the mode itself; strings are octal (`"0644"`, `"644"`, `"0o644"`).
pub fn parse_write_mode(value: &Value) -> Result<u32, ArrayfigError> {
    let invalid = || ArrayfigError::InvalidWriteMode {
        value: value.to_string(),
    };
    let mode = match value {
        Value::Integer(i) => u32::try_from(*i).ok(),
        Value::String(s) => {
            let s = s.trim();
            let digits = s.strip_prefix("0o").unwrap_or(s);
            u32::from_str_radix(digits, 8).ok()
        }
        _ => None,
    };
    mode.filter(|m| *m <= 0o7777).ok_or_else(invalid)
}

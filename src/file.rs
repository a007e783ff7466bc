//! Default settings-file location.
//!
//! A [`Location`] names a directory; joined with the file name it becomes the
//! path [`PropertyStore::write`](crate::PropertyStore::write) uses when the
//! caller passes none. Resolution happens once, when the store is built.

use std::path::PathBuf;

use crate::error::ArrayfigError;
use crate::types::Location;

/// File name used when the builder is not given one.
pub const DEFAULT_FILE_NAME: &str = "settings.php";

/// Resolve a [`Location`] to a concrete directory.
///
/// `app_name` is used by `Location::Platform` to construct the platform-specific
/// config directory (e.g. `~/.config/{app_name}/` on Linux).
pub fn resolve_location(loc: &Location, app_name: Option<&str>) -> Result<PathBuf, ArrayfigError> {
    match loc {
        Location::Platform => {
            let app_name = app_name.ok_or(ArrayfigError::AppNameRequired)?;
            let proj = directories::ProjectDirs::from("", "", app_name)
                .ok_or(ArrayfigError::NoDefaultPath)?;
            Ok(proj.config_dir().to_path_buf())
        }
        Location::Home(subdir) => {
            let user = directories::UserDirs::new().ok_or(ArrayfigError::NoDefaultPath)?;
            Ok(user.home_dir().join(subdir))
        }
        Location::Cwd => std::env::current_dir().map_err(|e| ArrayfigError::IoError {
            path: PathBuf::from("."),
            source: e,
        }),
        Location::Path(p) => Ok(p.clone()),
    }
}

/// Resolve the full default path: `{location}/{file_name}`.
pub fn default_settings_path(
    loc: &Location,
    file_name: &str,
    app_name: Option<&str>,
) -> Result<PathBuf, ArrayfigError> {
    Ok(resolve_location(loc, app_name)?.join(file_name))
}

use std::path::PathBuf;

use crate::error::ArrayfigError;
use crate::file::{self, DEFAULT_FILE_NAME};
use crate::persist::{FileWriter, FsWriter};
use crate::store::PropertyStore;
use crate::types::Location;

/// Builder for a [`PropertyStore`].
///
/// Controls two things the store cannot change after construction:
///
/// - **Case folding**: [`case_fold()`](Self::case_fold): lowercase every key and group name.
/// - **Default path**: where [`write()`](PropertyStore::write) goes when called
///   without a path. Either explicit via [`default_path()`](Self::default_path),
///   or derived from [`location()`](Self::location) + [`file_name()`](Self::file_name).
#[derive(Debug, Default)]
pub struct StoreBuilder {
    case_fold: bool,
    app_name: Option<String>,
    file_name: Option<String>,
    location: Option<Location>,
    default_path: Option<PathBuf>,
    writer: Option<Box<dyn FileWriter>>,
}

impl StoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lowercase every key and group name on every operation (default: `false`).
    pub fn case_fold(mut self, fold: bool) -> Self {
        self.case_fold = fold;
        self
    }

    /// Set the application name. Used by [`Location::Platform`], and makes
    /// `Platform` the default location when none is set.
    pub fn app_name(mut self, name: &str) -> Self {
        self.app_name = Some(name.to_string());
        self
    }

    /// Override the settings file name (default: `"settings.php"`).
    pub fn file_name(mut self, name: &str) -> Self {
        self.file_name = Some(name.to_string());
        self
    }

    /// Directory holding the default settings file.
    pub fn location(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    /// Explicit default path. Takes precedence over
    /// [`location()`](Self::location) and [`file_name()`](Self::file_name).
    pub fn default_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_path = Some(path.into());
        self
    }

    /// Replace the file-write collaborator (default: [`FsWriter`]).
    pub fn writer(mut self, writer: impl FileWriter + 'static) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Resolve the effective location, if any.
    fn effective_location(&self) -> Option<Location> {
        if let Some(loc) = &self.location {
            return Some(loc.clone());
        }
        self.app_name.as_ref().map(|_| Location::Platform)
    }

    /// Resolve the effective default path. `None` when nothing was configured.
    fn effective_default_path(&self) -> Result<Option<PathBuf>, ArrayfigError> {
        if let Some(path) = &self.default_path {
            return Ok(Some(path.clone()));
        }
        let Some(loc) = self.effective_location() else {
            return Ok(None);
        };
        let file_name = self.file_name.as_deref().unwrap_or(DEFAULT_FILE_NAME);
        file::default_settings_path(&loc, file_name, self.app_name.as_deref()).map(Some)
    }

    pub fn build(self) -> Result<PropertyStore, ArrayfigError> {
        let default_path = self.effective_default_path()?;
        let writer = self.writer.unwrap_or_else(|| Box::new(FsWriter));
        Ok(PropertyStore::from_parts(self.case_fold, default_path, writer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::RecordingWriter;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    #[test]
    fn defaults_have_no_path() {
        let store = StoreBuilder::new().build().unwrap();
        assert!(store.default_path().is_none());
        assert!(!store.is_case_folded());
    }

    #[test]
    fn explicit_default_path() {
        let store = StoreBuilder::new()
            .default_path("/etc/myapp/config.php")
            .build()
            .unwrap();
        assert_eq!(store.default_path(), Some(Path::new("/etc/myapp/config.php")));
    }

    #[test]
    fn location_joins_default_file_name() {
        let store = StoreBuilder::new()
            .location(Location::Path(PathBuf::from("/etc/myapp")))
            .build()
            .unwrap();
        assert_eq!(store.default_path(), Some(Path::new("/etc/myapp/settings.php")));
    }

    #[test]
    fn override_file_name() {
        let store = StoreBuilder::new()
            .location(Location::Path(PathBuf::from("/etc/myapp")))
            .file_name("config.php")
            .build()
            .unwrap();
        assert_eq!(store.default_path(), Some(Path::new("/etc/myapp/config.php")));
    }

    #[test]
    fn explicit_path_beats_location() {
        let store = StoreBuilder::new()
            .location(Location::Path(PathBuf::from("/etc/myapp")))
            .default_path("/srv/settings.php")
            .build()
            .unwrap();
        assert_eq!(store.default_path(), Some(Path::new("/srv/settings.php")));
    }

    #[test]
    fn app_name_implies_platform() {
        let builder = StoreBuilder::new().app_name("myapp");
        assert_eq!(builder.effective_location(), Some(Location::Platform));
    }

    #[test]
    fn platform_without_app_name_fails() {
        let result = StoreBuilder::new().location(Location::Platform).build();
        assert!(matches!(result, Err(ArrayfigError::AppNameRequired)));
    }

    #[test]
    fn case_fold_flag() {
        let store = StoreBuilder::new().case_fold(true).build().unwrap();
        assert!(store.is_case_folded());
    }

    #[test]
    fn custom_writer_receives_writes() {
        let writer = RecordingWriter::default();
        let mut store = StoreBuilder::new()
            .default_path("/srv/settings.php")
            .writer(writer.clone())
            .build()
            .unwrap();
        store.set("debug", true, None);
        store.write(None, None).unwrap();
        assert!(writer.last().unwrap().contents.contains("'debug' => true,"));
    }

    #[test]
    fn end_to_end_write_to_disk() {
        let dir = TempDir::new().unwrap();
        let mut store = StoreBuilder::new()
            .location(Location::Path(dir.path().to_path_buf()))
            .build()
            .unwrap();
        store.set("timezone", "+10:00", Some("region"));
        store.set("write_mode", "0600", Some("file"));
        store.write(None, None).unwrap();

        let content = fs::read_to_string(dir.path().join("settings.php")).unwrap();
        assert_eq!(content, format!("<?php\n$settings = {};\n", store.to_text()));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(dir.path().join("settings.php"))
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[test]
    fn rewriting_unchanged_store_is_byte_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.php");
        let mut store = PropertyStore::new();
        store.set("timezone", "+10:00", Some("region"));
        store.set("name", "it's", Some("site"));

        store.write(Some(&path), None).unwrap();
        let first = fs::read(&path).unwrap();
        store.write(Some(&path), None).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }
}

#[cfg(test)]
pub mod test {
    use serde::Serialize;

    use crate::value::{Properties, Value};

    /// A small store shape: one ungrouped flag, a populated group, the store's
    /// own file group, and an empty group.
    pub fn sample_properties() -> Properties {
        let mut props = Properties::new();
        props.insert("debug".into(), Value::Bool(false));
        props.insert(
            "region".into(),
            [
                ("timezone", Value::from("+10:00")),
                ("locale", Value::Null),
            ]
            .into_iter()
            .collect(),
        );
        props.insert(
            "file".into(),
            [("write_mode", Value::from("0640"))].into_iter().collect(),
        );
        props.insert("cache".into(), Value::Group(Properties::new()));
        props
    }

    // -- Fixtures for serde conversion ------------------------------------------

    #[derive(Serialize, Debug, Clone, PartialEq)]
    pub struct Region {
        pub timezone: String,
        pub country: Option<String>,
    }

    #[derive(Serialize, Debug, Clone, PartialEq)]
    pub struct SiteSettings {
        pub name: String,
        pub max_upload_mb: u32,
        pub region: Region,
        pub mirrors: Vec<String>,
    }

    impl SiteSettings {
        pub fn sample() -> Self {
            SiteSettings {
                name: "Main site's portal".into(),
                max_upload_mb: 64,
                region: Region {
                    timezone: "+10:00".into(),
                    country: None,
                },
                mirrors: vec!["a.example".into(), "b.example".into()],
            }
        }
    }

    // -- Fixture for write tests -------------------------------------------------

    use std::path::{Path, PathBuf};
    use std::sync::{Arc, Mutex};

    use crate::error::ArrayfigError;
    use crate::persist::FileWriter;

    /// One captured `write_file` call.
    #[derive(Debug, Clone, PartialEq)]
    pub struct WriteCall {
        pub path: PathBuf,
        pub contents: String,
        pub permissions: Option<u32>,
    }

    /// Writer that records calls instead of touching the filesystem.
    /// Clones share the same log.
    #[derive(Debug, Clone, Default)]
    pub struct RecordingWriter {
        pub calls: Arc<Mutex<Vec<WriteCall>>>,
        pub fail: bool,
    }

    impl RecordingWriter {
        pub fn failing() -> Self {
            RecordingWriter {
                fail: true,
                ..Default::default()
            }
        }

        pub fn last(&self) -> Option<WriteCall> {
            self.calls.lock().unwrap().last().cloned()
        }
    }

    impl FileWriter for RecordingWriter {
        fn write_file(
            &self,
            path: &Path,
            contents: &str,
            permissions: Option<u32>,
        ) -> Result<(), ArrayfigError> {
            if self.fail {
                return Err(ArrayfigError::IoError {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                });
            }
            self.calls.lock().unwrap().push(WriteCall {
                path: path.to_path_buf(),
                contents: contents.to_string(),
                permissions,
            });
            Ok(())
        }
    }
}

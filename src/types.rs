use std::path::PathBuf;

/// Directory that holds the default settings file.
#[derive(Debug, Clone, PartialEq)]
pub enum Location {
    /// Platform config directory (XDG on Linux, ~/Library/Application Support on macOS).
    Platform,
    /// A subdirectory under the user's home directory, e.g. `Home(".myapp")`.
    Home(&'static str),
    /// Current working directory.
    Cwd,
    /// An explicit directory.
    Path(PathBuf),
}

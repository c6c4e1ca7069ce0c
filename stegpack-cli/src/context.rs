//! Process-wide values computed once at startup

use std::ffi::OsStr;
use std::path::Path;

const DEFAULT_DISPLAY_NAME: &str = "stegpack";

/// Values shared by every command, built once in `main` and passed down
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Name the program reports itself under
    pub display_name: String,
}

impl Context {
    /// Build from an explicit display name
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
        }
    }

    /// Derive the display name from the executable path in `argv[0]`
    pub fn from_env() -> Self {
        let display_name = std::env::args_os()
            .next()
            .as_deref()
            .and_then(|arg0| Path::new(arg0).file_stem())
            .and_then(OsStr::to_str)
            .filter(|stem| !stem.is_empty())
            .unwrap_or(DEFAULT_DISPLAY_NAME)
            .to_string();

        Self { display_name }
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new(DEFAULT_DISPLAY_NAME)
    }
}

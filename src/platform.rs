use std::fmt;

/// Operating system class used to gate `os` blocks in a Desktopfile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OsClass {
    Linux,
    MacOS,
    Windows,
    Other,
}

impl OsClass {
    /// The class of the host this binary was built for
    pub fn current() -> Self {
        if cfg!(target_os = "linux") {
            OsClass::Linux
        } else if cfg!(target_os = "macos") {
            OsClass::MacOS
        } else if cfg!(target_os = "windows") {
            OsClass::Windows
        } else {
            OsClass::Other
        }
    }

    /// The tag a Desktopfile uses to name this class, if any
    pub fn tag(self) -> Option<&'static str> {
        match self {
            OsClass::Linux => Some("linux"),
            OsClass::MacOS => Some("macos"),
            OsClass::Windows => Some("windows"),
            OsClass::Other => None,
        }
    }

    /// Check whether a symbolic tag names this class. Unknown tags never match.
    pub fn matches(self, tag: &str) -> bool {
        self.tag() == Some(tag)
    }
}

impl fmt::Display for OsClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OsClass::Linux => write!(f, "linux"),
            OsClass::MacOS => write!(f, "macos"),
            OsClass::Windows => write!(f, "windows"),
            OsClass::Other => write!(f, "other"),
        }
    }
}

/// Check a tag against the current host
pub fn os_matches(tag: &str) -> bool {
    OsClass::current().matches(tag)
}

use std::path::{Component, Path, PathBuf};

use super::config::{FLAG_PREFIX, LOCAL_PREFIX, RECURSIVE_SUFFIX};

/// Where a specifier points before any filesystem lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// A filesystem path, relative (leading `.`) or absolute.
    Path(PathBuf),
    /// A Go import path located through GOROOT/GOPATH or `go list`.
    Package(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Specifier {
    pub raw: String,
    pub target: Target,
    pub recursive: bool,
}

impl Specifier {
    /// Returns `None` for arguments that look like option flags.
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.starts_with(FLAG_PREFIX) {
            return None;
        }

        let (base, recursive) = split_recursive(raw);
        let target = if base.starts_with(LOCAL_PREFIX) || Path::new(base).is_absolute() {
            Target::Path(PathBuf::from(base))
        } else {
            Target::Package(base.to_string())
        };

        Some(Self {
            raw: raw.to_string(),
            target,
            recursive,
        })
    }
}

pub fn split_recursive(raw: &str) -> (&str, bool) {
    match raw.strip_suffix(RECURSIVE_SUFFIX) {
        Some(base) => (base, true),
        None => (raw, false),
    }
}

/// Lexically joins `path` onto `base` (when relative) and removes `.` and
/// `..` components without touching the filesystem.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    };
    clean_path(&joined)
}

pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// General functions used across the project

use std::path::{Component, Path, PathBuf};

/// Resolve a path against the current directory, the path does not need to exist.
/// `.` and `..` are folded lexically and a trailing slash is dropped, symlinks are not followed.
/// Falls back to the path as given when it cannot be resolved (empty path).
pub fn absolute(path: &Path) -> PathBuf {
    let resolved = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());

    let mut normalized = PathBuf::new();
    for component in resolved.components() {
        match component {
            Component::CurDir => {}
            // popping the root is a no-op, "/.." stays "/"
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_keeps_absolute_paths() {
        assert_eq!(absolute(Path::new("/data/reads")), PathBuf::from("/data/reads"));
    }

    #[test]
    fn absolute_joins_current_directory() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(absolute(Path::new("reads")), cwd.join("reads"));
    }

    #[test]
    fn empty_path_is_returned_as_is() {
        assert_eq!(absolute(Path::new("")), PathBuf::new());
    }

    #[test]
    fn parent_and_current_components_are_folded() {
        assert_eq!(absolute(Path::new("/data/a/../b")), PathBuf::from("/data/b"));
        assert_eq!(absolute(Path::new("/data/./reads/")), PathBuf::from("/data/reads"));
        assert_eq!(absolute(Path::new("/../x/")), PathBuf::from("/x"));

        let cwd = std::env::current_dir().unwrap();
        let parent = cwd.parent().unwrap_or(Path::new("/"));
        assert_eq!(absolute(Path::new("../x/")), parent.join("x"));
        assert_eq!(absolute(Path::new("a/../b")), cwd.join("b"));
    }

    #[test]
    fn trailing_slash_is_dropped() {
        let resolved = absolute(Path::new("/data/reads/"));
        assert_eq!(resolved.to_string_lossy(), "/data/reads");
    }
}

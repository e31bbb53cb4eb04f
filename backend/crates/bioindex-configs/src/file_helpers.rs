use std::path::{Path, PathBuf};

/// Normalize a directory-like path to an absolute path string.
///
/// Relative paths are resolved against the current working directory. Paths
/// that do not exist yet are left syntactically absolute without touching the
/// filesystem.
pub fn normalize_dir_path(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let path = Path::new(trimmed);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    strip_cur_dir(&absolute).to_string_lossy().into_owned()
}

/// Join a child segment onto a base path.
pub fn join_path(base: impl AsRef<Path>, child: &str) -> PathBuf {
    base.as_ref().join(child)
}

fn strip_cur_dir(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, std::path::Component::CurDir))
        .collect()
}

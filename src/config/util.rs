//! Locating `playpen.toml`.

use std::path::{Path, PathBuf};

/// Search the cwd and its ancestors for `config_name`.
///
/// ```text
/// /home/user/demo/sketches/     <- cwd
/// /home/user/demo/playpen.toml  <- found
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_from(&cwd, config_name)
}

/// Nearest `config_name` at or above `start`; an absolute name is only
/// checked for existence.
pub fn find_config_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }
    start
        .ancestors()
        .map(|dir| dir.join(config_name))
        .find(|candidate| candidate.exists())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_find_config_in_ancestor() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("playpen.toml"), "").unwrap();

        let found = find_config_from(&nested, Path::new("playpen.toml")).unwrap();
        assert_eq!(found, dir.path().join("playpen.toml"));
    }

    #[test]
    fn test_find_config_missing() {
        let dir = tempfile::tempdir().unwrap();
        let name = Path::new("no-such-playpen-config-4f1e.toml");
        assert!(find_config_from(dir.path(), name).is_none());
    }

    #[test]
    fn test_find_config_absolute() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        assert!(find_config_from(dir.path(), &path).is_none());
        fs::write(&path, "").unwrap();
        assert_eq!(find_config_from(Path::new("/"), &path), Some(path));
    }
}

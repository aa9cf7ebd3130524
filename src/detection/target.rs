use std::fs;
use std::path::{Path, PathBuf};

/// Applications folder that ships with the OS and is never a valid destination.
pub const PROTECTED_ROOT: &str = "/System/Applications";

/// Pick the Applications folder the user actually uses.
///
/// Candidates are resolved through symlinks, reduced to existing directories,
/// stripped of `protected_root`, then ranked by how many entries they hold.
/// Among equal counts the candidate enumerated last wins.
pub fn resolve_install_directory(candidates: &[PathBuf], protected_root: &Path) -> Option<PathBuf> {
    let protected = fs::canonicalize(protected_root).unwrap_or_else(|_| protected_root.to_path_buf());

    let mut ranked: Vec<(usize, PathBuf)> = Vec::new();
    for candidate in candidates {
        let resolved = match fs::canonicalize(candidate) {
            Ok(p) => p,
            Err(_) => continue,
        };
        if !resolved.is_dir() || resolved == protected || ranked.iter().any(|(_, p)| *p == resolved) {
            continue;
        }
        let count = entry_count(&resolved);
        log::debug!("install candidate {} has {} entries", resolved.display(), count);
        ranked.push((count, resolved));
    }

    // Stable sort keeps enumeration order among ties.
    ranked.sort_by_key(|(count, _)| *count);
    let chosen = ranked.pop().map(|(_, path)| path);
    match &chosen {
        Some(path) => log::info!("Preferred install location: {}", path.display()),
        None => log::warn!("No Applications folder found among {} candidates", candidates.len()),
    }
    chosen
}

fn entry_count(dir: &Path) -> usize {
    fs::read_dir(dir).map(|entries| entries.flatten().count()).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dir_with_entries(root: &Path, name: &str, count: usize) -> PathBuf {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        for i in 0..count {
            fs::create_dir(dir.join(format!("App{}.app", i))).unwrap();
        }
        dir
    }

    #[test]
    fn test_picks_most_populated() {
        let tmp = tempfile::tempdir().unwrap();
        let a = dir_with_entries(tmp.path(), "a", 5);
        let b = dir_with_entries(tmp.path(), "b", 20);
        let c = dir_with_entries(tmp.path(), "c", 3);
        let chosen = resolve_install_directory(&[a, b.clone(), c], Path::new(PROTECTED_ROOT));
        assert_eq!(chosen, Some(fs::canonicalize(b).unwrap()));
    }

    #[test]
    fn test_none_when_nothing_exists() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = vec![tmp.path().join("nope"), tmp.path().join("also-nope")];
        assert_eq!(resolve_install_directory(&missing, Path::new(PROTECTED_ROOT)), None);
        assert_eq!(resolve_install_directory(&[], Path::new(PROTECTED_ROOT)), None);
    }

    #[test]
    fn test_files_are_not_candidates() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("Applications");
        fs::write(&file, b"").unwrap();
        assert_eq!(resolve_install_directory(&[file], Path::new(PROTECTED_ROOT)), None);
    }

    #[test]
    fn test_protected_root_excluded() {
        let tmp = tempfile::tempdir().unwrap();
        let system = dir_with_entries(tmp.path(), "system", 50);
        let local = dir_with_entries(tmp.path(), "local", 2);
        let chosen = resolve_install_directory(&[local.clone(), system.clone()], &system);
        assert_eq!(chosen, Some(fs::canonicalize(local).unwrap()));
    }

    #[test]
    fn test_symlinks_resolved_and_deduplicated() {
        let tmp = tempfile::tempdir().unwrap();
        let real = dir_with_entries(tmp.path(), "real", 4);
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&real, &link).unwrap();
        let other = dir_with_entries(tmp.path(), "other", 4);
        // real and link collapse into one candidate; other ties and is enumerated last.
        let chosen = resolve_install_directory(&[link, real, other.clone()], Path::new(PROTECTED_ROOT));
        assert_eq!(chosen, Some(fs::canonicalize(other).unwrap()));
    }

    #[test]
    fn test_tie_goes_to_last_enumerated() {
        let tmp = tempfile::tempdir().unwrap();
        let user = dir_with_entries(tmp.path(), "user", 3);
        let local = dir_with_entries(tmp.path(), "local", 3);
        let first = resolve_install_directory(&[user.clone(), local.clone()], Path::new(PROTECTED_ROOT));
        assert_eq!(first, Some(fs::canonicalize(&local).unwrap()));
        let swapped = resolve_install_directory(&[local, user.clone()], Path::new(PROTECTED_ROOT));
        assert_eq!(swapped, Some(fs::canonicalize(user).unwrap()));
    }
}

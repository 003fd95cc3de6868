//! Directory traversal for batch operations.

use std::path::{Path, PathBuf};

use crate::tags::ContainerKind;

#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Directory \"{0}\" does not exist")]
    NotFound(String),
    #[error("\"{0}\" is not a directory")]
    NotADirectory(String),
    #[error("Invalid glob pattern \"{pattern}\": {reason}")]
    InvalidGlob { pattern: String, reason: String },
    #[error("{0}")]
    Io(String),
}

/// Collect every supported audio file under `root`, recursing all
/// subdirectories, in lexicographic order of absolute path.
///
/// Files whose extension falls outside the supported set are silently
/// excluded. An optional glob is matched case-insensitively against the
/// filename only.
pub fn find_audio_files(root: &Path, glob_pattern: Option<&str>) -> Result<Vec<PathBuf>, ScanError> {
    if !root.exists() {
        return Err(ScanError::NotFound(root.display().to_string()));
    }
    if !root.is_dir() {
        return Err(ScanError::NotADirectory(root.display().to_string()));
    }
    let root = root
        .canonicalize()
        .map_err(|e| ScanError::Io(format!("Failed to resolve {}: {e}", root.display())))?;

    let glob_matcher = match glob_pattern {
        Some(pattern) => {
            let glob = globset::GlobBuilder::new(pattern)
                .literal_separator(true)
                .case_insensitive(true)
                .build()
                .map_err(|e| ScanError::InvalidGlob {
                    pattern: pattern.to_string(),
                    reason: e.to_string(),
                })?;
            Some(glob.compile_matcher())
        }
        None => None,
    };

    let mut files = Vec::new();
    let mut dirs_to_scan = vec![root];

    while let Some(current_dir) = dirs_to_scan.pop() {
        let entries = std::fs::read_dir(&current_dir)
            .map_err(|e| ScanError::Io(format!("Failed to read {}: {e}", current_dir.display())))?;

        for entry in entries {
            let entry = entry.map_err(|e| ScanError::Io(format!("Directory entry error: {e}")))?;
            let path = entry.path();

            if path.is_dir() {
                dirs_to_scan.push(path);
                continue;
            }
            if !path.is_file() {
                continue;
            }
            if ContainerKind::for_path(&path).is_none() {
                continue;
            }

            if let Some(ref matcher) = glob_matcher {
                let file_name = match path.file_name().and_then(|n| n.to_str()) {
                    Some(n) => n,
                    None => continue,
                };
                if !matcher.is_match(file_name) {
                    continue;
                }
            }

            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"x").unwrap();
    }

    #[test]
    fn finds_supported_files_recursively_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("disc2");
        fs::create_dir(&sub).unwrap();

        touch(&dir.path().join("b.mp3"));
        touch(&dir.path().join("a.flac"));
        touch(&sub.join("c.m4a"));
        touch(&dir.path().join("cover.txt"));
        touch(&dir.path().join("notes.xyz"));

        let files = find_audio_files(dir.path(), None).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.flac", "b.mp3", "c.m4a"]);
        assert!(files.iter().all(|p| p.is_absolute()));
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("LOUD.MP3"));

        let files = find_audio_files(dir.path(), None).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn glob_filters_by_filename() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("keep_01.mp3"));
        touch(&dir.path().join("drop_01.mp3"));

        let files = find_audio_files(dir.path(), Some("keep_*")).unwrap();
        assert_eq!(files.len(), 1);
        assert!(files[0].ends_with("keep_01.mp3"));
    }

    #[test]
    fn invalid_glob_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            find_audio_files(dir.path(), Some("[")),
            Err(ScanError::InvalidGlob { .. })
        ));
    }

    #[test]
    fn missing_root_is_an_error() {
        assert!(matches!(
            find_audio_files(Path::new("/no/such/dir"), None),
            Err(ScanError::NotFound(_))
        ));
    }

    #[test]
    fn file_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("file.mp3");
        touch(&path);
        assert!(matches!(
            find_audio_files(&path, None),
            Err(ScanError::NotADirectory(_))
        ));
    }

    #[test]
    fn empty_directory_yields_empty_list() {
        let dir = tempfile::tempdir().unwrap();
        assert!(find_audio_files(dir.path(), None).unwrap().is_empty());
    }
}

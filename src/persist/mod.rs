//! Writing rendered tuning files to disk
//!
//! The contents go to a temporary file next to the target, which is synced,
//! given mode `0644` on Unix, and renamed over the target. Readers see either
//! the previous file or the new one, never a mix of two writers. Nothing is
//! retried.

use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Default location of the written artifact, relative to the working directory.
pub const DEFAULT_ARTIFACT_PATH: &str = "./tuning_db.cnf";

/// Owner read/write, everyone else read-only.
#[cfg(unix)]
pub const ARTIFACT_MODE: u32 = 0o644;

/// Persistence errors
#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write `contents` to `path`, replacing any existing file in one rename.
pub fn write_artifact(path: &Path, contents: &[u8]) -> Result<(), PersistError> {
    let wrap = |source| PersistError::Write {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut staged = NamedTempFile::new_in(dir).map_err(wrap)?;
    staged.write_all(contents).map_err(wrap)?;

    // Temp files are created 0600
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        staged
            .as_file()
            .set_permissions(std::fs::Permissions::from_mode(ARTIFACT_MODE))
            .map_err(wrap)?;
    }

    staged.as_file().sync_all().map_err(wrap)?;
    staged.persist(path).map_err(|e| wrap(e.error))?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "Config file saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifact_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning_db.cnf");

        write_artifact(&path, b"[mysqld]\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[mysqld]\n");
    }

    #[test]
    fn test_write_artifact_truncates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning_db.cnf");
        std::fs::write(&path, "a much longer previous content").unwrap();

        write_artifact(&path, b"short").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "short");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_artifact_sets_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning_db.cnf");
        std::fs::write(&path, "old").unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o600)).unwrap();

        write_artifact(&path, b"new").unwrap();

        let mode = std::fs::metadata(&path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn test_write_artifact_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("tuning_db.cnf");

        let result = write_artifact(&path, b"x");
        assert!(matches!(result, Err(PersistError::Write { .. })));
    }

    #[test]
    fn test_write_artifact_directory_target_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = write_artifact(dir.path(), b"x");
        assert!(result.is_err());
    }

    #[test]
    fn test_write_artifact_leaves_no_staging_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning_db.cnf");

        write_artifact(&path, b"first").unwrap();
        write_artifact(&path, b"second").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("tuning_db.cnf")]);
    }

    #[test]
    fn test_write_artifact_parallel_writers_never_mix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tuning_db.cnf");
        let short = "short\n".repeat(4);
        let long = "a much longer line of content\n".repeat(64);

        for _ in 0..50 {
            std::thread::scope(|scope| {
                scope.spawn(|| write_artifact(&path, short.as_bytes()).unwrap());
                scope.spawn(|| write_artifact(&path, long.as_bytes()).unwrap());
            });

            let written = std::fs::read_to_string(&path).unwrap();
            assert!(written == short || written == long);
        }
    }
}

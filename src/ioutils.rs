use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ensures the output directory is missing or empty, creating it when needed.
///
/// A directory that already holds files belongs to someone else, so it is
/// never written into.
pub fn prepare_output_dir<P: AsRef<Path>>(output_dir: P, dry_run: bool) -> Result<PathBuf> {
    let output_dir = output_dir.as_ref();
    if output_dir.exists() {
        let occupied = !output_dir.is_dir() || std::fs::read_dir(output_dir)?.next().is_some();
        if occupied {
            return Err(Error::OutputDirectoryNotEmpty {
                output_dir: output_dir.display().to_string(),
            });
        }
    } else if !dry_run {
        std::fs::create_dir_all(output_dir).map_err(|source| Error::WriteFailure {
            path: output_dir.display().to_string(),
            source,
        })?;
    }
    Ok(output_dir.to_path_buf())
}

pub fn read_from(mut reader: impl std::io::Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf).map_err(Error::IoError)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("app");
        let prepared = prepare_output_dir(&target, false).unwrap();
        assert_eq!(prepared, target);
        assert!(target.is_dir());
    }

    #[test]
    fn dry_run_does_not_create_directory() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("app");
        prepare_output_dir(&target, true).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn empty_directory_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        assert!(prepare_output_dir(dir.path(), false).is_ok());
    }

    #[test]
    fn non_empty_directory_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), "mine").unwrap();
        let err = prepare_output_dir(dir.path(), false).unwrap_err();
        assert!(matches!(err, Error::OutputDirectoryNotEmpty { .. }));
    }

    #[test]
    fn read_from_reads_everything() {
        let text = read_from(&b"{\"name\":\"demo\"}"[..]).unwrap();
        assert_eq!(text, "{\"name\":\"demo\"}");
    }
}

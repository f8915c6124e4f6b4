//! The only place generated files touch the disk.

mod operation;

pub use operation::WriteOperation;

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};
use crate::fileset::GeneratedFileSet;

/// File names that are written with the executable bit set.
const EXECUTABLE_NAMES: &[&str] = &["manage.py"];

/// Writes a [`GeneratedFileSet`] below a root directory.
pub struct FileWriter {
    root: PathBuf,
    dry_run: bool,
}

impl FileWriter {
    pub fn new<P: AsRef<Path>>(root: P, dry_run: bool) -> Self {
        Self { root: root.as_ref().to_path_buf(), dry_run }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turns `files` into the ordered operations that would write them.
    ///
    /// Every parent directory is created once, before the first file below it.
    pub fn plan(&self, files: &GeneratedFileSet) -> Result<Vec<WriteOperation>> {
        let mut created: BTreeSet<PathBuf> = BTreeSet::new();
        let mut operations = Vec::with_capacity(files.len());

        for (path, content) in files.iter() {
            let relative = checked_relative(path)?;
            let mut parents: Vec<&Path> =
                relative.ancestors().skip(1).filter(|dir| !dir.as_os_str().is_empty()).collect();
            parents.reverse();
            for dir in parents {
                let target = self.root.join(dir);
                if created.insert(target.clone()) {
                    let target_exists = target.is_dir();
                    operations.push(WriteOperation::CreateDirectory { target, target_exists });
                }
            }
            operations.push(WriteOperation::Write {
                target: self.root.join(relative),
                content: content.to_string(),
                executable: is_executable(relative),
            });
        }
        Ok(operations)
    }

    /// Writes every file in `files`, returning the written paths.
    ///
    /// In dry-run mode the operations are only logged.
    pub fn write_all(&self, files: &GeneratedFileSet) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for operation in self.plan(files)? {
            log::info!("{}", operation.get_message(self.dry_run));
            if self.dry_run {
                continue;
            }
            self.apply(&operation)?;
            if let WriteOperation::Write { target, .. } = operation {
                written.push(target);
            }
        }
        Ok(written)
    }

    fn apply(&self, operation: &WriteOperation) -> Result<()> {
        let target = operation.target_path();
        let failure = |source: std::io::Error| Error::WriteFailure {
            path: target.display().to_string(),
            source,
        };
        match operation {
            WriteOperation::CreateDirectory { target_exists: true, .. } => Ok(()),
            WriteOperation::CreateDirectory { target, .. } => {
                std::fs::create_dir_all(target).map_err(failure)
            }
            WriteOperation::Write { target, content, executable } => {
                std::fs::write(target, content).map_err(failure)?;
                if *executable {
                    set_executable(target).map_err(failure)?;
                }
                Ok(())
            }
        }
    }
}

/// Validates a generated path and returns it as a relative [`Path`].
fn checked_relative(path: &str) -> Result<&Path> {
    let relative = Path::new(path);
    let escapes = relative
        .components()
        .any(|component| !matches!(component, Component::Normal(_) | Component::CurDir));
    if path.is_empty() || escapes {
        return Err(Error::WriteFailure {
            path: path.to_string(),
            source: std::io::Error::new(
                ErrorKind::InvalidInput,
                "generated paths must stay inside the project directory",
            ),
        });
    }
    Ok(relative)
}

fn is_executable(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "sh")
        || path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| EXECUTABLE_NAMES.contains(&name))
}

#[cfg(unix)]
fn set_executable(path: &Path) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = std::fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    std::fs::set_permissions(path, permissions)
}

#[cfg(not(unix))]
fn set_executable(_path: &Path) -> std::io::Result<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn files(entries: &[(&str, &str)]) -> GeneratedFileSet {
        entries.iter().copied().collect()
    }

    #[test]
    fn writes_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path(), false);
        let written = writer
            .write_all(&files(&[("package.json", "{}\n"), ("server/src/server.ts", "// api\n")]))
            .unwrap();
        assert_eq!(written.len(), 2);
        assert_eq!(
            std::fs::read_to_string(dir.path().join("server/src/server.ts")).unwrap(),
            "// api\n"
        );
    }

    #[test]
    fn dry_run_touches_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let writer = FileWriter::new(dir.path(), true);
        let written = writer.write_all(&files(&[("src/main.ts", "")])).unwrap();
        assert!(written.is_empty());
        assert!(!dir.path().join("src").exists());
    }

    #[test]
    fn parents_are_planned_once_and_first() {
        let writer = FileWriter::new("/out", true);
        let plan = writer
            .plan(&files(&[("server/app/main.py", ""), ("server/app/core/config.py", "")]))
            .unwrap();
        let messages: Vec<_> = plan.iter().map(|op| op.get_message(false)).collect();
        assert_eq!(
            messages,
            vec![
                "Creating directory '/out/server'",
                "Creating directory '/out/server/app'",
                "Writing to '/out/server/app/main.py'",
                "Creating directory '/out/server/app/core'",
                "Writing to '/out/server/app/core/config.py'",
            ]
        );
    }

    #[test]
    fn escaping_paths_are_rejected() {
        let writer = FileWriter::new("/out", true);
        for path in ["../etc/passwd", "/etc/passwd", "server/../../x", ""] {
            let err = writer.plan(&files(&[(path, "")])).unwrap_err();
            assert!(matches!(err, Error::WriteFailure { .. }), "{path} was accepted");
        }
    }

    #[cfg(unix)]
    #[test]
    fn scripts_are_executable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        FileWriter::new(dir.path(), false)
            .write_all(&files(&[("server/start_server.sh", "#!/bin/sh\n"), ("server/main.py", "")]))
            .unwrap();
        let mode = |p: &str| std::fs::metadata(dir.path().join(p)).unwrap().permissions().mode();
        assert_ne!(mode("server/start_server.sh") & 0o111, 0);
        assert_eq!(mode("server/main.py") & 0o111, 0);
    }

    #[test]
    fn unwritable_target_is_a_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("server"), "not a directory").unwrap();
        let err = FileWriter::new(dir.path(), false)
            .write_all(&files(&[("server/main.py", "")]))
            .unwrap_err();
        assert!(matches!(err, Error::WriteFailure { .. }));
    }
}

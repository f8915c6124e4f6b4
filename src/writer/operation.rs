use std::path::PathBuf;

/// A single filesystem step of writing a generated project.
#[derive(Debug)]
pub enum WriteOperation {
    CreateDirectory { target: PathBuf, target_exists: bool },
    Write { target: PathBuf, content: String, executable: bool },
}

impl WriteOperation {
    pub fn target_path(&self) -> &PathBuf {
        match self {
            WriteOperation::CreateDirectory { target, .. } => target,
            WriteOperation::Write { target, .. } => target,
        }
    }

    /// Gets a message describing the operation.
    ///
    /// # Arguments
    /// * `dry_run` - Whether this is a dry run (no actual file operations)
    pub fn get_message(&self, dry_run: bool) -> String {
        let prefix = if dry_run { "[DRY RUN] " } else { "" };

        match self {
            WriteOperation::CreateDirectory { target, target_exists } => {
                if *target_exists {
                    format!(
                        "{}Skipping directory creation '{}' (already exists)",
                        prefix,
                        target.display()
                    )
                } else {
                    format!("{}Creating directory '{}'", prefix, target.display())
                }
            }
            WriteOperation::Write { target, executable, .. } => {
                if *executable {
                    format!("{}Writing executable '{}'", prefix, target.display())
                } else {
                    format!("{}Writing to '{}'", prefix, target.display())
                }
            }
        }
    }
}

#![allow(dead_code)]

use log::debug;
use stackforge::cli::runner::Runner;
use stackforge::cli::Args;
use stackforge::installer::{CommandOutput, CommandRunner};
use stackforge::prompt::DefaultsPrompter;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Command runner that succeeds without running anything.
pub struct NoopRunner;

impl CommandRunner for NoopRunner {
    fn run(&self, command: &str, cwd: &Path) -> stackforge::error::Result<CommandOutput> {
        debug!("Skipping '{command}' in '{}'", cwd.display());
        Ok(CommandOutput { exit_code: 0, stdout: String::new(), stderr: String::new() })
    }
}

/// Generates a project from `answers` into `output_dir` without prompting.
pub fn generate(output_dir: &Path, answers: &str) -> PathBuf {
    let args = Args {
        name: None,
        output_dir: Some(output_dir.to_path_buf()),
        verbose: 0,
        answers: Some(answers.to_string()),
        answers_file: None,
        quick: false,
        non_interactive: true,
        dry_run: false,
        skip_install: true,
    };
    Runner::new(args)
        .run_with(&DefaultsPrompter, NoopRunner)
        .unwrap()
        .expect("generation was not cancelled")
}

/// Relative paths of every file below `root`, sorted.
pub fn list_files(root: &Path) -> BTreeSet<String> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_string_lossy().replace('\\', "/"))
        .collect()
}

pub fn read(root: &Path, path: &str) -> String {
    fs::read_to_string(root.join(path)).unwrap_or_else(|e| panic!("cannot read {path}: {e}"))
}

/// Prints files present in only one of the two trees, and the differing ones.
pub fn print_dir_diff(dir1: &Path, dir2: &Path) {
    let files1 = list_files(dir1);
    let files2 = list_files(dir2);

    println!("\n=== Directory Comparison ===");
    for file in files1.difference(&files2) {
        println!("  + {file}");
    }
    for file in files2.difference(&files1) {
        println!("  - {file}");
    }
    for file in files1.intersection(&files2) {
        if read(dir1, file) != read(dir2, file) {
            println!("  ~ {file}");
        }
    }
}

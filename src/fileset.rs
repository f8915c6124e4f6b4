use indexmap::IndexMap;

use crate::constants::MERGEABLE_PATHS;
use crate::envfile::{parse_env, union_lines, EnvMerger};

/// Returns true for output paths that accumulate contributions from several generators.
pub fn is_mergeable(path: &str) -> bool {
    MERGEABLE_PATHS.contains(&path)
}

/// Mapping from relative output path to file content.
///
/// Paths always use `/` as separator and are relative to the project root.
/// Insertion order is preserved so that writes and listings are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedFileSet {
    files: IndexMap<String, String>,
}

impl GeneratedFileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a file, returning the previous content if any.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<String> {
        self.files.insert(path.into(), content.into())
    }

    pub fn get(&self, path: &str) -> Option<&str> {
        self.files.get(path).map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(path, content)| (path.as_str(), content.as_str()))
    }

    /// Layers `other` on top of this set.
    ///
    /// Ordinary paths are overwritten. Env files are merged key by key through
    /// the [`EnvMerger`] and ignore files are merged as a union of lines.
    pub fn layer(&mut self, other: GeneratedFileSet, merger: &EnvMerger) {
        for (path, incoming) in other.files {
            let merged = match self.files.get(&path) {
                Some(existing) if is_mergeable(&path) => {
                    log::debug!("Merging contribution into '{path}'");
                    if path.ends_with(".gitignore") {
                        union_lines(existing, &incoming)
                    } else {
                        merger.merge(existing, &parse_env(&incoming))
                    }
                }
                Some(_) => {
                    log::debug!("Overwriting '{path}' with a later contribution");
                    incoming
                }
                None => incoming,
            };
            self.files.insert(path, merged);
        }
    }
}

impl IntoIterator for GeneratedFileSet {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.into_iter()
    }
}

impl<P: Into<String>, C: Into<String>> FromIterator<(P, C)> for GeneratedFileSet {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut set = GeneratedFileSet::new();
        for (path, content) in iter {
            set.insert(path, content);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::ENV_MARKER;

    #[test]
    fn ordinary_paths_are_last_writer_wins() {
        let mut base: GeneratedFileSet = [("README.md", "one")].into_iter().collect();
        base.layer([("README.md", "two")].into_iter().collect(), &EnvMerger::new());
        assert_eq!(base.get("README.md"), Some("two"));
    }

    #[test]
    fn env_files_are_merged_not_replaced() {
        let mut base: GeneratedFileSet =
            [(".env", "NODE_ENV=development\nPORT=5000\n")].into_iter().collect();
        base.layer(
            [(".env", "DATABASE_URL=sqlite:./data/database.sqlite\n")].into_iter().collect(),
            &EnvMerger::new(),
        );
        assert_eq!(
            base.get(".env"),
            Some(
                format!(
                    "NODE_ENV=development\nPORT=5000\n{ENV_MARKER}\nDATABASE_URL=sqlite:./data/database.sqlite\n"
                )
                .as_str()
            )
        );
    }

    #[test]
    fn nested_gitignore_is_not_mergeable() {
        assert!(is_mergeable(".gitignore"));
        assert!(!is_mergeable("server/.gitignore"));

        let mut base: GeneratedFileSet =
            [("server/.gitignore", "a\n")].into_iter().collect();
        base.layer([("server/.gitignore", "b\n")].into_iter().collect(), &EnvMerger::new());
        assert_eq!(base.get("server/.gitignore"), Some("b\n"));
    }

    #[test]
    fn first_contribution_to_mergeable_path_is_kept_verbatim() {
        let mut base = GeneratedFileSet::new();
        base.layer([(".gitignore", "node_modules/\n")].into_iter().collect(), &EnvMerger::new());
        assert_eq!(base.get(".gitignore"), Some("node_modules/\n"));
    }
}

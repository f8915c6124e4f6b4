//! Idempotent merging of `KEY=VALUE` environment files.
//!
//! Several generators contribute variables to the same `.env` file. The
//! [`EnvMerger`] folds a batch of contributions into existing text: matching
//! keys are rewritten in place, new keys land directly below a single marker
//! comment, and every other line (comments, user entries, malformed lines) is
//! left where it was.

use indexmap::IndexMap;
use std::collections::HashSet;
use std::fmt::Display;

use crate::constants::{ENV_ANCHOR_KEYS, ENV_MARKER};

/// A single `KEY=VALUE` contribution; the key is its identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVariable {
    pub key: String,
    pub value: String,
}

impl EnvVariable {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self { key: key.into(), value: value.into() }
    }
}

impl Display for EnvVariable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// Something the merge could not place and reported instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeConflict {
    /// An existing line that is neither blank, a comment nor `KEY=VALUE`.
    MalformedLine {
        /// 1-based line number in the existing text.
        line_number: usize,
        line: String,
    },
    /// A contribution whose key is not a valid variable name; it is dropped.
    InvalidKey { key: String },
}

impl Display for MergeConflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MergeConflict::MalformedLine { line_number, line } => write!(
                f,
                "line {line_number} is not a KEY=VALUE entry and was left untouched: '{line}'"
            ),
            MergeConflict::InvalidKey { key } => {
                write!(f, "contribution '{key}' is not a valid variable name and was skipped")
            }
        }
    }
}

#[derive(Debug, PartialEq)]
enum Line<'a> {
    Blank,
    Comment,
    Pair { key: &'a str },
    Malformed,
}

fn is_valid_key(key: &str) -> bool {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with('#') {
        return Line::Comment;
    }
    match trimmed.split_once('=') {
        Some((key, _)) if is_valid_key(key) => Line::Pair { key },
        _ => Line::Malformed,
    }
}

/// Extracts the `KEY=VALUE` entries of an env text, in order of appearance.
pub fn parse_env(text: &str) -> Vec<EnvVariable> {
    text.lines()
        .filter_map(|line| match classify(line) {
            Line::Pair { key } => {
                let value = line.trim().split_once('=').map(|(_, v)| v).unwrap_or_default();
                Some(EnvVariable::new(key, value))
            }
            _ => None,
        })
        .collect()
}

/// Merge engine for env files.
#[derive(Debug, Clone)]
pub struct EnvMerger {
    marker: String,
    anchors: Vec<String>,
}

impl Default for EnvMerger {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvMerger {
    pub fn new() -> Self {
        Self::with_marker(ENV_MARKER, ENV_ANCHOR_KEYS)
    }

    pub fn with_marker(marker: &str, anchors: &[&str]) -> Self {
        Self {
            marker: marker.to_string(),
            anchors: anchors.iter().map(|anchor| anchor.to_string()).collect(),
        }
    }

    /// Merges `contributions` into `existing`, logging every conflict.
    pub fn merge(&self, existing: &str, contributions: &[EnvVariable]) -> String {
        let (text, conflicts) = self.merge_with_conflicts(existing, contributions);
        for conflict in &conflicts {
            log::warn!("Env merge: {conflict}");
        }
        text
    }

    /// Same as [`EnvMerger::merge`], returning the conflicts instead of logging them.
    pub fn merge_with_conflicts(
        &self,
        existing: &str,
        contributions: &[EnvVariable],
    ) -> (String, Vec<MergeConflict>) {
        let mut conflicts = Vec::new();

        // First occurrence of a key wins among the contributions. Keys the
        // classifier would not read back as a pair are never written.
        let mut pending: IndexMap<&str, &str> = IndexMap::new();
        for variable in contributions {
            if !is_valid_key(&variable.key) {
                conflicts.push(MergeConflict::InvalidKey { key: variable.key.clone() });
                continue;
            }
            pending.entry(variable.key.as_str()).or_insert(variable.value.as_str());
        }

        let mut lines: Vec<String> = Vec::new();
        let mut handled: HashSet<&str> = HashSet::new();
        let mut marker_seen = false;

        for (index, line) in existing.lines().enumerate() {
            match classify(line) {
                Line::Pair { key } => match pending.get_key_value(key) {
                    Some((&key, &value)) => {
                        lines.push(format!("{key}={value}"));
                        handled.insert(key);
                    }
                    None => lines.push(line.to_string()),
                },
                Line::Comment if line.trim() == self.marker => {
                    if !marker_seen {
                        lines.push(self.marker.clone());
                        marker_seen = true;
                    }
                }
                Line::Malformed => {
                    conflicts.push(MergeConflict::MalformedLine {
                        line_number: index + 1,
                        line: line.to_string(),
                    });
                    lines.push(line.to_string());
                }
                Line::Blank | Line::Comment => lines.push(line.to_string()),
            }
        }

        if !marker_seen {
            self.insert_marker(&mut lines);
        }

        let marker_index = lines.iter().position(|line| line.trim() == self.marker);
        let additions: Vec<String> = pending
            .iter()
            .filter(|(key, _)| !handled.contains(*key))
            .map(|(key, value)| format!("{key}={value}"))
            .collect();
        match marker_index {
            Some(index) => {
                lines.splice(index + 1..index + 1, additions);
            }
            None => lines.extend(additions),
        }

        (normalize(&lines), conflicts)
    }

    /// Places the marker after the last anchor key, or at the end of the file.
    fn insert_marker(&self, lines: &mut Vec<String>) {
        let anchor = lines.iter().rposition(|line| match classify(line) {
            Line::Pair { key } => self.anchors.iter().any(|anchor| anchor == key),
            _ => false,
        });

        match anchor {
            Some(index) => lines.insert(index + 1, self.marker.clone()),
            None => {
                if lines.last().is_some_and(|line| !line.trim().is_empty()) {
                    lines.push(String::new());
                }
                lines.push(self.marker.clone());
            }
        }
    }
}

/// Trims trailing whitespace, collapses blank runs and ends with one newline.
fn normalize(lines: &[String]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.trim_end();
        let previous_blank = out.last().map(|prev| prev.is_empty());
        if line.is_empty() && previous_blank.unwrap_or(true) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|line| line.is_empty()) {
        out.pop();
    }

    if out.is_empty() {
        return "\n".to_string();
    }
    let mut text = out.join("\n");
    text.push('\n');
    text
}

/// Line-union merge used for ignore files: incoming lines already present are dropped.
pub fn union_lines(existing: &str, incoming: &str) -> String {
    let known: HashSet<&str> = existing
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let mut lines: Vec<String> = existing.lines().map(str::to_string).collect();
    lines.push(String::new());
    for line in incoming.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || !known.contains(trimmed) {
            lines.push(line.to_string());
        }
    }

    // A comment header whose entries were all known is dropped along with them.
    let mut cleaned: Vec<String> = Vec::with_capacity(lines.len());
    for (index, line) in lines.iter().enumerate() {
        let is_orphan_header = line.trim_start().starts_with('#')
            && !known.contains(line.trim())
            && index >= existing.lines().count()
            && lines.get(index + 1).map_or(true, |next| next.trim().is_empty());
        if !is_orphan_header {
            cleaned.push(line.clone());
        }
    }
    normalize(&cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<EnvVariable> {
        pairs.iter().map(|(k, v)| EnvVariable::new(*k, *v)).collect()
    }

    #[test]
    fn inserts_marker_after_last_anchor_key() {
        let existing = "NODE_ENV=development\nPORT=5000\nAPI_KEY=abc\n";
        let merged = EnvMerger::new().merge(existing, &vars(&[("DATABASE_URL", "x")]));
        assert_eq!(
            merged,
            format!("NODE_ENV=development\nPORT=5000\n{ENV_MARKER}\nDATABASE_URL=x\nAPI_KEY=abc\n")
        );
    }

    #[test]
    fn replaces_existing_keys_in_place() {
        let existing = "# app\nREDIS_URL=redis://old\nNODE_ENV=development\n";
        let merged =
            EnvMerger::new().merge(existing, &vars(&[("REDIS_URL", "redis://localhost:6379/0")]));
        assert_eq!(
            merged,
            format!("# app\nREDIS_URL=redis://localhost:6379/0\nNODE_ENV=development\n{ENV_MARKER}\n")
        );
    }

    #[test]
    fn appends_marker_when_no_anchor_present() {
        let merged = EnvMerger::new().merge("# user settings\nFOO=1", &vars(&[("BAR", "2")]));
        assert_eq!(merged, format!("# user settings\nFOO=1\n\n{ENV_MARKER}\nBAR=2\n"));
    }

    #[test]
    fn empty_input_gets_marker_and_contributions() {
        let merged = EnvMerger::new().merge("", &vars(&[("A", "1"), ("B", "2")]));
        assert_eq!(merged, format!("{ENV_MARKER}\nA=1\nB=2\n"));
    }

    #[test]
    fn first_contribution_wins_among_duplicates() {
        let merged = EnvMerger::new().merge("", &vars(&[("A", "1"), ("A", "2")]));
        assert_eq!(merged, format!("{ENV_MARKER}\nA=1\n"));
    }

    #[test]
    fn duplicate_markers_are_collapsed() {
        let existing = format!("PORT=1\n{ENV_MARKER}\nA=1\n{ENV_MARKER}\nB=2\n");
        let merged = EnvMerger::new().merge(&existing, &[]);
        assert_eq!(merged, format!("PORT=1\n{ENV_MARKER}\nA=1\nB=2\n"));
    }

    #[test]
    fn collapses_blank_runs_and_trailing_whitespace() {
        let existing = "\n\nNODE_ENV=development   \n\n\n\n# tail\n\n\n";
        let merged = EnvMerger::new().merge(existing, &[]);
        assert_eq!(merged, format!("NODE_ENV=development\n{ENV_MARKER}\n\n# tail\n"));
    }

    #[test]
    fn malformed_lines_are_kept_and_reported() {
        let existing = "NODE_ENV=development\nthis is not valid\n1BAD=oops\n";
        let (merged, conflicts) = EnvMerger::new()
            .merge_with_conflicts(existing, &vars(&[("DATABASE_URL", "sqlite:x")]));
        assert!(merged.contains("this is not valid\n"));
        assert!(merged.contains("1BAD=oops\n"));
        assert!(merged.contains("DATABASE_URL=sqlite:x\n"));
        assert_eq!(
            conflicts,
            vec![
                MergeConflict::MalformedLine { line_number: 2, line: "this is not valid".into() },
                MergeConflict::MalformedLine { line_number: 3, line: "1BAD=oops".into() },
            ]
        );
    }

    #[test]
    fn invalid_contribution_keys_are_skipped_and_reported() {
        let merger = EnvMerger::new();
        let contributions = vars(&[("my-key", "1"), ("DB_NAME", "shop")]);
        let (once, conflicts) = merger.merge_with_conflicts("PORT=5000\n", &contributions);
        assert_eq!(once, format!("PORT=5000\n{ENV_MARKER}\nDB_NAME=shop\n"));
        assert_eq!(conflicts, vec![MergeConflict::InvalidKey { key: "my-key".into() }]);

        let twice = merger.merge(&once, &contributions);
        assert_eq!(once, twice);
    }

    #[test]
    fn merge_is_idempotent() {
        let merger = EnvMerger::new();
        let contributions = vars(&[
            ("DB_HOST", "localhost"),
            ("DB_PORT", "5432"),
            ("DATABASE_URL", "postgresql://${DB_USER}@${DB_HOST}"),
        ]);
        let samples = [
            "",
            "NODE_ENV=development\nPORT=5000\n",
            "# comment only",
            "garbage line\n\n\nPYTHON_PORT=8000\nFLASK_APP=server/main.py\n",
            "DB_PORT=1\n\n\nKEEP=me   \n",
        ];
        for sample in samples {
            let once = merger.merge(sample, &contributions);
            let twice = merger.merge(&once, &contributions);
            assert_eq!(once, twice, "merge not idempotent for {sample:?}");
        }
    }

    #[test]
    fn parse_env_skips_comments_and_malformed_lines() {
        let parsed = parse_env("# c\nA=1\nnot a pair\nB=x=y\n");
        assert_eq!(parsed, vars(&[("A", "1"), ("B", "x=y")]));
    }

    #[test]
    fn union_lines_appends_only_unknown_entries() {
        let existing = "# deps\nnode_modules/\n.env\n";
        let incoming = "# sqlite\ndata/*.sqlite\n.env\n";
        let merged = union_lines(existing, incoming);
        assert_eq!(merged, "# deps\nnode_modules/\n.env\n\n# sqlite\ndata/*.sqlite\n");
        assert_eq!(union_lines(&merged, incoming), merged);
    }
}

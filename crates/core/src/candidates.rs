//! Candidate set construction.
//!
//! The candidate set is everything the helper is asked to warm: the caller's
//! files in their original order, followed by speculative sidecar files
//! derived from them. Sidecars are never checked for existence; a failed
//! remote lookup is cheaper than a stat round-trip per file.

use crate::config::SidecarRule;

/// Ordered list of files handed to the prefetch helper.
///
/// Duplicates are kept as-is; the helper tolerates redundant and
/// nonexistent entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CandidateSet {
    files: Vec<String>,
}

impl CandidateSet {
    /// Number of entries, originals and derived.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn into_files(self) -> Vec<String> {
        self.files
    }

    /// Newline-joined UTF-8 payload, without a trailing newline.
    pub fn encode(&self) -> Vec<u8> {
        self.files.join("\n").into_bytes()
    }
}

/// Builds the candidate set for `file_names` under the given sidecar rules.
///
/// Derived entries are appended after every original, grouped per rule in
/// rule order, each group following the order of the originals.
pub fn build_candidate_set<S: AsRef<str>>(
    file_names: &[S],
    rules: &[SidecarRule],
) -> CandidateSet {
    let mut files: Vec<String> = file_names
        .iter()
        .map(|f| f.as_ref().to_string())
        .collect();

    for rule in rules {
        let derived: Vec<String> = file_names
            .iter()
            .filter_map(|f| rule.companion_of(f.as_ref()))
            .collect();
        files.extend(derived);
    }

    CandidateSet { files }
}

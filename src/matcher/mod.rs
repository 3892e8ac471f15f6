//! Reference digest matching.
//!
//! Comparison trims surrounding whitespace from the reference and ignores
//! ASCII case. It never touches a running session, so it is cheap enough to
//! call on every edit of the reference string.

use std::collections::BTreeMap;

use crate::algorithm::Algorithm;
use crate::digest::DigestResult;

/// How a reference string relates to one computed digest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchStatus {
    /// The reference equals this digest.
    Match,
    /// The reference differs from this digest.
    NoMatch,
    /// The reference is blank, or this digest is pending or failed.
    NotApplicable,
}

/// Compares `reference` against every entry of `results`.
///
/// # Example
///
/// ```
/// use digestrs::{compare_reference, compute_for_text, Algorithm, AlgorithmSet, MatchStatus};
///
/// let results = compute_for_text(b"", AlgorithmSet::from([Algorithm::Md5, Algorithm::Sha1]))?;
/// let statuses = compare_reference(" D41D8CD98F00B204E9800998ECF8427E ", &results);
///
/// assert_eq!(statuses[&Algorithm::Md5], MatchStatus::Match);
/// assert_eq!(statuses[&Algorithm::Sha1], MatchStatus::NoMatch);
/// # Ok::<(), digestrs::DigestError>(())
/// ```
pub fn compare_reference(
    reference: &str,
    results: &DigestResult,
) -> BTreeMap<Algorithm, MatchStatus> {
    let reference = reference.trim();

    results
        .iter()
        .map(|(algorithm, entry)| {
            let status = match entry.hex() {
                _ if reference.is_empty() => MatchStatus::NotApplicable,
                None => MatchStatus::NotApplicable,
                Some(hex) if hex.eq_ignore_ascii_case(reference) => MatchStatus::Match,
                Some(_) => MatchStatus::NoMatch,
            };
            (algorithm, status)
        })
        .collect()
}

/// Returns the first algorithm (in canonical order) whose digest matches.
pub fn find_match(reference: &str, results: &DigestResult) -> Option<Algorithm> {
    compare_reference(reference, results)
        .into_iter()
        .find(|(_, status)| *status == MatchStatus::Match)
        .map(|(algorithm, _)| algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::AlgorithmSet;
    use crate::digest::DigestSet;

    const EMPTY_MD5: &str = "d41d8cd98f00b204e9800998ecf8427e";

    fn empty_results() -> DigestResult {
        DigestSet::digest(b"", AlgorithmSet::all()).unwrap()
    }

    #[test]
    fn test_trimmed_uppercase_reference_matches() {
        let statuses = compare_reference(" D41D8CD98F00B204E9800998ECF8427E ", &empty_results());

        for (algorithm, status) in statuses {
            if algorithm == Algorithm::Md5 {
                assert_eq!(status, MatchStatus::Match);
            } else {
                assert_eq!(status, MatchStatus::NoMatch, "{algorithm}");
            }
        }
    }

    #[test]
    fn test_blank_reference_not_applicable() {
        for reference in ["", "   ", "\t\n"] {
            let statuses = compare_reference(reference, &empty_results());
            assert!(statuses.values().all(|s| *s == MatchStatus::NotApplicable));
        }
    }

    #[test]
    fn test_pending_entries_not_applicable() {
        let pending = DigestResult::pending(Algorithm::Md5);
        let statuses = compare_reference(EMPTY_MD5, &pending);
        assert_eq!(statuses[&Algorithm::Md5], MatchStatus::NotApplicable);
    }

    #[test]
    fn test_inner_whitespace_is_significant() {
        let statuses = compare_reference("d41d8cd98f00 b204e9800998ecf8427e", &empty_results());
        assert_eq!(statuses[&Algorithm::Md5], MatchStatus::NoMatch);
    }

    #[test]
    fn test_find_match() {
        let results = empty_results();
        assert_eq!(find_match(EMPTY_MD5, &results), Some(Algorithm::Md5));
        assert_eq!(find_match("deadbeef", &results), None);
        assert_eq!(find_match("", &results), None);
    }
}

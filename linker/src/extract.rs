//! Issue key extraction from commit subjects.
//!
//! Each subject is scanned back to front: the line is reversed and searched
//! for `NUMBER-KEY` (digits, hyphen, uppercase letters). A candidate is
//! rejected when it runs straight into further letters, optionally after a
//! hyphen, which keeps references glued into branch names such as
//! `feature-APP-12` out of the result. The `regex` crate has no look-around,
//! so that rule is checked by hand after each candidate.
//!
//! The key assembly and the over-length repair below keep the output of
//! earlier releases of this tool; both are pinned by tests.

use regex::Regex;
use release_linker_tracker::IssueKey;
use std::collections::HashSet;
use std::sync::OnceLock;

/// Reversed issue key: digits, hyphen, uppercase project letters.
const REVERSED_KEY_PATTERN: &str = r"[0-9]+-[A-Z]+";

/// Longest assembled key accepted without repair.
pub const MAX_KEY_LEN: usize = 12;

fn reversed_key_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(REVERSED_KEY_PATTERN).ok())
        .as_ref()
}

/// Extract the distinct issue keys referenced by `lines`, in first-seen order.
pub fn extract_issue_keys<I, S>(lines: I) -> Vec<IssueKey>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut keys = Vec::new();

    for line in lines {
        let line = line.as_ref();
        let Some(candidate) = extract_candidate(line) else {
            continue;
        };

        match IssueKey::parse(&candidate) {
            Ok(key) => {
                if seen.insert(key.clone()) {
                    keys.push(key);
                }
            }
            Err(_) => {
                tracing::warn!(
                    line = %line,
                    candidate = %candidate,
                    "Skipping unusable issue reference"
                );
            }
        }
    }

    keys
}

/// The raw identifier text one line yields, before key validation.
pub fn extract_candidate(line: &str) -> Option<String> {
    let reversed: String = line.chars().rev().collect();
    let matches = reversed_matches(&reversed);
    compose_reversed_matches(&matches).map(|composite| repair_composite(&composite))
}

/// All `NUMBER-KEY` matches in reversed text that pass the trailing-letter rule.
fn reversed_matches(reversed: &str) -> Vec<&str> {
    let Some(re) = reversed_key_re() else {
        return Vec::new();
    };

    let mut found = Vec::new();
    let mut pos = 0;
    while let Some(m) = re.find_at(reversed, pos) {
        if !continues_with_letters(&reversed[m.end()..]) {
            found.push(m.as_str());
        }
        pos = m.end();
    }
    found
}

/// True when `rest` starts with a letter, or with a hyphen and then a letter.
fn continues_with_letters(rest: &str) -> bool {
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('-') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        _ => false,
    }
}

/// Assemble the identifier from the matches found in reversed text.
///
/// The first match (the last reference in the original line) is turned back
/// into `KEY-NUMBER` form. When a second match exists it is prepended as it
/// appears in the reversed text, which yields artifacts such as
/// `4432-TKMYYMKT-2344`; [`repair_composite`] trims those.
pub fn compose_reversed_matches(matches: &[&str]) -> Option<String> {
    let first = matches.first()?;
    let mut composite = matches.get(1).map(|s| s.to_string()).unwrap_or_default();
    composite.extend(first.chars().rev());
    Some(composite)
}

/// Trim an over-long assembled identifier to its second half.
///
/// Anything longer than [`MAX_KEY_LEN`] characters keeps only the characters
/// from index `len / 2` onwards; shorter input is returned unchanged.
pub fn repair_composite(candidate: &str) -> String {
    let len = candidate.chars().count();
    if len > MAX_KEY_LEN {
        candidate.chars().skip(len / 2).collect()
    } else {
        candidate.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(lines: &[&str]) -> Vec<String> {
        extract_issue_keys(lines)
            .into_iter()
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_single_reference() {
        assert_eq!(keys(&["Fix login bug PROJ-1234"]), vec!["PROJ-1234"]);
    }

    #[test]
    fn test_reference_at_start_and_in_brackets() {
        assert_eq!(
            keys(&["APP-7: tidy config", "[CORE-88] speed up parser"]),
            vec!["APP-7", "CORE-88"]
        );
    }

    #[test]
    fn test_lines_without_references_yield_nothing() {
        assert!(keys(&[
            "Merge branch 'main'",
            "bump version to 1.2-beta",
            "lowercase proj-12 is not a key",
            "",
        ])
        .is_empty());
    }

    #[test]
    fn test_duplicates_across_lines_are_collapsed() {
        assert_eq!(
            keys(&[
                "APP-1 first pass",
                "APP-2 unrelated",
                "follow-up for APP-1",
                "APP-1 final",
            ]),
            vec!["APP-1", "APP-2"]
        );
    }

    #[test]
    fn test_reference_glued_into_branch_name_is_rejected() {
        assert_eq!(extract_candidate("Merge feature-ABC-123 into main"), None);
        assert_eq!(extract_candidate("see xABC-123"), None);
    }

    #[test]
    fn test_trailing_suffix_after_number_is_allowed() {
        assert_eq!(
            extract_candidate("ABC-123-hotfix").as_deref(),
            Some("ABC-123")
        );
    }

    #[test]
    fn test_repeated_reference_on_one_line_is_repaired() {
        let line = "YMKT-2344 follow-up for YMKT-2344";
        let reversed: String = line.chars().rev().collect();
        let matches = reversed_matches(&reversed);
        assert_eq!(matches, vec!["4432-TKMY", "4432-TKMY"]);
        assert_eq!(
            compose_reversed_matches(&matches).as_deref(),
            Some("4432-TKMYYMKT-2344")
        );
        assert_eq!(extract_candidate(line).as_deref(), Some("YMKT-2344"));
    }

    #[test]
    fn test_two_short_references_are_skipped() {
        // "21-PPAAPP-34" is not over-long, so it stays unrepaired and fails
        // key validation.
        assert_eq!(
            extract_candidate("APP-12 and APP-34").as_deref(),
            Some("21-PPAAPP-34")
        );
        assert!(keys(&["APP-12 and APP-34"]).is_empty());
    }

    #[test]
    fn test_compose_without_matches() {
        assert_eq!(compose_reversed_matches(&[]), None);
        assert_eq!(
            compose_reversed_matches(&["4321-JORP"]).as_deref(),
            Some("PROJ-1234")
        );
    }

    #[test]
    fn test_repair_composite_midpoint() {
        assert_eq!(repair_composite("4432-TKMYYMKT-2344"), "YMKT-2344");
        // Odd length: 13 / 2 == 6.
        assert_eq!(repair_composite("ABCDEFGH-1234"), "GH-1234");
    }

    #[test]
    fn test_repair_composite_leaves_short_input() {
        assert_eq!(repair_composite("PROJ-1234"), "PROJ-1234");
        assert_eq!(repair_composite("ABCDEFG-1234"), "ABCDEFG-1234");
    }

    #[test]
    fn test_only_uppercase_projects_match() {
        assert_eq!(keys(&["QA-5 done"]), vec!["QA-5"]);
        assert!(keys(&["QAx-5 done", "Proj-12 done"]).is_empty());
    }
}

// ABOUTME: Sanitizes free-text user limitations before they are placed in a model prompt
// ABOUTME: Strips control characters, collapses whitespace, and bounds length and count
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::OnceLock;

use pierre_core::constants::selection::{MAX_LIMITATIONS_COUNT, MAX_LIMITATION_LENGTH};
use regex::Regex;

static CONTROL_CHARS: OnceLock<Option<Regex>> = OnceLock::new();
static WHITESPACE_RUNS: OnceLock<Option<Regex>> = OnceLock::new();

fn control_chars() -> Option<&'static Regex> {
    CONTROL_CHARS
        .get_or_init(|| Regex::new(r"\p{Cc}").ok())
        .as_ref()
}

fn whitespace_runs() -> Option<&'static Regex> {
    WHITESPACE_RUNS
        .get_or_init(|| Regex::new(r"\s+").ok())
        .as_ref()
}

/// Clean one limitation; `None` when nothing printable remains
///
/// Newlines and other control characters become spaces so a limitation can
/// never open a new prompt line. The result is at most 100 characters.
#[must_use]
pub fn sanitize_limitation(raw: &str) -> Option<String> {
    let spaced = control_chars().map_or_else(
        || raw.replace(char::is_control, " "),
        |re| re.replace_all(raw, " ").into_owned(),
    );
    let collapsed = whitespace_runs().map_or_else(
        || spaced.split_whitespace().collect::<Vec<_>>().join(" "),
        |re| re.replace_all(spaced.trim(), " ").into_owned(),
    );
    let truncated: String = collapsed
        .trim()
        .chars()
        .take(MAX_LIMITATION_LENGTH)
        .collect();
    let cleaned = truncated.trim_end();
    (!cleaned.is_empty()).then(|| cleaned.to_owned())
}

/// Clean a limitation list, dropping empties and keeping at most ten
#[must_use]
pub fn sanitize_limitations<S: AsRef<str>>(limitations: &[S]) -> Vec<String> {
    limitations
        .iter()
        .filter_map(|l| sanitize_limitation(l.as_ref()))
        .take(MAX_LIMITATIONS_COUNT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_characters_become_spaces() {
        assert_eq!(
            sanitize_limitation("knee\npain\r\nIGNORE PREVIOUS").as_deref(),
            Some("knee pain IGNORE PREVIOUS")
        );
        assert_eq!(sanitize_limitation("a\u{0}b").as_deref(), Some("a b"));
    }

    #[test]
    fn test_whitespace_collapsed_and_trimmed() {
        assert_eq!(
            sanitize_limitation("   lower   back\t\tpain  ").as_deref(),
            Some("lower back pain")
        );
    }

    #[test]
    fn test_long_input_truncated() {
        let long = "x".repeat(250);
        assert_eq!(sanitize_limitation(&long).map(|s| s.len()), Some(100));
    }

    #[test]
    fn test_empties_dropped_and_count_bounded() {
        assert_eq!(sanitize_limitation(" \n\t "), None);
        let many: Vec<String> = (0..15).map(|i| format!("issue {i}")).collect();
        let mut input = vec!["   ".to_owned()];
        input.extend(many);
        let cleaned = sanitize_limitations(&input);
        assert_eq!(cleaned.len(), 10);
        assert_eq!(cleaned[0], "issue 0");
    }
}

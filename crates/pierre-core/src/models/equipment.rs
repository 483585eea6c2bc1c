// ABOUTME: Equipment normalization with gym presets and spelling aliases
// ABOUTME: Applied to both user equipment and catalog equipment before subset checks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Equipment vocabulary
//!
//! Users describe their equipment loosely ("dumbbell", "squat_rack",
//! "home_basic"). Every eligibility check in the engine compares normalized
//! sets so that a catalog entry requiring `rack` matches a user who listed
//! `power_rack`.

use std::collections::BTreeSet;

/// Token meaning "no equipment"; dropped during normalization
pub const BODYWEIGHT: &str = "bodyweight";

/// Equipment presets expanded in place
const PRESETS: &[(&str, &[&str])] = &[
    (
        "full_gym",
        &[
            "barbell",
            "dumbbells",
            "cables",
            "machines",
            "bench",
            "rack",
            "pull_up_bar",
            "leg_press_machine",
            "leg_curl_machine",
        ],
    ),
    (
        "home_basic",
        &["dumbbells", "bench", "resistance_bands", "pull_up_bar"],
    ),
    (
        "home_advanced",
        &[
            "barbell",
            "dumbbells",
            "bench",
            "rack",
            "cables",
            "pull_up_bar",
        ],
    ),
    ("bodyweight", &["pull_up_bar"]),
];

/// Alternate spellings mapped to their canonical token
const ALIASES: &[(&str, &str)] = &[
    ("dumbbell", "dumbbells"),
    ("cable", "cables"),
    ("machine", "machines"),
    ("power_rack", "rack"),
    ("squat_rack", "rack"),
    ("pullup_bar", "pull_up_bar"),
    ("pull-up_bar", "pull_up_bar"),
    ("barbell_bench", "bench"),
    ("flat_bench", "bench"),
    ("incline_bench", "bench"),
];

/// Canonical form of a single equipment token (lowercased, trimmed, de-aliased)
#[must_use]
pub fn canonical_equipment(item: &str) -> String {
    let lowered = item.trim().to_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(lowered, |(_, canonical)| (*canonical).to_owned())
}

/// Normalize a raw equipment list into a sorted set
///
/// Presets expand to their member lists, aliases collapse to canonical names,
/// blank entries and the `bodyweight` token are dropped.
#[must_use]
pub fn normalize_equipment<S: AsRef<str>>(equipment: &[S]) -> BTreeSet<String> {
    let mut normalized = BTreeSet::new();
    for item in equipment {
        let lowered = item.as_ref().trim().to_lowercase();
        if lowered.is_empty() {
            continue;
        }
        if let Some((_, members)) = PRESETS.iter().find(|(name, _)| *name == lowered) {
            normalized.extend(members.iter().map(|m| canonical_equipment(m)));
            continue;
        }
        let canonical = canonical_equipment(&lowered);
        if canonical != BODYWEIGHT {
            normalized.insert(canonical);
        }
    }
    normalized
}

/// Whether an exercise's equipment is covered by the available set
///
/// `available` must already be normalized. Bodyweight exercises always pass.
#[must_use]
pub fn equipment_satisfied<S: AsRef<str>>(required: &[S], available: &BTreeSet<String>) -> bool {
    normalize_equipment(required).is_subset(available)
}

/// Required equipment missing from the available set, in canonical form
#[must_use]
pub fn missing_equipment<S: AsRef<str>>(required: &[S], available: &BTreeSet<String>) -> Vec<String> {
    normalize_equipment(required)
        .into_iter()
        .filter(|item| !available.contains(item))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_collapse_to_canonical_names() {
        let normalized = normalize_equipment(&["Dumbbell", " squat_rack ", "pullup_bar", "flat_bench"]);
        let expected: BTreeSet<String> = ["dumbbells", "rack", "pull_up_bar", "bench"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();
        assert_eq!(normalized, expected);
    }

    #[test]
    fn test_presets_expand() {
        let normalized = normalize_equipment(&["home_basic"]);
        assert!(normalized.contains("dumbbells"));
        assert!(normalized.contains("resistance_bands"));
        assert!(!normalized.contains("barbell"));
    }

    #[test]
    fn test_bodyweight_token_means_no_equipment() {
        assert!(normalize_equipment(&["bodyweight", ""]).contains("pull_up_bar"));
        assert!(normalize_equipment::<&str>(&[]).is_empty());
        assert!(equipment_satisfied::<&str>(&[], &BTreeSet::new()));
    }

    #[test]
    fn test_missing_equipment_is_canonical() {
        let available = normalize_equipment(&["barbell"]);
        assert!(equipment_satisfied(&["barbell"], &available));
        assert_eq!(
            missing_equipment(&["barbell", "squat_rack"], &available),
            vec!["rack".to_owned()]
        );
    }
}

//! Properties of the per-level classifier.

use dropfix_core::{NameRules, classify};
use proptest::prelude::*;
use std::ffi::OsString;

fn name() -> impl Strategy<Value = OsString> {
    prop_oneof![
        Just("node_modules"),
        Just("build"),
        Just(".git"),
        Just("src"),
        Just("docs"),
        Just(".DS_Store"),
    ]
    .prop_map(OsString::from)
}

fn unique_names() -> impl Strategy<Value = Vec<OsString>> {
    prop::collection::btree_set(name(), 0..6).prop_map(|set| set.into_iter().collect())
}

fn rules() -> impl Strategy<Value = NameRules> {
    (unique_names(), unique_names(), unique_names()).prop_map(
        |(exclude_dirs, exclude_files, avoid_dirs)| NameRules {
            exclude_dirs,
            exclude_files,
            avoid_dirs,
        },
    )
}

proptest! {
    #[test]
    fn classification_is_deterministic(dirs in unique_names(), files in unique_names(), rules in rules()) {
        prop_assert_eq!(classify(&dirs, &files, &rules), classify(&dirs, &files, &rules));
    }

    #[test]
    fn avoided_names_never_descend_or_exclude(dirs in unique_names(), files in unique_names(), rules in rules()) {
        let result = classify(&dirs, &files, &rules);
        for avoided in &rules.avoid_dirs {
            prop_assert!(!result.descend.contains(avoided));
            prop_assert!(!result.excluded_dirs.contains(avoided));
        }
    }

    #[test]
    fn every_dir_lands_in_exactly_one_bucket(dirs in unique_names(), files in unique_names(), rules in rules()) {
        let result = classify(&dirs, &files, &rules);
        for dir in &dirs {
            let buckets = [
                result.avoided.contains(dir),
                result.excluded_dirs.contains(dir),
                result.descend.contains(dir),
            ];
            prop_assert_eq!(buckets.iter().filter(|hit| **hit).count(), 1);
        }
        prop_assert_eq!(
            result.avoided.len() + result.excluded_dirs.len() + result.descend.len(),
            dirs.len()
        );
    }

    #[test]
    fn excluded_files_come_only_from_files(dirs in unique_names(), files in unique_names(), rules in rules()) {
        let result = classify(&dirs, &files, &rules);
        for excluded in &result.excluded_files {
            prop_assert!(files.contains(excluded));
            prop_assert!(rules.exclude_files.contains(excluded));
        }
    }
}

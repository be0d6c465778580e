//! Per-level classification of child names
//!
//! Matching is exact-name membership. No globbing and no prefix matching.

use std::ffi::OsString;

use crate::FixerConfig;

/// The three configured name sets, in their configured order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameRules {
    pub exclude_dirs: Vec<OsString>,
    pub exclude_files: Vec<OsString>,
    pub avoid_dirs: Vec<OsString>,
}

impl NameRules {
    pub fn from_config(config: &FixerConfig) -> Self {
        let convert = |names: &[String]| names.iter().map(OsString::from).collect();
        Self {
            exclude_dirs: convert(&config.exclude_dirs),
            exclude_files: convert(&config.exclude_files),
            avoid_dirs: convert(&config.avoid_dirs),
        }
    }
}

/// What to do with each child of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    /// Directories skipped silently
    pub avoided: Vec<OsString>,
    /// Directories to exclude, in rule order
    pub excluded_dirs: Vec<OsString>,
    /// Files to exclude, in rule order
    pub excluded_files: Vec<OsString>,
    /// Directories the walk continues into, in listing order
    pub descend: Vec<OsString>,
}

/// Classify one level of the tree.
///
/// Avoidance is applied first, so a name that is both avoided and excluded
/// is only avoided.
pub fn classify(dirs: &[OsString], files: &[OsString], rules: &NameRules) -> Classification {
    let avoided: Vec<OsString> = rules
        .avoid_dirs
        .iter()
        .filter(|name| dirs.contains(name))
        .cloned()
        .collect();

    let excluded_dirs: Vec<OsString> = rules
        .exclude_dirs
        .iter()
        .filter(|name| dirs.contains(name) && !avoided.contains(name))
        .cloned()
        .collect();

    let excluded_files = rules
        .exclude_files
        .iter()
        .filter(|name| files.contains(name))
        .cloned()
        .collect();

    let descend = dirs
        .iter()
        .filter(|name| !avoided.contains(name) && !excluded_dirs.contains(name))
        .cloned()
        .collect();

    Classification {
        avoided,
        excluded_dirs,
        excluded_files,
        descend,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn names(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn rules() -> NameRules {
        NameRules {
            exclude_dirs: names(&["node_modules", "build"]),
            exclude_files: names(&[".DS_Store"]),
            avoid_dirs: names(&[".git"]),
        }
    }

    #[test]
    fn splits_a_level() {
        let result = classify(
            &names(&["src", ".git", "node_modules", "build"]),
            &names(&["README.md", ".DS_Store"]),
            &rules(),
        );

        assert_eq!(
            result,
            Classification {
                avoided: names(&[".git"]),
                excluded_dirs: names(&["node_modules", "build"]),
                excluded_files: names(&[".DS_Store"]),
                descend: names(&["src"]),
            }
        );
    }

    #[test]
    fn exclusions_follow_rule_order_not_listing_order() {
        let result = classify(&names(&["build", "node_modules"]), &[], &rules());
        assert_eq!(result.excluded_dirs, names(&["node_modules", "build"]));
    }

    #[test]
    fn avoided_wins_over_excluded() {
        let mut rules = rules();
        rules.avoid_dirs.push(OsString::from("build"));

        let result = classify(&names(&["build"]), &[], &rules);
        assert_eq!(result.avoided, names(&["build"]));
        assert!(result.excluded_dirs.is_empty());
        assert!(result.descend.is_empty());
    }

    #[rstest]
    #[case::file_named_like_dir(&[], &["node_modules"])]
    #[case::dir_named_like_file(&[".DS_Store"], &[])]
    #[case::prefix_only(&["node_modules_old", "build2"], &["x.DS_Store"])]
    #[case::case_differs(&["Build", ".GIT"], &[".ds_store"])]
    fn non_matches_are_left_alone(#[case] dirs: &[&str], #[case] files: &[&str]) {
        let dirs = names(dirs);
        let result = classify(&dirs, &names(files), &rules());

        assert!(result.avoided.is_empty());
        assert!(result.excluded_dirs.is_empty());
        assert!(result.excluded_files.is_empty());
        assert_eq!(result.descend, dirs);
    }
}

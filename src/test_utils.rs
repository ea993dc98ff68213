//! Test utilities for property-based testing
//!
//! This module provides generators and helpers for proptest.

#[cfg(test)]
pub mod generators {
    use proptest::prelude::*;

    /// Generate an archive file stem, sometimes with a leading `v`
    pub fn archive_stem() -> impl Strategy<Value = String> {
        (
            prop_oneof![Just(""), Just("v")],
            "[a-z][a-z0-9-]{0,15}",
            (0u32..100, 0u32..100),
        )
            .prop_map(|(prefix, name, (major, minor))| format!("{prefix}{name}-{major}.{minor}"))
    }

    /// Generate an archive URL
    pub fn archive_url() -> impl Strategy<Value = String> {
        (
            prop_oneof!["https", "http"],
            "[a-z]{3,10}",
            "[a-z]{2,5}",
            archive_stem(),
            prop_oneof![Just(".tar.gz"), Just(".tgz")],
        )
            .prop_map(|(scheme, domain, tld, stem, ext)| {
                format!("{scheme}://{domain}.{tld}/releases/{stem}{ext}")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::generators::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn test_archive_url_generator_valid(url in archive_url()) {
            prop_assert!(url.starts_with("http"));
            prop_assert!(url.ends_with(".tar.gz") || url.ends_with(".tgz"));
        }

        #[test]
        fn test_archive_stem_generator_valid(stem in archive_stem()) {
            prop_assert!(!stem.is_empty());
            prop_assert!(!stem.contains('/'));
        }
    }
}

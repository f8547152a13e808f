//! Addon-code to unit-identifier matching
//!
//! Addon codes and unit identifiers follow an external naming convention.
//! Matching is a heuristic: false positives and negatives are possible, but
//! the result is always deterministic.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Trailing variant suffix, e.g. "-24sk" or "-01abc2-v3"
    static ref VARIANT_SUFFIX: Regex =
        Regex::new(r"-\d{2}[a-z]+\d*(-v\d+)?$").expect("variant suffix pattern is valid");
}

/// Decides whether an addon candidate applies to a physical unit
pub trait AddonMatcher: Send + Sync {
    fn matches(&self, candidate: &str, identifier: &str) -> bool;
}

/// Substring match, retried once with the variant suffix stripped
#[derive(Debug, Clone, Copy, Default)]
pub struct SuffixStrippingMatcher;

impl SuffixStrippingMatcher {
    /// Candidate code without its variant suffix
    pub fn strip_variant(candidate: &str) -> &str {
        match VARIANT_SUFFIX.find(candidate) {
            Some(m) => &candidate[..m.start()],
            None => candidate,
        }
    }
}

impl AddonMatcher for SuffixStrippingMatcher {
    fn matches(&self, candidate: &str, identifier: &str) -> bool {
        if contains(identifier, candidate) {
            return true;
        }

        // Only retry when stripping changed something
        let stripped = Self::strip_variant(candidate);
        stripped != candidate && contains(identifier, stripped)
    }
}

fn contains(haystack: &str, needle: &str) -> bool {
    !haystack.is_empty() && !needle.is_empty() && haystack.contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_variant() {
        assert_eq!(
            SuffixStrippingMatcher::strip_variant("ram-32g-ecc-2133-24sk"),
            "ram-32g-ecc-2133"
        );
        assert_eq!(
            SuffixStrippingMatcher::strip_variant("softraid-2x480ssd-01abc2-v3"),
            "softraid-2x480ssd"
        );
        assert_eq!(
            SuffixStrippingMatcher::strip_variant("bandwidth-100"),
            "bandwidth-100"
        );
        // suffix must be anchored at the end
        assert_eq!(
            SuffixStrippingMatcher::strip_variant("ram-24sk-extra"),
            "ram-24sk-extra"
        );
    }

    #[test]
    fn test_raw_match() {
        let matcher = SuffixStrippingMatcher;
        assert!(matcher.matches("softraid-2x2000sa", "1801sk12.softraid-2x2000sa.lon"));
        assert!(!matcher.matches("softraid-2x480ssd", "1801sk12.softraid-2x2000sa.lon"));
    }

    #[test]
    fn test_stripped_match() {
        let matcher = SuffixStrippingMatcher;
        assert!(matcher.matches("ram-32g-ecc-2133-24sk", "24sk30.ram-32g-ecc-2133.rbx"));
        assert!(!matcher.matches("ram-64g-ecc-2133-24sk", "24sk30.ram-32g-ecc-2133.rbx"));
    }

    #[test]
    fn test_empty_inputs_never_match() {
        let matcher = SuffixStrippingMatcher;
        assert!(!matcher.matches("", "1801sk12.lon.1"));
        assert!(!matcher.matches("bandwidth-100", ""));
        // strips to an empty string
        assert!(!matcher.matches("-24sk", "24sk30.lon.1"));
    }
}

//! Mandatory addon selection

use std::collections::BTreeMap;

use offers_core::Plan;
use tracing::trace;

use crate::matcher::{AddonMatcher, SuffixStrippingMatcher};

/// Picks one addon per mandatory family for a concrete unit
#[derive(Debug, Clone, Default)]
pub struct AddonResolver<M = SuffixStrippingMatcher> {
    matcher: M,
}

impl AddonResolver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: AddonMatcher> AddonResolver<M> {
    pub fn with_matcher(matcher: M) -> Self {
        Self { matcher }
    }

    /// Family name -> chosen addon code.
    ///
    /// Candidates are tried in catalog order and the first match wins;
    /// otherwise the family default applies. Families with neither
    /// contribute nothing.
    pub fn resolve(&self, plan: &Plan, identifier: &str) -> BTreeMap<String, String> {
        let mut selected = BTreeMap::new();

        for family in plan.mandatory_families() {
            let matched = family
                .addons
                .iter()
                .find(|candidate| self.matcher.matches(candidate, identifier));

            let chosen = matched.or(family.default.as_ref());

            match chosen {
                Some(code) if !code.is_empty() => {
                    trace!(
                        family = family.display_name(),
                        addon = %code,
                        matched = matched.is_some(),
                        "Selected addon"
                    );
                    selected.insert(family.display_name().to_string(), code.clone());
                }
                _ => trace!(family = family.display_name(), "No addon for family"),
            }
        }

        selected
    }
}

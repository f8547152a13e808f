//! Catalog lookup tables

use std::collections::HashMap;

use offers_core::{Catalog, Plan};

/// Plan-code lookups over one catalog, built once per request
#[derive(Debug, Default)]
pub struct CatalogIndex<'a> {
    plans: HashMap<&'a str, &'a Plan>,
    addons: HashMap<&'a str, &'a Plan>,
}

impl<'a> CatalogIndex<'a> {
    /// Later duplicates of a code overwrite earlier ones
    pub fn build(catalog: &'a Catalog) -> Self {
        Self {
            plans: index_pool(&catalog.plans),
            addons: index_pool(&catalog.addons),
        }
    }

    pub fn plan(&self, code: &str) -> Option<&'a Plan> {
        self.plans.get(code).copied()
    }

    pub fn addon(&self, code: &str) -> Option<&'a Plan> {
        self.addons.get(code).copied()
    }

    pub fn plan_count(&self) -> usize {
        self.plans.len()
    }

    pub fn addon_count(&self) -> usize {
        self.addons.len()
    }
}

fn index_pool(pool: &[Plan]) -> HashMap<&str, &Plan> {
    pool.iter()
        .map(|plan| (plan.plan_code.as_str(), plan))
        .collect()
}

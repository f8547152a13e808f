//! Engine output model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A priced, addon-resolved, in-stock server unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub identifier: String,
    pub plan_code: String,
    /// Monthly total (base + priced mandatory addons), major currency units
    pub total_price: f64,
    pub currency: String,
    pub display_name: String,
    /// Addon family name -> selected addon plan code
    pub addons: BTreeMap<String, String>,
}

/// Parameters of one top-offers request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferQuery {
    /// Selects which catalog to fetch (e.g. "GB", "FR")
    pub subsidiary: String,
    /// Datacenter filter (e.g. "lon", "rbx")
    pub datacenter: String,
    pub top: usize,
}

impl OfferQuery {
    pub fn new(subsidiary: impl Into<String>, datacenter: impl Into<String>, top: usize) -> Self {
        Self {
            subsidiary: subsidiary.into(),
            datacenter: datacenter.into(),
            top,
        }
    }
}

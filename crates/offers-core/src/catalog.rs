//! Pricing catalog model
//!
//! Mirrors the public eco catalog document. Every field decodes leniently so a
//! partially populated catalog still indexes.

use serde::{Deserialize, Serialize};

/// Currency reported when the catalog carries none
pub const UNKNOWN_CURRENCY: &str = "unknown";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "catalogId", default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub locale: Locale,
    /// Base offerings
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub plans: Vec<Plan>,
    /// Addon offerings (bandwidth, storage, memory, ...)
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub addons: Vec<Plan>,
}

impl Catalog {
    /// Catalog currency, or [`UNKNOWN_CURRENCY`]
    pub fn currency(&self) -> &str {
        match self.locale.currency_code.as_deref() {
            Some(code) if !code.is_empty() => code,
            _ => UNKNOWN_CURRENCY,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Locale {
    #[serde(rename = "currencyCode", default)]
    pub currency_code: Option<String>,
    #[serde(default)]
    pub subsidiary: Option<String>,
    #[serde(rename = "taxRate", default)]
    pub tax_rate: Option<f64>,
}

/// A priced product definition, either a server tier or an addon
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Plan {
    #[serde(rename = "planCode", default, deserialize_with = "crate::de::null_as_default")]
    pub plan_code: String,
    #[serde(rename = "invoiceName", default)]
    pub invoice_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "addonFamilies", default, deserialize_with = "crate::de::null_as_default")]
    pub addon_families: Vec<AddonFamily>,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub pricings: Vec<PriceTier>,
}

impl Plan {
    pub fn new(plan_code: impl Into<String>) -> Self {
        Self {
            plan_code: plan_code.into(),
            ..Default::default()
        }
    }

    pub fn with_invoice_name(mut self, name: impl Into<String>) -> Self {
        self.invoice_name = Some(name.into());
        self
    }

    pub fn with_family(mut self, family: AddonFamily) -> Self {
        self.addon_families.push(family);
        self
    }

    pub fn with_tier(mut self, tier: PriceTier) -> Self {
        self.pricings.push(tier);
        self
    }

    /// Invoice name, then description, then plan code
    pub fn display_name(&self) -> &str {
        [self.invoice_name.as_deref(), self.description.as_deref()]
            .into_iter()
            .flatten()
            .find(|name| !name.is_empty())
            .unwrap_or(&self.plan_code)
    }

    pub fn mandatory_families(&self) -> impl Iterator<Item = &AddonFamily> {
        self.addon_families.iter().filter(|family| family.mandatory)
    }
}

/// Group of related addons; a mandatory family needs exactly one per unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AddonFamily {
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub mandatory: bool,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub exclusive: bool,
    /// Candidate addon plan codes, in catalog order
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub addons: Vec<String>,
    #[serde(default)]
    pub default: Option<String>,
}

impl AddonFamily {
    pub fn mandatory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mandatory: true,
            ..Default::default()
        }
    }

    pub fn with_addon(mut self, code: impl Into<String>) -> Self {
        self.addons.push(code.into());
        self
    }

    pub fn with_default(mut self, code: impl Into<String>) -> Self {
        self.default = Some(code.into());
        self
    }

    /// Family name, normalized to "unknown" when empty
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() {
            "unknown"
        } else {
            self.name.as_str()
        }
    }
}

/// One billing interval/price combination
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceTier {
    #[serde(default)]
    pub phase: Option<u32>,
    #[serde(default)]
    pub interval: Option<u32>,
    #[serde(rename = "intervalUnit", default)]
    pub interval_unit: Option<String>,
    /// Legacy ISO-8601-like duration ("P1M"), used when interval fields are absent
    #[serde(default)]
    pub duration: Option<String>,
    /// Price in micro-units (100_000_000 = one major currency unit)
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub price: i64,
    #[serde(default)]
    pub tax: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl PriceTier {
    pub fn interval(count: u32, unit: impl Into<String>, price: i64) -> Self {
        Self {
            interval: Some(count),
            interval_unit: Some(unit.into()),
            price,
            ..Default::default()
        }
    }

    pub fn legacy(duration: impl Into<String>, price: i64) -> Self {
        Self {
            duration: Some(duration.into()),
            price,
            ..Default::default()
        }
    }
}

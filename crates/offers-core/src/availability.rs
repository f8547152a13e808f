//! Availability feed model

use serde::{Deserialize, Serialize};

/// Stock status of a server model in one datacenter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StockStatus {
    Available,
    Unavailable,
    /// Available with caveats (e.g. "1H-low", "72H")
    Limited(String),
}

impl StockStatus {
    /// Everything except `unavailable` counts as in stock
    pub fn is_available(&self) -> bool {
        !matches!(self, StockStatus::Unavailable)
    }

    pub fn as_str(&self) -> &str {
        match self {
            StockStatus::Available => "available",
            StockStatus::Unavailable => "unavailable",
            StockStatus::Limited(raw) => raw.as_str(),
        }
    }
}

/// A missing status decodes like an empty one
impl Default for StockStatus {
    fn default() -> Self {
        StockStatus::Limited(String::new())
    }
}

impl From<String> for StockStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "available" => StockStatus::Available,
            "unavailable" => StockStatus::Unavailable,
            _ => StockStatus::Limited(raw),
        }
    }
}

impl From<StockStatus> for String {
    fn from(status: StockStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatacenterStock {
    #[serde(rename = "datacenter", default, deserialize_with = "crate::de::null_as_default")]
    pub code: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub availability: StockStatus,
}

/// One physical server unit as reported by the availability feed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    /// Opaque unit identifier (e.g. "1801sk12.lon.1")
    #[serde(rename = "fqn", default, deserialize_with = "crate::de::null_as_default")]
    pub identifier: String,
    #[serde(rename = "planCode", default, deserialize_with = "crate::de::null_as_default")]
    pub plan_code: String,
    #[serde(default, deserialize_with = "crate::de::null_as_default")]
    pub datacenters: Vec<DatacenterStock>,
}

impl AvailabilityRecord {
    pub fn new(identifier: impl Into<String>, plan_code: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            plan_code: plan_code.into(),
            datacenters: Vec::new(),
        }
    }

    pub fn with_datacenter(mut self, code: impl Into<String>, status: impl Into<String>) -> Self {
        self.datacenters.push(DatacenterStock {
            code: code.into(),
            availability: StockStatus::from(status.into()),
        });
        self
    }

    /// True if any entry for `datacenter` is not `unavailable`
    pub fn in_stock_at(&self, datacenter: &str) -> bool {
        self.datacenters
            .iter()
            .any(|dc| dc.code == datacenter && dc.availability.is_available())
    }
}

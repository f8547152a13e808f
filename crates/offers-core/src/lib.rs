//! Core domain models for offers
//!
//! This crate contains:
//! - Feed models (availability records, pricing catalog)
//! - The engine's output model (Offer) and invocation parameters
//! - The caller-visible error taxonomy

pub mod availability;
pub mod catalog;
mod de;
pub mod error;
pub mod offer;

pub use availability::{AvailabilityRecord, DatacenterStock, StockStatus};
pub use catalog::{AddonFamily, Catalog, Locale, Plan, PriceTier, UNKNOWN_CURRENCY};
pub use error::{Error, Feed, Result};
pub use offer::{Offer, OfferQuery};

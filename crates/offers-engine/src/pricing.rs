//! Monthly price extraction

use offers_core::{Plan, PriceTier};
use thiserror::Error;

/// Micro-units in one major currency unit
pub const MICRO_UNITS_PER_UNIT: f64 = 100_000_000.0;

const LEGACY_MONTHLY_DURATION: &str = "P1M";

#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyPrice {
    pub amount: f64,
    pub currency: String,
}

/// Internal pricing outcome; never reaches engine callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    #[error("cannot extract monthly price for planCode={plan_code}")]
    Unpriceable { plan_code: String },
}

pub fn micro_units_to_amount(micro_units: i64) -> f64 {
    micro_units as f64 / MICRO_UNITS_PER_UNIT
}

/// The canonical monthly tier: interval 1 month first, legacy "P1M" second
pub fn monthly_tier(plan: &Plan) -> Option<&PriceTier> {
    plan.pricings
        .iter()
        .find(|tier| tier.interval == Some(1) && tier.interval_unit.as_deref() == Some("month"))
        .or_else(|| {
            plan.pricings
                .iter()
                .find(|tier| tier.duration.as_deref() == Some(LEGACY_MONTHLY_DURATION))
        })
}

pub fn monthly_price(plan: &Plan, currency: &str) -> Result<MonthlyPrice, PricingError> {
    let tier = monthly_tier(plan).ok_or_else(|| PricingError::Unpriceable {
        plan_code: plan.plan_code.clone(),
    })?;

    Ok(MonthlyPrice {
        amount: micro_units_to_amount(tier.price),
        currency: currency.to_string(),
    })
}

//! Offer assembly and ranking
//!
//! Joins availability records against the catalog index, prices each match
//! and keeps the cheapest N. Per-record problems (unknown plan, no stock,
//! no monthly tier) exclude the record silently; they are counted for
//! diagnostics but never fail the batch.

use std::fmt;

use offers_core::{AvailabilityRecord, Catalog, Offer};
use tracing::debug;

use crate::index::CatalogIndex;
use crate::matcher::{AddonMatcher, SuffixStrippingMatcher};
use crate::pricing::{PricingError, monthly_price};
use crate::resolver::AddonResolver;

/// Why records or addons were left out of an assembly
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkipCounts {
    /// Empty identifier or plan code
    pub missing_identity: usize,
    /// Plan code not in the catalog's base plans
    pub unmatched_plan: usize,
    /// No in-stock entry for the requested datacenter
    pub out_of_stock: usize,
    /// Base plan without a monthly price tier
    pub unpriceable: usize,
    /// Selected addons left out of a total (unknown or unpriceable)
    pub addons_skipped: usize,
}

impl SkipCounts {
    /// Records excluded for any reason
    pub fn records(&self) -> usize {
        self.missing_identity + self.unmatched_plan + self.out_of_stock + self.unpriceable
    }

    fn record(&mut self, exclusion: &Exclusion) {
        match exclusion {
            Exclusion::MissingIdentity => self.missing_identity += 1,
            Exclusion::UnmatchedPlan => self.unmatched_plan += 1,
            Exclusion::OutOfStock => self.out_of_stock += 1,
            Exclusion::Unpriceable(_) => self.unpriceable += 1,
        }
    }
}

/// Ranked offers plus exclusion diagnostics
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub offers: Vec<Offer>,
    pub skipped: SkipCounts,
}

#[derive(Debug)]
enum Exclusion {
    MissingIdentity,
    UnmatchedPlan,
    OutOfStock,
    Unpriceable(PricingError),
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Exclusion::MissingIdentity => f.write_str("missing identifier or plan code"),
            Exclusion::UnmatchedPlan => f.write_str("plan not in catalog"),
            Exclusion::OutOfStock => f.write_str("not in stock at datacenter"),
            Exclusion::Unpriceable(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct OfferAssembler<M = SuffixStrippingMatcher> {
    resolver: AddonResolver<M>,
}

impl OfferAssembler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: AddonMatcher> OfferAssembler<M> {
    pub fn with_resolver(resolver: AddonResolver<M>) -> Self {
        Self { resolver }
    }

    /// Join, price and rank; keeps at most `top_n` offers
    pub fn assemble(
        &self,
        availability: &[AvailabilityRecord],
        catalog: &Catalog,
        datacenter: &str,
        top_n: usize,
    ) -> Assembly {
        let index = CatalogIndex::build(catalog);
        let currency = catalog.currency();
        debug!(
            plans = index.plan_count(),
            addons = index.addon_count(),
            currency = currency,
            "Indexed catalog"
        );
        let mut skipped = SkipCounts::default();
        let mut offers = Vec::new();

        for record in availability {
            match self.price_record(&index, currency, record, datacenter) {
                Ok((offer, addons_skipped)) => {
                    skipped.addons_skipped += addons_skipped;
                    offers.push(offer);
                }
                Err(exclusion) => {
                    debug!(
                        identifier = %record.identifier,
                        plan_code = %record.plan_code,
                        reason = %exclusion,
                        "Excluded record"
                    );
                    skipped.record(&exclusion);
                }
            }
        }

        rank(&mut offers, top_n);

        Assembly { offers, skipped }
    }

    fn price_record(
        &self,
        index: &CatalogIndex<'_>,
        currency: &str,
        record: &AvailabilityRecord,
        datacenter: &str,
    ) -> Result<(Offer, usize), Exclusion> {
        if record.identifier.is_empty() || record.plan_code.is_empty() {
            return Err(Exclusion::MissingIdentity);
        }

        let plan = index
            .plan(&record.plan_code)
            .ok_or(Exclusion::UnmatchedPlan)?;

        if !record.in_stock_at(datacenter) {
            return Err(Exclusion::OutOfStock);
        }

        let base = monthly_price(plan, currency).map_err(Exclusion::Unpriceable)?;
        let addons = self.resolver.resolve(plan, &record.identifier);

        let mut total = base.amount;
        let mut addons_skipped = 0;
        for code in addons.values() {
            let priced = index
                .addon(code)
                .and_then(|addon| monthly_price(addon, currency).ok());

            match priced {
                Some(price) => total += price.amount,
                None => {
                    debug!(
                        identifier = %record.identifier,
                        addon = %code,
                        "Addon left out of total"
                    );
                    addons_skipped += 1;
                }
            }
        }

        let offer = Offer {
            identifier: record.identifier.clone(),
            plan_code: record.plan_code.clone(),
            total_price: total,
            currency: base.currency,
            display_name: plan.display_name().to_string(),
            addons,
        };

        Ok((offer, addons_skipped))
    }
}

/// Stable ascending sort by total price, then truncate
fn rank(offers: &mut Vec<Offer>, top_n: usize) {
    if top_n == 0 {
        offers.clear();
        return;
    }

    offers.sort_by(|a, b| a.total_price.total_cmp(&b.total_price));
    offers.truncate(top_n);
}

/// Cheapest `top_n` priceable offers in stock at `datacenter`
pub fn build_top_offers(
    availability: &[AvailabilityRecord],
    catalog: &Catalog,
    datacenter: &str,
    top_n: usize,
) -> Vec<Offer> {
    assemble_offers(availability, catalog, datacenter, top_n).offers
}

/// Like [`build_top_offers`], keeping exclusion counts
pub fn assemble_offers(
    availability: &[AvailabilityRecord],
    catalog: &Catalog,
    datacenter: &str,
    top_n: usize,
) -> Assembly {
    OfferAssembler::new().assemble(availability, catalog, datacenter, top_n)
}

//! Server-offer aggregation engine
//!
//! Pipeline: fetch availability, fetch catalog, index the catalog, then for
//! each in-stock unit resolve its mandatory addons, price it, and rank.

pub mod assemble;
pub mod index;
pub mod matcher;
pub mod pricing;
pub mod resolver;

use std::time::Instant;

use offers_core::{Offer, OfferQuery, Result};
use offers_sources::FeedSource;
use tracing::info;

pub use assemble::{Assembly, OfferAssembler, SkipCounts, assemble_offers, build_top_offers};
pub use index::CatalogIndex;
pub use matcher::{AddonMatcher, SuffixStrippingMatcher};
pub use pricing::{MICRO_UNITS_PER_UNIT, MonthlyPrice, PricingError, monthly_price};
pub use resolver::AddonResolver;

/// Fetches both feeds and ranks offers, one request at a time.
///
/// Nothing is cached between calls; every request builds its own index.
pub struct OfferEngine {
    source: Box<dyn FeedSource>,
    assembler: OfferAssembler,
}

impl OfferEngine {
    pub fn new(source: impl FeedSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            assembler: OfferAssembler::new(),
        }
    }

    /// Cheapest `query.top` offers in stock at `query.datacenter`
    pub async fn top_offers(&self, query: &OfferQuery) -> Result<Vec<Offer>> {
        Ok(self.assemble(query).await?.offers)
    }

    /// Same as [`top_offers`](Self::top_offers), keeping exclusion counts
    pub async fn assemble(&self, query: &OfferQuery) -> Result<Assembly> {
        let start = Instant::now();

        // Catalog is only fetched once availability succeeded
        let availability = self.source.availability().await?;
        let catalog = self.source.catalog(&query.subsidiary).await?;

        let assembly =
            self.assembler
                .assemble(&availability, &catalog, &query.datacenter, query.top);

        info!(
            source = self.source.name(),
            subsidiary = %query.subsidiary,
            datacenter = %query.datacenter,
            records = availability.len(),
            plans = catalog.plans.len(),
            offers = assembly.offers.len(),
            excluded = assembly.skipped.records(),
            missing_identity = assembly.skipped.missing_identity,
            unmatched_plan = assembly.skipped.unmatched_plan,
            out_of_stock = assembly.skipped.out_of_stock,
            unpriceable = assembly.skipped.unpriceable,
            addons_skipped = assembly.skipped.addons_skipped,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Assembled offers"
        );

        Ok(assembly)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use offers_core::{AvailabilityRecord, Catalog, Error, Feed, Locale, Plan, PriceTier};

    /// In-memory source recording which feeds were requested
    #[derive(Default)]
    struct StubSource {
        fail: Option<Feed>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl FeedSource for StubSource {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn availability(&self) -> Result<Vec<AvailabilityRecord>> {
            self.calls.lock().unwrap().push("availability".to_string());
            if self.fail == Some(Feed::Availability) {
                return Err(Error::fetch(Feed::Availability, io_error("timed out")));
            }
            Ok(vec![
                AvailabilityRecord::new("1801sk12.lon.1", "eco.eco-1")
                    .with_datacenter("lon", "available"),
            ])
        }

        async fn catalog(&self, subsidiary: &str) -> Result<Catalog> {
            self.calls.lock().unwrap().push(format!("catalog:{subsidiary}"));
            if self.fail == Some(Feed::Catalog) {
                return Err(Error::fetch(Feed::Catalog, io_error("HTTP error 500")));
            }
            Ok(Catalog {
                locale: Locale {
                    currency_code: Some("GBP".to_string()),
                    ..Default::default()
                },
                plans: vec![
                    Plan::new("eco.eco-1").with_tier(PriceTier::interval(1, "month", 1_599_000_000)),
                ],
                ..Default::default()
            })
        }
    }

    fn io_error(msg: &str) -> std::io::Error {
        std::io::Error::other(msg.to_string())
    }

    fn failing(feed: Feed) -> (StubSource, Arc<Mutex<Vec<String>>>) {
        let source = StubSource {
            fail: Some(feed),
            ..Default::default()
        };
        let calls = Arc::clone(&source.calls);
        (source, calls)
    }

    #[tokio::test]
    async fn test_top_offers() {
        let source = StubSource::default();
        let calls = Arc::clone(&source.calls);
        let engine = OfferEngine::new(source);

        let offers = engine
            .top_offers(&OfferQuery::new("GB", "lon", 5))
            .await
            .unwrap();

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].total_price, 15.99);
        assert_eq!(offers[0].currency, "GBP");
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["availability".to_string(), "catalog:GB".to_string()]
        );
    }

    #[tokio::test]
    async fn test_availability_failure_stops_before_catalog() {
        let (source, calls) = failing(Feed::Availability);
        let engine = OfferEngine::new(source);

        let err = engine
            .top_offers(&OfferQuery::new("GB", "lon", 5))
            .await
            .unwrap_err();

        assert_eq!(err.feed(), Feed::Availability);
        assert_eq!(*calls.lock().unwrap(), vec!["availability".to_string()]);
    }

    #[tokio::test]
    async fn test_catalog_failure_propagates() {
        let (source, _calls) = failing(Feed::Catalog);
        let engine = OfferEngine::new(source);

        let err = engine
            .top_offers(&OfferQuery::new("FR", "rbx", 5))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::FetchFailed { feed: Feed::Catalog, .. }));
    }

    #[tokio::test]
    async fn test_assemble_reports_skips() {
        let engine = OfferEngine::new(StubSource::default());

        let assembly = engine
            .assemble(&OfferQuery::new("GB", "rbx", 5))
            .await
            .unwrap();

        assert!(assembly.offers.is_empty());
        assert_eq!(assembly.skipped.out_of_stock, 1);
        assert_eq!(assembly.skipped.records(), 1);
    }
}

use anyhow::Result;
use offers_config::Config;
use offers_core::OfferQuery;
use offers_engine::OfferEngine;
use offers_sources::{FileSource, HttpSource};
use tracing::{error, info};

use crate::cli::TopArgs;
use crate::render;

pub async fn handle(args: TopArgs, config: &Config) -> Result<()> {
    let query = OfferQuery::new(
        args.subsidiary.unwrap_or_else(|| config.subsidiary.clone()),
        args.datacenter.unwrap_or_else(|| config.datacenter.clone()),
        args.top.unwrap_or(config.top),
    );

    let engine = match (args.availability_file, args.catalog_file) {
        (Some(availability), Some(catalog)) => {
            OfferEngine::new(FileSource::new(availability, catalog))
        }
        _ => OfferEngine::new(HttpSource::new(
            &config.api.base_url,
            config.api.timeout(),
            &config.api.user_agent,
        )?),
    };

    info!(
        subsidiary = %query.subsidiary,
        datacenter = %query.datacenter,
        top = query.top,
        "Fetching server availability"
    );

    match engine.top_offers(&query).await {
        Ok(offers) => {
            println!("{}", render::offers(args.format, &offers, &query)?);
            Ok(())
        }
        Err(e) => {
            // Details go to the log only; the user sees a generic message
            error!(error = %e, feed = %e.feed(), "Failed to fetch offers");
            println!("{}", render::failure(args.format));
            anyhow::bail!("{} feed unavailable", e.feed())
        }
    }
}

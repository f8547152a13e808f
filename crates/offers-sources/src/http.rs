use std::time::Duration;

use async_trait::async_trait;
use offers_core::{AvailabilityRecord, Catalog, Error, Feed, Result};
use tracing::{debug, info, warn};

use crate::feed::{FeedSource, decode};

const AVAILABILITY_PATH: &str = "/dedicated/server/datacenter/availabilities";
const CATALOG_PATH: &str = "/order/catalog/public/eco";

/// Fetches both feeds from the public API
pub struct HttpSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get(&self, feed: Feed, path: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let url = format!("{}{}", self.base_url, path);
        debug!(feed = %feed, url = %url, "Fetching feed");

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| {
                warn!(feed = %feed, error = %e, "Request failed");
                Error::fetch(feed, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(feed = %feed, status = status.as_u16(), "Non-success status");
            return Err(Error::fetch(
                feed,
                anyhow::anyhow!("HTTP error {}: {}", status.as_u16(), url),
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| Error::fetch(feed, e))?;

        info!(feed = %feed, bytes = body.len(), "Fetched feed");
        Ok(body.to_vec())
    }
}

#[async_trait]
impl FeedSource for HttpSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn availability(&self) -> Result<Vec<AvailabilityRecord>> {
        let body = self.get(Feed::Availability, AVAILABILITY_PATH, &[]).await?;
        decode(Feed::Availability, &body)
    }

    async fn catalog(&self, subsidiary: &str) -> Result<Catalog> {
        let body = self
            .get(Feed::Catalog, CATALOG_PATH, &[("ovhSubsidiary", subsidiary)])
            .await?;
        decode(Feed::Catalog, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn source(server: &MockServer) -> HttpSource {
        HttpSource::new(&server.uri(), Duration::from_secs(5), "offers-test").unwrap()
    }

    #[tokio::test]
    async fn test_fetch_availability() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(AVAILABILITY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"[{"fqn": "1801sk12.lon.1", "planCode": "eco.eco-1",
                     "datacenters": [{"datacenter": "lon", "availability": "available"}]}]"#,
            ))
            .mount(&server)
            .await;

        let records = source(&server).availability().await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].identifier, "1801sk12.lon.1");
        assert!(records[0].in_stock_at("lon"));
    }

    #[tokio::test]
    async fn test_catalog_sends_subsidiary() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .and(query_param("ovhSubsidiary", "GB"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(r#"{"locale": {"currencyCode": "GBP"}, "plans": [], "addons": []}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let catalog = source(&server).catalog("GB").await.unwrap();
        assert_eq!(catalog.currency(), "GBP");
    }

    #[tokio::test]
    async fn test_non_success_status_is_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(CATALOG_PATH))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let err = source(&server).catalog("GB").await.unwrap_err();
        assert!(matches!(err, Error::FetchFailed { feed: Feed::Catalog, .. }));
        assert!(err.to_string().contains("503"));
    }

    #[tokio::test]
    async fn test_malformed_body_is_decode_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(AVAILABILITY_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = source(&server).availability().await.unwrap_err();
        assert!(matches!(
            err,
            Error::DecodeFailed {
                feed: Feed::Availability,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_failure() {
        // nothing listens on the discard port
        let source =
            HttpSource::new("http://127.0.0.1:9", Duration::from_secs(2), "offers-test").unwrap();
        let err = source.availability().await.unwrap_err();
        assert!(matches!(
            err,
            Error::FetchFailed {
                feed: Feed::Availability,
                ..
            }
        ));
    }
}

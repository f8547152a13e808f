use std::fmt;

use thiserror::Error;

/// Upstream feed an error originated from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feed {
    Availability,
    Catalog,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Availability => f.write_str("availability"),
            Feed::Catalog => f.write_str("catalog"),
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Failed to fetch {feed} feed: {source}")]
    FetchFailed {
        feed: Feed,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to decode {feed} feed: {source}")]
    DecodeFailed {
        feed: Feed,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    pub fn fetch(feed: Feed, source: impl Into<anyhow::Error>) -> Self {
        Error::FetchFailed {
            feed,
            source: source.into(),
        }
    }

    pub fn decode(feed: Feed, source: serde_json::Error) -> Self {
        Error::DecodeFailed { feed, source }
    }

    /// Feed that failed
    pub fn feed(&self) -> Feed {
        match self {
            Error::FetchFailed { feed, .. } | Error::DecodeFailed { feed, .. } => *feed,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_names_feed() {
        let err = Error::fetch(Feed::Catalog, anyhow::anyhow!("HTTP error 503"));
        assert_eq!(err.feed(), Feed::Catalog);
        assert_eq!(
            err.to_string(),
            "Failed to fetch catalog feed: HTTP error 503"
        );
    }

    #[test]
    fn test_decode_error_keeps_source() {
        let source = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err = Error::decode(Feed::Availability, source);
        assert_eq!(err.feed(), Feed::Availability);
        assert!(err.to_string().starts_with("Failed to decode availability feed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}

use thiserror::Error;

/// Why a request to the listings endpoint did not produce usable data.
///
/// This never reaches callers of the facade: every variant is logged and
/// replaced by the fallback listings.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("cannot address listing '{id}' under {url}")]
    BadUrl { url: String, id: String },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

#[derive(Debug, Error, PartialEq)]
pub enum CriteriaError {
    #[error("price range is inverted: min {min} is above max {max}")]
    InvertedPriceRange { min: f64, max: f64 },

    #[error("price range bounds must be numbers")]
    NonNumericPriceBound,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown price range '{0}', expected one of: all, low, medium, high")]
pub struct ParseBucketError(pub String);

//! Property listings: fetch them from a remote endpoint (or a fixed fallback
//! set when that fails) and narrow them down client-side.

pub mod api;
pub mod browse;
pub mod config;
pub mod error;
pub mod filters;
pub mod models;

pub use api::{PropertyApi, PropertySource, StaticSource};
pub use browse::{LoadState, LoadTicket, PropertyBrowser};
pub use config::ApiConfig;
pub use filters::{apply_filters, FilterCriteria, PriceBucket, PriceRange, TypeFilter};
pub use models::{Property, PropertyId};

pub mod client;
pub mod fallback;
pub mod traits;

pub use client::PropertyApi;
pub use fallback::{fallback_properties, find_fallback, StaticSource};
pub use traits::PropertySource;

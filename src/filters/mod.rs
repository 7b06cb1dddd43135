pub mod types;

pub use types::{FilterCriteria, PriceBucket, PriceRange, TypeFilter, MAX_PRICE};

use crate::models::Property;

/// Keep the listings that satisfy every criterion, in their original order
pub fn apply_filters(records: &[Property], criteria: &FilterCriteria) -> Vec<Property> {
    records
        .iter()
        .filter(|property| criteria.matches(property))
        .cloned()
        .collect()
}

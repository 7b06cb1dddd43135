use crate::error::{CriteriaError, ParseBucketError};
use crate::models::Property;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of the default price range
pub const MAX_PRICE: f64 = 10_000_000.0;

/// Inclusive price interval
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    pub fn validate(&self) -> Result<(), CriteriaError> {
        if self.min.is_nan() || self.max.is_nan() {
            return Err(CriteriaError::NonNumericPriceBound);
        }
        if self.min > self.max {
            return Err(CriteriaError::InvertedPriceRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::new(0.0, MAX_PRICE)
    }
}

/// Property type selection. `"all"` (any case) and blank text mean no filtering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(String),
}

impl TypeFilter {
    pub fn matches(&self, property_type: Option<&str>) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(wanted) => {
                property_type.is_some_and(|t| t.to_lowercase() == wanted.to_lowercase())
            }
        }
    }
}

impl From<&str> for TypeFilter {
    fn from(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            TypeFilter::All
        } else {
            TypeFilter::Only(value.to_string())
        }
    }
}

impl From<String> for TypeFilter {
    fn from(value: String) -> Self {
        TypeFilter::from(value.as_str())
    }
}

impl From<TypeFilter> for String {
    fn from(value: TypeFilter) -> Self {
        match value {
            TypeFilter::All => "all".to_string(),
            TypeFilter::Only(t) => t,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(t) => f.write_str(t),
        }
    }
}

/// Named price presets offered by the listings page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PriceBucket {
    #[default]
    All,
    Low,
    Medium,
    High,
}

impl PriceBucket {
    pub fn range(self) -> PriceRange {
        match self {
            PriceBucket::All => PriceRange::default(),
            PriceBucket::Low => PriceRange::new(0.0, 300_000.0),
            PriceBucket::Medium => PriceRange::new(300_001.0, 700_000.0),
            PriceBucket::High => PriceRange::new(700_001.0, MAX_PRICE),
        }
    }
}

impl FromStr for PriceBucket {
    type Err = ParseBucketError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(PriceBucket::All),
            "low" => Ok(PriceBucket::Low),
            "medium" => Ok(PriceBucket::Medium),
            "high" => Ok(PriceBucket::High),
            _ => Err(ParseBucketError(s.to_string())),
        }
    }
}

/// What a listing must satisfy to be shown. All present criteria must hold.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterCriteria {
    /// Case-insensitive substring of the listing location
    pub location: Option<String>,
    #[serde(rename = "type")]
    pub property_type: TypeFilter,
    pub price_range: PriceRange,
}

impl FilterCriteria {
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_type(mut self, property_type: impl Into<TypeFilter>) -> Self {
        self.property_type = property_type.into();
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    /// Replaces the price range with the bucket's interval
    pub fn with_bucket(mut self, bucket: PriceBucket) -> Self {
        self.price_range = bucket.range();
        self
    }

    pub fn validate(&self) -> Result<(), CriteriaError> {
        self.price_range.validate()
    }

    pub fn matches(&self, property: &Property) -> bool {
        self.location_matches(property)
            && self.property_type.matches(property.property_type.as_deref())
            && self.price_range.contains(property.effective_price())
    }

    fn location_matches(&self, property: &Property) -> bool {
        let needle = match self.location.as_deref() {
            Some(needle) if !needle.trim().is_empty() => needle.to_lowercase(),
            _ => return true,
        };

        property
            .location
            .as_deref()
            .is_some_and(|location| location.to_lowercase().contains(&needle))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn buckets_map_to_fixed_intervals() {
        assert_eq!(PriceBucket::Low.range(), PriceRange::new(0.0, 300_000.0));
        assert_eq!(
            PriceBucket::Medium.range(),
            PriceRange::new(300_001.0, 700_000.0)
        );
        assert_eq!(
            PriceBucket::High.range(),
            PriceRange::new(700_001.0, 10_000_000.0)
        );
        assert_eq!(PriceBucket::All.range(), PriceRange::default());
    }

    #[test]
    fn parses_bucket_names() {
        assert_eq!("low".parse::<PriceBucket>(), Ok(PriceBucket::Low));
        assert_eq!(" Medium ".parse::<PriceBucket>(), Ok(PriceBucket::Medium));
        assert_eq!("HIGH".parse::<PriceBucket>(), Ok(PriceBucket::High));
        assert_eq!("all".parse::<PriceBucket>(), Ok(PriceBucket::All));
        assert_eq!(
            "cheap".parse::<PriceBucket>(),
            Err(ParseBucketError("cheap".to_string()))
        );
    }

    #[test]
    fn bucket_replaces_custom_range() {
        let criteria = FilterCriteria::default()
            .with_price_range(500_000.0, 600_000.0)
            .with_bucket(PriceBucket::High);

        assert_eq!(criteria.price_range, PriceBucket::High.range());
    }

    #[test]
    fn all_sentinel_is_case_insensitive() {
        assert_eq!(TypeFilter::from("all"), TypeFilter::All);
        assert_eq!(TypeFilter::from("ALL"), TypeFilter::All);
        assert_eq!(TypeFilter::from("  "), TypeFilter::All);
        assert_eq!(TypeFilter::from("Villa"), TypeFilter::Only("Villa".into()));
    }

    #[test]
    fn rejects_inverted_and_nan_ranges() {
        assert_eq!(
            PriceRange::new(10.0, 5.0).validate(),
            Err(CriteriaError::InvertedPriceRange {
                min: 10.0,
                max: 5.0
            })
        );
        assert_eq!(
            PriceRange::new(f64::NAN, 5.0).validate(),
            Err(CriteriaError::NonNumericPriceBound)
        );
        assert!(PriceRange::new(5.0, 5.0).validate().is_ok());
    }

    #[test]
    fn criteria_deserialize_with_defaults() {
        let criteria: FilterCriteria =
            serde_json::from_value(json!({ "type": "house" })).unwrap();

        assert_eq!(criteria.location, None);
        assert_eq!(criteria.property_type, TypeFilter::Only("house".into()));
        assert_eq!(criteria.price_range, PriceRange::default());

        let criteria: FilterCriteria = serde_json::from_value(json!({
            "location": "york",
            "type": "all",
            "priceRange": { "min": 1.0, "max": 2.0 }
        }))
        .unwrap();

        assert_eq!(criteria.location.as_deref(), Some("york"));
        assert_eq!(criteria.property_type, TypeFilter::All);
        assert_eq!(criteria.price_range, PriceRange::new(1.0, 2.0));
    }
}

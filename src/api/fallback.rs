use crate::api::traits::PropertySource;
use crate::models::{Property, PropertyId};
use async_trait::async_trait;
use serde_json::Map;

/// Listings served whenever the remote endpoint is unavailable
pub fn fallback_properties() -> Vec<Property> {
    vec![
        Property {
            id: PropertyId::Number(1),
            title: Some("Modern Apartment in Downtown".to_string()),
            location: Some("New York, NY".to_string()),
            price: Some(450_000.0),
            property_type: Some("apartment".to_string()),
            bedrooms: 2,
            bathrooms: 2,
            area: 1200.0,
            image: Some("https://images.unsplash.com/photo-1560448204-e02f11c3d0e2?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=870&q=80".to_string()),
            description: Some("Beautiful modern apartment in the heart of downtown with amazing city views.".to_string()),
            extra: Map::new(),
        },
        Property {
            id: PropertyId::Number(2),
            title: Some("Luxury Villa with Pool".to_string()),
            location: Some("Los Angeles, CA".to_string()),
            price: Some(1_200_000.0),
            property_type: Some("villa".to_string()),
            bedrooms: 4,
            bathrooms: 3,
            area: 3200.0,
            image: Some("https://images.unsplash.com/photo-1613977257363-707ba9348227?ixlib=rb-4.0.3&ixid=MnwxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8&auto=format&fit=crop&w=870&q=80".to_string()),
            description: Some("Stunning luxury villa with private pool and panoramic views of the city.".to_string()),
            extra: Map::new(),
        },
    ]
}

/// Look a listing up in the fallback set by its textual id
pub fn find_fallback(id: &str) -> Option<Property> {
    fallback_properties()
        .into_iter()
        .find(|property| property.id.matches(id))
}

/// In-memory listing source
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    properties: Vec<Property>,
}

impl StaticSource {
    pub fn new(properties: Vec<Property>) -> Self {
        Self { properties }
    }

    /// Source serving the fallback listings
    pub fn fallback() -> Self {
        Self::new(fallback_properties())
    }
}

#[async_trait]
impl PropertySource for StaticSource {
    async fn fetch_all(&self) -> Vec<Property> {
        self.properties.clone()
    }

    async fn fetch_one(&self, id: &str) -> Option<Property> {
        self.properties
            .iter()
            .find(|property| property.id.matches(id))
            .cloned()
    }

    fn source_name(&self) -> &'static str {
        "static"
    }
}

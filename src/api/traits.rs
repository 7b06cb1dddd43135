use crate::filters::{apply_filters, FilterCriteria};
use crate::models::Property;
use async_trait::async_trait;
use tracing::{debug, warn};

/// Common trait for anything that can hand out property listings.
///
/// Implementations never fail: when their backing store is unavailable they
/// degrade to fallback data instead of returning an error.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Every listing the source knows about
    async fn fetch_all(&self) -> Vec<Property>;

    /// A single listing by id, or `None` when it cannot be found
    async fn fetch_one(&self, id: &str) -> Option<Property>;

    /// Get the name of the listing source
    fn source_name(&self) -> &'static str;

    /// Fetch everything, then narrow it down client-side.
    /// Yields an empty list when the criteria themselves are unusable.
    async fn search(&self, criteria: &FilterCriteria) -> Vec<Property> {
        if let Err(e) = criteria.validate() {
            warn!("Error searching {} properties: {}", self.source_name(), e);
            return Vec::new();
        }

        let all = self.fetch_all().await;
        let matches = apply_filters(&all, criteria);
        debug!("{} of {} properties match {:?}", matches.len(), all.len(), criteria);
        matches
    }
}

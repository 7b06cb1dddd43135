use crate::api::PropertySource;
use crate::filters::{apply_filters, FilterCriteria, PriceBucket, TypeFilter};
use crate::models::Property;
use tracing::{debug, info, warn};

/// Where the listing page is in its load cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed(String),
}

/// Handle for one load request. Only the most recently issued ticket may
/// install its result; older ones are treated as stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

/// State behind the listings page: everything loaded, the active criteria,
/// and the subset currently shown.
#[derive(Debug, Clone)]
pub struct PropertyBrowser {
    properties: Vec<Property>,
    visible: Vec<Property>,
    criteria: FilterCriteria,
    state: LoadState,
    latest_ticket: u64,
}

impl Default for PropertyBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl PropertyBrowser {
    pub fn new() -> Self {
        Self {
            properties: Vec::new(),
            visible: Vec::new(),
            criteria: FilterCriteria::default(),
            state: LoadState::Loading,
            latest_ticket: 0,
        }
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn properties(&self) -> &[Property] {
        &self.properties
    }

    /// Listings matching the current criteria
    pub fn visible(&self) -> &[Property] {
        &self.visible
    }

    /// Start a new load, superseding any still in flight
    pub fn begin_load(&mut self) -> LoadTicket {
        self.latest_ticket += 1;
        self.state = LoadState::Loading;
        LoadTicket(self.latest_ticket)
    }

    /// Install loaded listings. Returns `false` and changes nothing when the
    /// ticket has been superseded.
    pub fn finish_load(&mut self, ticket: LoadTicket, properties: Vec<Property>) -> bool {
        if !self.is_current(ticket) {
            debug!("Ignoring stale load {:?}", ticket);
            return false;
        }

        info!("Loaded {} properties", properties.len());
        self.properties = properties;
        self.state = LoadState::Ready;
        self.refilter();
        true
    }

    /// Record a failed load. The page is left empty.
    ///
    /// `load` never gets here since a `PropertySource` degrades instead of
    /// failing; this is for callers that fetch through their own channel and
    /// report the outcome with the ticket from `begin_load`.
    pub fn fail_load(&mut self, ticket: LoadTicket, message: impl Into<String>) -> bool {
        if !self.is_current(ticket) {
            debug!("Ignoring stale failure for {:?}", ticket);
            return false;
        }

        let message = message.into();
        warn!("Loading properties failed: {}", message);
        self.properties.clear();
        self.visible.clear();
        self.state = LoadState::Failed(message);
        true
    }

    /// Fetch everything from `source` and show it under the current criteria
    pub async fn load<S: PropertySource + ?Sized>(&mut self, source: &S) {
        let ticket = self.begin_load();
        debug!("Fetching properties from {}", source.source_name());
        let properties = source.fetch_all().await;
        self.finish_load(ticket, properties);
    }

    pub fn set_location(&mut self, location: impl Into<String>) {
        self.criteria.location = Some(location.into());
        self.refilter();
    }

    pub fn set_type(&mut self, property_type: impl Into<TypeFilter>) {
        self.criteria.property_type = property_type.into();
        self.refilter();
    }

    pub fn select_price_bucket(&mut self, bucket: PriceBucket) {
        self.criteria.price_range = bucket.range();
        self.refilter();
    }

    pub fn clear_filters(&mut self) {
        self.criteria = FilterCriteria::default();
        self.refilter();
    }

    /// Header line shown above the listing grid
    pub fn summary(&self) -> String {
        match self.state {
            LoadState::Loading => "Loading...".to_string(),
            _ => format!("{} properties found", self.visible.len()),
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.latest_ticket
    }

    fn refilter(&mut self) {
        self.visible = apply_filters(&self.properties, &self.criteria);
        debug!("Filtered properties: {} visible", self.visible.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{fallback_properties, StaticSource};

    #[test]
    fn starts_loading_with_default_criteria() {
        let browser = PropertyBrowser::new();

        assert_eq!(browser.state(), &LoadState::Loading);
        assert_eq!(browser.criteria(), &FilterCriteria::default());
        assert!(browser.visible().is_empty());
        assert_eq!(browser.summary(), "Loading...");
    }

    #[tokio::test]
    async fn load_shows_everything_until_filtered() {
        let mut browser = PropertyBrowser::new();
        browser.load(&StaticSource::fallback()).await;

        assert_eq!(browser.state(), &LoadState::Ready);
        assert_eq!(browser.visible(), fallback_properties().as_slice());
        assert_eq!(browser.summary(), "2 properties found");
    }

    #[tokio::test]
    async fn filter_changes_recompute_visible_listings() {
        let mut browser = PropertyBrowser::new();
        browser.load(&StaticSource::fallback()).await;

        browser.set_type("villa");
        assert_eq!(browser.visible().len(), 1);
        assert_eq!(browser.visible()[0].id.to_string(), "2");

        browser.set_type("all");
        browser.set_location("new york");
        assert_eq!(browser.visible().len(), 1);
        assert_eq!(browser.visible()[0].id.to_string(), "1");

        browser.select_price_bucket(PriceBucket::High);
        assert!(browser.visible().is_empty());
        assert_eq!(browser.summary(), "0 properties found");

        browser.clear_filters();
        assert_eq!(browser.visible().len(), 2);
        assert_eq!(browser.criteria(), &FilterCriteria::default());
    }

    #[test]
    fn filters_set_before_load_apply_once_data_arrives() {
        let mut browser = PropertyBrowser::new();
        browser.select_price_bucket(PriceBucket::Medium);

        let ticket = browser.begin_load();
        assert!(browser.finish_load(ticket, fallback_properties()));
        assert_eq!(browser.visible().len(), 1);
        assert_eq!(browser.visible()[0].effective_price(), 450_000.0);
    }

    #[test]
    fn stale_results_are_ignored() {
        let mut browser = PropertyBrowser::new();

        let first = browser.begin_load();
        let second = browser.begin_load();

        assert!(browser.finish_load(second, fallback_properties()));
        assert!(!browser.finish_load(first, Vec::new()));
        assert!(!browser.fail_load(first, "timed out"));

        assert_eq!(browser.state(), &LoadState::Ready);
        assert_eq!(browser.properties().len(), 2);
    }

    #[tokio::test]
    async fn reload_through_a_source_recovers_from_a_reported_failure() {
        let mut browser = PropertyBrowser::new();
        let ticket = browser.begin_load();
        browser.fail_load(ticket, "connection reset");

        browser.load(&StaticSource::new(Vec::new())).await;

        assert_eq!(browser.state(), &LoadState::Ready);
        assert_eq!(browser.summary(), "0 properties found");
    }

    #[test]
    fn failed_load_empties_the_page() {
        let mut browser = PropertyBrowser::new();
        let ticket = browser.begin_load();
        browser.finish_load(ticket, fallback_properties());

        let retry = browser.begin_load();
        assert!(browser.fail_load(retry, "Failed to load properties"));

        assert_eq!(
            browser.state(),
            &LoadState::Failed("Failed to load properties".to_string())
        );
        assert!(browser.properties().is_empty());
        assert!(browser.visible().is_empty());
        assert_eq!(browser.summary(), "0 properties found");
    }
}

use crate::models::settings::Settings;

use super::mock::MockSource;
use super::nessie::NessieSource;
use super::traits::TransactionSource;

/// Ordered list of transaction sources. Earlier sources are preferred;
/// later ones are fallbacks.
pub struct SourceRegistry {
    sources: Vec<Box<dyn TransactionSource>>,
}

impl SourceRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { sources: Vec::new() }
    }

    /// The banking API first (only when credentials are configured),
    /// then the offline generator.
    pub fn new_with_defaults(settings: &Settings) -> Self {
        let mut registry = Self::new();

        if let (Some(key), Some(customer)) = (&settings.nessie_api_key, &settings.nessie_customer_id) {
            registry.register(Box::new(NessieSource::new(
                settings.nessie_base_url.clone(),
                key.clone(),
                customer.clone(),
            )));
        }

        registry.register(Box::new(MockSource::new()));
        registry
    }

    pub fn register(&mut self, source: Box<dyn TransactionSource>) {
        self.sources.push(source);
    }

    /// All sources in priority order.
    pub fn sources(&self) -> Vec<&dyn TransactionSource> {
        self.sources.iter().map(|s| s.as_ref()).collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

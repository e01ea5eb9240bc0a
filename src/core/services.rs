//! Unified service container for lineseek
//!
//! Provides shared access to the registry and the query executor.

use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::registry::IndexRegistry;
use crate::core::search::SearchService;
use std::sync::Arc;

/// Unified services container
///
/// Built once at startup; handlers clone the `Arc`s they need.
#[derive(Clone)]
pub struct Services {
    /// Registry of indexes discovered at startup
    pub registry: Arc<IndexRegistry>,

    /// Query executor
    pub search: Arc<SearchService>,

    /// Application configuration
    pub config: Arc<Config>,
}

impl Services {
    /// Create services from configuration.
    ///
    /// Runs index discovery; an unreadable data root fails startup.
    pub fn new(config: Config) -> Result<Self> {
        let registry = Arc::new(IndexRegistry::discover(&config.storage.data_root)?);

        let search = Arc::new(SearchService::new(
            config.search.default_size,
            config.search.max_size,
            config.search.max_from,
            config.search.snippet_max_chars,
        ));

        Ok(Self {
            registry,
            search,
            config: Arc::new(config),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::LineseekError;
    use tempfile::TempDir;

    #[test]
    fn test_services_creation() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_root = temp_dir.path().to_path_buf();

        let services = Services::new(config).unwrap();

        assert!(services.registry.is_empty());
        assert_eq!(services.config.search.default_size, 25);
    }

    #[test]
    fn test_services_unreadable_data_root_fails() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_root = temp_dir.path().join("missing");

        match Services::new(config) {
            Err(LineseekError::ConfigError(_)) => {}
            other => panic!("Expected ConfigError, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_services_clone_shares_state() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = Config::default();
        config.storage.data_root = temp_dir.path().to_path_buf();

        let services = Services::new(config).unwrap();
        let cloned = services.clone();

        assert!(Arc::ptr_eq(&services.registry, &cloned.registry));
        assert!(Arc::ptr_eq(&services.search, &cloned.search));
        assert!(Arc::ptr_eq(&services.config, &cloned.config));
    }
}

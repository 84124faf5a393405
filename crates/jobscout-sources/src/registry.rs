//! In-memory source definition registry.

use crate::{
    builtin,
    definition::SourceDefinition,
    error::{Result, SourceError},
};
use jobscout_core::Source;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tracing::debug;

/// In-memory cache of source definitions.
///
/// The registry holds one definition per supported job board and hands out
/// clones for extraction runs. It is cheap to clone and safe to share
/// across tasks.
#[derive(Clone)]
pub struct SourceRegistry {
    /// Cached source definitions, indexed by source
    definitions: Arc<RwLock<HashMap<Source, SourceDefinition>>>,
}

impl SourceRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            definitions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a registry populated with the built-in definitions.
    #[must_use]
    pub fn builtin() -> Self {
        let registry = Self::new();

        for definition in builtin::definitions() {
            if let Err(err) = registry.insert(definition) {
                tracing::error!(%err, "rejected built-in source definition");
            }
        }

        registry
    }

    /// Get a source definition.
    ///
    /// # Errors
    /// Returns error if no definition is registered for the source.
    pub fn get(&self, source: Source) -> Result<SourceDefinition> {
        let cache = self
            .definitions
            .read()
            .expect("acquire read lock on definitions");

        cache
            .get(&source)
            .cloned()
            .ok_or(SourceError::NotFound { source })
    }

    /// Get all registered definitions.
    #[must_use]
    pub fn get_all(&self) -> Vec<SourceDefinition> {
        let cache = self
            .definitions
            .read()
            .expect("acquire read lock on definitions");

        cache.values().cloned().collect()
    }

    /// Get the number of registered definitions.
    #[must_use]
    pub fn count(&self) -> usize {
        let cache = self
            .definitions
            .read()
            .expect("acquire read lock on definitions");

        cache.len()
    }

    /// Check if a definition is registered for the source.
    #[must_use]
    pub fn contains(&self, source: Source) -> bool {
        let cache = self
            .definitions
            .read()
            .expect("acquire read lock on definitions");

        cache.contains_key(&source)
    }

    /// Add or replace a source definition.
    ///
    /// This is useful for testing or for overriding a selector set without
    /// a rebuild.
    ///
    /// # Errors
    /// Returns error if the definition fails validation.
    pub fn insert(&self, definition: SourceDefinition) -> Result<()> {
        // Validate before inserting
        definition.validate()?;

        let mut cache = self
            .definitions
            .write()
            .expect("acquire write lock on definitions");

        let source = definition.source;
        cache.insert(source, definition);

        debug!(%source, "inserted source definition");

        Ok(())
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::SelectorSet;

    fn create_test_definition(source: Source) -> SourceDefinition {
        SourceDefinition {
            source,
            search_url: "https://example.com/jobs?q={keywords}&p={page}".to_string(),
            link_required: false,
            selectors: SelectorSet {
                results_ready: "ul.results".to_string(),
                item: "li.job".to_string(),
                title: "h3.title".to_string(),
                company: "h4.company".to_string(),
                link: None,
                location: None,
                posted_date: None,
                experience: None,
            },
        }
    }

    #[test]
    fn test_registry_new() {
        let registry = SourceRegistry::new();
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_registry_builtin() {
        let registry = SourceRegistry::builtin();
        assert_eq!(registry.count(), Source::all().len());

        for source in Source::all() {
            assert!(registry.contains(source), "missing {source}");
        }
    }

    #[test]
    fn test_registry_insert_and_get() {
        let registry = SourceRegistry::new();
        registry
            .insert(create_test_definition(Source::Naukri))
            .expect("insert definition");

        let retrieved = registry.get(Source::Naukri).expect("get definition");
        assert_eq!(retrieved.source, Source::Naukri);
        assert_eq!(retrieved.selectors.title, "h3.title");
    }

    #[test]
    fn test_registry_get_nonexistent() {
        let registry = SourceRegistry::new();

        let result = registry.get(Source::Indeed);
        assert!(matches!(
            result,
            Err(SourceError::NotFound {
                source: Source::Indeed
            })
        ));
    }

    #[test]
    fn test_registry_insert_validates() {
        let registry = SourceRegistry::new();

        let mut definition = create_test_definition(Source::Linkedin);
        definition.search_url = String::new();

        assert!(registry.insert(definition).is_err());
        assert_eq!(registry.count(), 0);
    }

    #[test]
    fn test_registry_insert_replaces() {
        let registry = SourceRegistry::new();
        registry
            .insert(create_test_definition(Source::Naukri))
            .expect("insert definition");

        let mut replacement = create_test_definition(Source::Naukri);
        replacement.selectors.title = "a.job-title".to_string();
        registry.insert(replacement).expect("replace definition");

        assert_eq!(registry.count(), 1);
        let retrieved = registry.get(Source::Naukri).expect("get definition");
        assert_eq!(retrieved.selectors.title, "a.job-title");
    }

    #[test]
    fn test_registry_get_all() {
        let registry = SourceRegistry::new();
        registry
            .insert(create_test_definition(Source::Linkedin))
            .expect("insert linkedin");
        registry
            .insert(create_test_definition(Source::Timesjobs))
            .expect("insert timesjobs");

        assert_eq!(registry.get_all().len(), 2);
    }
}

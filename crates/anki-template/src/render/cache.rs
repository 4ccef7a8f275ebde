//! Shared cache of parsed templates.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard};

use tracing::trace;

use crate::parser::{ParseError, Template, parse_template};

/// Parsed templates keyed by their source text.
///
/// Lookups take a read lock; a miss parses outside any lock and then takes
/// the write lock to insert. Two threads missing on the same text at once
/// both parse it and the first insert wins. Parse failures are not cached.
#[derive(Debug, Default)]
pub struct TemplateCache {
    templates: RwLock<HashMap<String, Arc<Template>>>,
}

impl TemplateCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the parsed template for `source`, parsing it on first use.
    pub fn get_or_parse(&self, source: &str) -> Result<Arc<Template>, ParseError> {
        if let Some(template) = self.read().get(source) {
            trace!(len = source.len(), "template cache hit");
            return Ok(Arc::clone(template));
        }

        trace!(len = source.len(), "template cache miss");
        let parsed = Arc::new(parse_template(source)?);
        let mut templates = self.templates.write().unwrap_or_else(PoisonError::into_inner);
        let entry = templates.entry(source.to_string()).or_insert(parsed);
        Ok(Arc::clone(entry))
    }

    /// Number of cached templates.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every cached template.
    pub fn clear(&self) {
        self.templates
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Template>>> {
        // The map is never left half-updated, so a poisoned lock is still usable.
        self.templates.read().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn test_reuses_parsed_templates() {
        let cache = TemplateCache::new();
        let first = cache.get_or_parse("{{Front}}").unwrap();
        let second = cache.get_or_parse("{{Front}}").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_does_not_cache_failures() {
        let cache = TemplateCache::new();
        assert!(cache.get_or_parse("{{#Open}}").is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_clear_empties_the_cache() {
        let cache = TemplateCache::new();
        cache.get_or_parse("a").unwrap();
        cache.get_or_parse("b").unwrap();
        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_across_threads() {
        let cache = Arc::new(TemplateCache::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.get_or_parse("{{#A}}{{A}}{{/A}}").unwrap())
            })
            .collect();
        let parsed: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(cache.len(), 1);
        assert!(parsed.iter().all(|t| **t == *parsed[0]));
    }
}

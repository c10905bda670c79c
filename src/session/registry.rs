//! Per-build class name registry.
//!
//! The registry is the single source of truth for what a class is renamed
//! to. Markup, script and stylesheet passes run at different pipeline stages
//! on different text blobs; routing every rename through one memo table is
//! what makes them agree on the final name of every class.

use rustc_hash::FxHashMap;
use std::sync::Arc;

/// Memoizing map from raw class name to its namespaced form.
///
/// Resolved names are stored as `Arc<str>`: repeated lookups hand back
/// clones of the same allocation, so a name resolved during the stylesheet
/// pass is literally the same string the markup pass sees later.
///
/// Not thread-safe by design. One build session owns one registry and runs
/// its transforms sequentially; concurrent builds each construct their own.
#[derive(Debug)]
pub struct ClassRegistry {
    prefix: Box<str>,
    names: FxHashMap<Box<str>, Arc<str>>,
}

impl ClassRegistry {
    /// Create a registry applying `prefix` to every resolved name.
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.into(),
            names: FxHashMap::default(),
        }
    }

    /// Resolve a raw class name to its namespaced form.
    ///
    /// First call for a given name computes `prefix + name` and stores it;
    /// every later call returns the stored value. Any string is accepted -
    /// the text-scanning passes are what enforce the identifier shape.
    pub fn resolve(&mut self, raw: &str) -> Arc<str> {
        if let Some(name) = self.names.get(raw) {
            return name.clone();
        }
        let name: Arc<str> = format!("{}{}", self.prefix, raw).into();
        self.names.insert(raw.into(), name.clone());
        name
    }

    /// An empty prefix means "no prefixing": callers short-circuit their
    /// rewrite passes entirely rather than rewriting names to themselves.
    #[inline]
    pub fn is_inert(&self) -> bool {
        self.prefix.is_empty()
    }

    /// Number of distinct class names seen so far.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

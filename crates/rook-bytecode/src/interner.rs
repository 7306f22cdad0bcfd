//! Cross-load interning of constant strings.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

/// Shared cache of constant strings across module loads.
///
/// Purely an allocation optimization: a hit shares one `Arc<str>` between
/// modules, a miss allocates fresh. Correctness never depends on the cache;
/// a poisoned lock degrades to fresh allocation.
///
/// Cloning the cache clones the handle, not the contents.
#[derive(Clone, Debug, Default)]
pub struct StringCache {
    inner: Arc<Mutex<HashSet<Arc<str>>>>,
}

impl StringCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intern a string, returning a shared handle.
    pub fn intern(&self, s: &str) -> Arc<str> {
        let Ok(mut set) = self.inner.lock() else {
            return Arc::from(s);
        };
        if let Some(existing) = set.get(s) {
            return Arc::clone(existing);
        }
        let interned: Arc<str> = Arc::from(s);
        set.insert(Arc::clone(&interned));
        interned
    }

    /// Number of distinct strings cached.
    pub fn len(&self) -> usize {
        self.inner.lock().map(|set| set.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

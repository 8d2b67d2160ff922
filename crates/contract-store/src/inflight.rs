//! Keyed in-flight operation registry
//!
//! Replaces a per-instance boolean "is generating" flag with a set of
//! operation keys shared across callers: the guard releases its key on drop,
//! so a second caller is refused for exactly as long as the first operation
//! is actually running.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct InFlightRegistry {
    keys: Arc<Mutex<HashSet<String>>>,
}

/// Releases its key when dropped
pub struct InFlightGuard {
    keys: Arc<Mutex<HashSet<String>>>,
    key: String,
}

impl InFlightRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`; `None` means an operation for it is already running
    pub fn try_begin(&self, key: &str) -> Option<InFlightGuard> {
        let mut keys = self.keys.lock().expect("in-flight registry poisoned");
        if keys.insert(key.to_string()) {
            Some(InFlightGuard {
                keys: Arc::clone(&self.keys),
                key: key.to_string(),
            })
        } else {
            None
        }
    }

    pub fn is_in_flight(&self, key: &str) -> bool {
        self.keys
            .lock()
            .expect("in-flight registry poisoned")
            .contains(key)
    }
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.keys
            .lock()
            .expect("in-flight registry poisoned")
            .remove(&self.key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_begin_is_refused_while_guard_lives() {
        let registry = InFlightRegistry::new();

        let guard = registry.try_begin("c-1");
        assert!(guard.is_some());
        assert!(registry.try_begin("c-1").is_none());
        assert!(registry.is_in_flight("c-1"));

        // Independent keys do not interfere
        assert!(registry.try_begin("c-2").is_some());
    }

    #[test]
    fn test_drop_releases_the_key() {
        let registry = InFlightRegistry::new();
        {
            let _guard = registry.try_begin("c-1").unwrap();
            assert!(registry.is_in_flight("c-1"));
        }
        assert!(!registry.is_in_flight("c-1"));
        assert!(registry.try_begin("c-1").is_some());
    }

    #[test]
    fn test_registry_is_shared_across_clones() {
        let registry = InFlightRegistry::new();
        let other = registry.clone();

        let _guard = registry.try_begin("c-1").unwrap();
        assert!(other.try_begin("c-1").is_none());
    }
}

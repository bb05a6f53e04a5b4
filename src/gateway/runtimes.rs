use std::sync::Arc;

use parking_lot::RwLock;

use super::RuntimeCapability;

/// Process-wide copy of the remote capability list.
///
/// Empty until the first successful fetch, then kept for the lifetime of
/// the process. Concurrent misses may each store a freshly fetched list;
/// the lists are equivalent, so the last write wins.
#[derive(Default)]
pub struct RuntimeCache {
    runtimes: RwLock<Option<Arc<[RuntimeCapability]>>>,
}

impl RuntimeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<[RuntimeCapability]>> {
        self.runtimes.read().clone()
    }

    pub fn store(&self, runtimes: Vec<RuntimeCapability>) -> Arc<[RuntimeCapability]> {
        let runtimes: Arc<[RuntimeCapability]> = runtimes.into();
        *self.runtimes.write() = Some(runtimes.clone());
        runtimes
    }

    pub fn is_populated(&self) -> bool {
        self.runtimes.read().is_some()
    }

    /// First entry named `language`, else the first listing it as an alias.
    pub fn select(runtimes: &[RuntimeCapability], language: &str) -> Option<RuntimeCapability> {
        runtimes
            .iter()
            .find(|r| r.language == language)
            .or_else(|| {
                runtimes
                    .iter()
                    .find(|r| r.aliases.iter().any(|alias| alias == language))
            })
            .cloned()
    }
}

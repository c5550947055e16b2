//! Cache types for Sanity query results.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use serde_json::Value;
use tokio::sync::OnceCell;

use crate::sanity::SanityError;

/// Canonical key for a `(query id, parameters)` pair.
///
/// Parameters come from a `BTreeMap`, so two calls with the same
/// parameters in a different field order produce the same key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct CacheKey(String);

impl CacheKey {
    pub(crate) fn new(id: &str, params: &BTreeMap<String, Value>) -> Result<Self, SanityError> {
        Ok(Self(format!("{id}:{}", serde_json::to_string(params)?)))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A query result together with the time it was fetched.
#[derive(Debug, Clone)]
pub struct CachedResult {
    pub value: Arc<Value>,
    fetched_at: Instant,
}

impl CachedResult {
    pub fn new(value: Arc<Value>) -> Self {
        Self {
            value,
            fetched_at: Instant::now(),
        }
    }

    /// Whether the result is younger than `revalidate`.
    pub fn is_fresh(&self, revalidate: Duration) -> bool {
        self.fetched_at.elapsed() < revalidate
    }
}

/// Per-request memo of query results.
///
/// Each key maps to a cell that is initialised by the first caller; callers
/// arriving while the fetch is in flight wait on the same cell. A failed
/// fetch leaves the cell empty so a later call can try again.
#[derive(Debug, Default)]
pub struct RequestMemo {
    cells: Mutex<HashMap<CacheKey, Arc<OnceCell<Arc<Value>>>>>,
}

impl RequestMemo {
    pub fn cell(&self, key: &CacheKey) -> Arc<OnceCell<Arc<Value>>> {
        let mut cells = self.cells.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cells.entry(key.clone()).or_default())
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.cells
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

//! Per-field in-flight markers for assistant requests.
//!
//! A field can have at most one request running; different fields run side by
//! side. There is no cancellation: a running request is only ever released
//! when its guard drops.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error, PartialEq)]
pub enum LoadingError {
    #[error("A request for '{0}' is already running")]
    Busy(String),
}

#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    in_flight: Arc<Mutex<BTreeSet<String>>>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BTreeSet<String>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn begin(&self, field: &str) -> Result<LoadingGuard, LoadingError> {
        if !self.lock().insert(field.to_string()) {
            return Err(LoadingError::Busy(field.to_string()));
        }
        debug!(field, "Assistant request started");
        Ok(LoadingGuard {
            tracker: self.clone(),
            field: field.to_string(),
        })
    }

    #[cfg(test)]
    pub fn is_loading(&self, field: &str) -> bool {
        self.lock().contains(field)
    }

    /// Sorted keys of everything currently running.
    pub fn in_flight(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }
}

/// Marks a field busy until dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    tracker: LoadingTracker,
    field: String,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.tracker.lock().remove(&self.field);
        debug!(field = %self.field, "Assistant request finished");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_field_is_busy_until_guard_drops() {
        let tracker = LoadingTracker::new();
        let guard = tracker.begin("about").unwrap();
        assert_eq!(
            tracker.begin("about").unwrap_err(),
            LoadingError::Busy("about".into())
        );
        assert!(tracker.is_loading("about"));

        drop(guard);
        assert!(!tracker.is_loading("about"));
        assert!(tracker.begin("about").is_ok());
    }

    #[test]
    fn test_different_fields_run_together() {
        let tracker = LoadingTracker::new();
        let _a = tracker.begin("exp-desc-1").unwrap();
        let _b = tracker.begin("suggest-about").unwrap();
        assert_eq!(tracker.in_flight(), vec!["exp-desc-1", "suggest-about"]);
    }

    #[tokio::test]
    async fn test_guard_released_when_task_finishes() {
        let tracker = LoadingTracker::new();
        let guard = tracker.begin("analyze").unwrap();
        let handle = tokio::spawn(async move {
            let _guard = guard;
            tokio::task::yield_now().await;
        });
        handle.await.unwrap();
        assert!(tracker.in_flight().is_empty());
    }
}

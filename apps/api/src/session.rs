//! The single in-memory editing session.
//!
//! Handlers never mutate the session in place: [`SessionStore::update`] builds
//! a whole new [`Session`] from the current one and swaps it in, so readers
//! only ever see complete values. Nothing is persisted; a restart starts over
//! from the built-in example.

use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::RwLock;
use tracing::debug;

use crate::gate::GateState;
use crate::layout::{compose, Composition, FitCache, TextMeasurer};
use crate::models::{Language, LayoutConfig, ResumeData, ThemeSelection};
use crate::render::svg::{to_svg, AssetMap};
use crate::render::{render_with, RenderContext};

/// The last document shown on screen. Export rasterizes exactly this.
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPreview {
    pub composition: Composition,
    pub svg: String,
    /// Whether a deferred text-fit recheck ran.
    pub rechecked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub data: ResumeData,
    pub selection: ThemeSelection,
    pub layout: LayoutConfig,
    pub language: Language,
    pub gate: GateState,
    #[serde(skip)]
    pub preview: Option<Arc<ComposedPreview>>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            data: ResumeData::example(),
            selection: ThemeSelection::default(),
            layout: LayoutConfig::default(),
            language: Language::default(),
            gate: GateState::Idle,
            preview: None,
        }
    }
}

impl Session {
    /// True when both sessions would render the same document.
    pub fn same_document(&self, other: &Session) -> bool {
        self.data == other.data
            && self.selection == other.selection
            && self.layout == other.layout
            && self.language == other.language
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<Session>>,
}

impl SessionStore {
    pub fn new(session: Session) -> Self {
        Self {
            inner: Arc::new(RwLock::new(session)),
        }
    }

    pub async fn snapshot(&self) -> Session {
        self.inner.read().await.clone()
    }

    /// Replaces the session with `f(current)`. On error the current value is
    /// kept. A change to anything that affects rendering drops the stored
    /// preview, since it no longer matches the screen.
    pub async fn update<E>(&self, f: impl FnOnce(&Session) -> Result<Session, E>) -> Result<Session, E> {
        let mut guard = self.inner.write().await;
        let mut next = f(&*guard)?;
        if next.preview.is_some() && !next.same_document(&*guard) {
            next.preview = None;
        }
        *guard = next.clone();
        Ok(next)
    }

    /// Composes the current document, waits `settle` and recomposes once if
    /// any fitted text could not be measured, then stores and returns it.
    pub async fn refresh_preview(
        &self,
        measurer: &dyn TextMeasurer,
        scan_service: &str,
        settle: Duration,
    ) -> Arc<ComposedPreview> {
        let current = self.snapshot().await;
        let mut composition = compose_session(&current, measurer, scan_service);
        let mut rechecked = false;

        if composition.pending_rechecks > 0 {
            debug!(pending = composition.pending_rechecks, "Deferring text-fit recheck");
            tokio::time::sleep(settle).await;
            composition = compose_session(&current, measurer, scan_service);
            rechecked = true;
        }

        let preview = Arc::new(ComposedPreview {
            svg: to_svg(&composition, &AssetMap::new()),
            composition,
            rechecked,
        });

        let stored = Arc::clone(&preview);
        let _ = self
            .update(|s| -> Result<Session, std::convert::Infallible> {
                let mut next = s.clone();
                // An edit that landed meanwhile wins; keep its (empty) preview.
                if s.same_document(&current) {
                    next.preview = Some(stored);
                }
                Ok(next)
            })
            .await;
        preview
    }
}

/// One composition pass over the session's current document, with a fresh
/// fit cache.
pub fn compose_session(session: &Session, measurer: &dyn TextMeasurer, scan_service: &str) -> Composition {
    let ctx = RenderContext::new(session.selection.accent, session.language, scan_service);
    let doc = render_with(&session.data, session.selection.theme, &session.layout, &ctx);
    compose(&doc, measurer, &mut FitCache::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FontSpec, StaticMetrics};
    use crate::models::resume::ScalarField;
    use crate::render::DEFAULT_SCAN_SERVICE;

    #[derive(Debug, PartialEq)]
    struct Rejected;

    #[tokio::test]
    async fn test_failed_update_keeps_previous_value() {
        let store = SessionStore::default();
        let before = store.snapshot().await;
        let result = store.update(|_| Err::<Session, _>(Rejected)).await;
        assert_eq!(result.unwrap_err(), Rejected);
        assert_eq!(store.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_update_swaps_whole_value() {
        let store = SessionStore::default();
        let held = store.snapshot().await;
        store
            .update(|s| {
                Ok::<_, Rejected>(Session {
                    data: s.data.with_field(ScalarField::FullName, "Ann Lee".into()),
                    ..s.clone()
                })
            })
            .await
            .unwrap();
        assert_eq!(store.snapshot().await.data.full_name, "Ann Lee");
        assert_ne!(held.data.full_name, "Ann Lee", "earlier snapshots are untouched");
    }

    #[tokio::test]
    async fn test_preview_is_stored_and_dropped_on_edit() {
        let store = SessionStore::default();
        let preview = store
            .refresh_preview(&StaticMetrics, DEFAULT_SCAN_SERVICE, Duration::from_millis(100))
            .await;
        assert!(preview.svg.starts_with("<svg"));
        assert!(!preview.rechecked);
        assert!(store.snapshot().await.preview.is_some());

        // Gate moves do not touch the document.
        store
            .update(|s| {
                Ok::<_, Rejected>(Session {
                    gate: GateState::Idle,
                    ..s.clone()
                })
            })
            .await
            .unwrap();
        assert!(store.snapshot().await.preview.is_some());

        store
            .update(|s| {
                Ok::<_, Rejected>(Session {
                    layout: s.layout.with_scale(1.1),
                    ..s.clone()
                })
            })
            .await
            .unwrap();
        assert!(store.snapshot().await.preview.is_none());
    }

    /// Reports zero width until `ready_at`, the way a web font that has not
    /// loaded yet would.
    struct LateFonts {
        ready_at: tokio::time::Instant,
    }

    impl TextMeasurer for LateFonts {
        fn measure(&self, text: &str, font: &FontSpec) -> f32 {
            if tokio::time::Instant::now() < self.ready_at {
                0.0
            } else {
                StaticMetrics.measure(text, font)
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_deferred_fit_is_rechecked_once_after_settle() {
        let store = SessionStore::default();
        let start = tokio::time::Instant::now();
        let measurer = LateFonts {
            ready_at: start + Duration::from_millis(50),
        };
        let preview = store
            .refresh_preview(&measurer, DEFAULT_SCAN_SERVICE, Duration::from_millis(100))
            .await;
        assert!(preview.rechecked);
        assert!(start.elapsed() >= Duration::from_millis(100));
        assert_eq!(preview.composition.pending_rechecks, 0);
    }
}

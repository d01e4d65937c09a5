//! Single-line text fitting.
//!
//! A fitted text never wraps and never clips: when its natural width exceeds
//! the container, it is shrunk by one uniform factor anchored at its leading
//! edge and vertical centre.

use std::collections::HashMap;

use crate::layout::font_metrics::{FontFamily, FontSpec, FontWeight};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOutcome {
    /// Uniform shrink factor in (0, 1].
    pub scale: f32,
    /// The measurement could not be trusted (zero natural width or a container
    /// that has no width yet). A later recheck should recompute it.
    pub deferred: bool,
}

impl FitOutcome {
    pub const IDENTITY: FitOutcome = FitOutcome {
        scale: 1.0,
        deferred: false,
    };
}

/// Computes the shrink factor so that `scale * natural <= available`.
///
/// Returns exactly 1.0 when the text already fits.
pub fn fit_scale(natural: f32, available: f32) -> FitOutcome {
    if !natural.is_finite() || !available.is_finite() || natural <= 0.0 || available <= 0.0 {
        return FitOutcome {
            scale: 1.0,
            deferred: true,
        };
    }
    if natural <= available {
        return FitOutcome::IDENTITY;
    }
    FitOutcome {
        scale: available / natural,
        deferred: false,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cache
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FitKey {
    text: String,
    family: FontFamily,
    weight: FontWeight,
    size_bits: u32,
    available_bits: u32,
}

/// Memoised fits. An entry is reused only while text, typography and
/// available width are all unchanged, so a change to any of them recomputes.
#[derive(Debug, Default)]
pub struct FitCache {
    entries: HashMap<FitKey, FitOutcome>,
    measurements: usize,
}

impl FitCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached outcome or measures with `natural` and stores the
    /// result. Empty text is never measured. Deferred outcomes are not stored.
    pub fn fit(
        &mut self,
        text: &str,
        font: &FontSpec,
        available: f32,
        natural: impl FnOnce() -> f32,
    ) -> FitOutcome {
        if text.is_empty() {
            return FitOutcome::IDENTITY;
        }
        let key = FitKey {
            text: text.to_string(),
            family: font.family,
            weight: font.weight,
            size_bits: font.size.to_bits(),
            available_bits: available.to_bits(),
        };
        if let Some(hit) = self.entries.get(&key) {
            return *hit;
        }

        self.measurements += 1;
        let outcome = fit_scale(natural(), available);
        if !outcome.deferred {
            self.entries.insert(key, outcome);
        }
        outcome
    }

    /// How many off-screen measurements this cache has performed.
    pub fn measurements(&self) -> usize {
        self.measurements
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NAME: FontSpec = FontSpec::new(FontFamily::Sans, 30.0, FontWeight::Bold);

    #[test]
    fn test_fitting_text_is_not_scaled() {
        assert_eq!(fit_scale(120.0, 200.0), FitOutcome::IDENTITY);
        assert_eq!(fit_scale(200.0, 200.0).scale, 1.0, "exact fit is still 1");
    }

    #[test]
    fn test_overflowing_text_scales_into_container() {
        for (natural, available) in [(300.0_f32, 200.0_f32), (1000.0, 3.0), (200.5, 200.0)] {
            let out = fit_scale(natural, available);
            assert!(out.scale > 0.0 && out.scale < 1.0, "scale out of range: {}", out.scale);
            assert!(
                out.scale * natural <= available + 1e-3,
                "{natural} x {} overflows {available}",
                out.scale
            );
            assert!(!out.deferred);
        }
    }

    #[test]
    fn test_zero_natural_width_is_deferred_not_divided() {
        let out = fit_scale(0.0, 200.0);
        assert_eq!(out.scale, 1.0);
        assert!(out.deferred, "zero width should ask for a recheck");
    }

    #[test]
    fn test_unlaid_container_is_deferred() {
        assert!(fit_scale(50.0, 0.0).deferred);
        assert!(fit_scale(50.0, f32::NAN).deferred);
    }

    #[test]
    fn test_cache_skips_measurement_for_empty_text() {
        let mut cache = FitCache::new();
        let out = cache.fit("", &NAME, 100.0, || panic!("empty text must not be measured"));
        assert_eq!(out, FitOutcome::IDENTITY);
        assert_eq!(cache.measurements(), 0);
    }

    #[test]
    fn test_cache_recomputes_when_width_or_text_changes() {
        let mut cache = FitCache::new();
        cache.fit("Alex Morgan", &NAME, 150.0, || 300.0);
        cache.fit("Alex Morgan", &NAME, 150.0, || 300.0);
        assert_eq!(cache.measurements(), 1, "same inputs should hit the cache");

        let wider = cache.fit("Alex Morgan", &NAME, 300.0, || 300.0);
        assert_eq!(wider.scale, 1.0);
        cache.fit("Alex J. Morgan", &NAME, 300.0, || 340.0);
        assert_eq!(cache.measurements(), 3);
    }

    #[test]
    fn test_cache_does_not_keep_deferred_outcomes() {
        let mut cache = FitCache::new();
        let first = cache.fit("Alex", &NAME, 100.0, || 0.0);
        assert!(first.deferred);
        let second = cache.fit("Alex", &NAME, 100.0, || 200.0);
        assert!(!second.deferred);
        assert!((second.scale - 0.5).abs() < 1e-6);
        assert_eq!(cache.len(), 1);
    }
}

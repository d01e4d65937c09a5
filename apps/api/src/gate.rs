//! Donation prompt shown before every export.
//!
//! A soft nag screen, not access control: an attached slip is stored and never
//! read, and confirming always succeeds after a short simulated delay.

use std::time::Duration;

use bytes::Bytes;
use serde::Serialize;
use thiserror::Error;

use crate::export::ExportKind;
use crate::models::language::{labels, Language};

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum GateState {
    #[default]
    Idle,
    #[serde(rename_all = "camelCase")]
    PromptShown {
        pending: ExportKind,
        #[serde(skip)]
        slip: Option<Bytes>,
    },
    Processing { pending: ExportKind },
}

#[derive(Debug, Error, PartialEq)]
pub enum GateError {
    #[error("Cannot {action} while the gate is {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

impl GateState {
    pub fn name(&self) -> &'static str {
        match self {
            GateState::Idle => "idle",
            GateState::PromptShown { .. } => "promptShown",
            GateState::Processing { .. } => "processing",
        }
    }

    pub fn pending(&self) -> Option<ExportKind> {
        match self {
            GateState::Idle => None,
            GateState::PromptShown { pending, .. } | GateState::Processing { pending } => Some(*pending),
        }
    }

    pub fn has_slip(&self) -> bool {
        matches!(self, GateState::PromptShown { slip: Some(_), .. })
    }

    fn invalid(&self, action: &'static str) -> GateError {
        GateError::InvalidTransition {
            action,
            state: self.name(),
        }
    }

    /// Any export request opens the prompt. Asking again while it is open
    /// swaps the pending export and clears the slip.
    pub fn request(&self, kind: ExportKind) -> Result<GateState, GateError> {
        match self {
            GateState::Idle | GateState::PromptShown { .. } => Ok(GateState::PromptShown {
                pending: kind,
                slip: None,
            }),
            GateState::Processing { .. } => Err(self.invalid("request an export")),
        }
    }

    pub fn attach_slip(&self, slip: Bytes) -> Result<GateState, GateError> {
        match self {
            GateState::PromptShown { pending, .. } => Ok(GateState::PromptShown {
                pending: *pending,
                slip: Some(slip),
            }),
            _ => Err(self.invalid("attach a slip")),
        }
    }

    pub fn dismiss(&self) -> Result<GateState, GateError> {
        match self {
            GateState::PromptShown { .. } => Ok(GateState::Idle),
            _ => Err(self.invalid("dismiss")),
        }
    }

    pub fn begin_confirm(&self) -> Result<GateState, GateError> {
        match self {
            GateState::PromptShown { pending, .. } => Ok(GateState::Processing { pending: *pending }),
            _ => Err(self.invalid("confirm")),
        }
    }

    /// Closes the gate and hands back the export that was asked for.
    pub fn finish_confirm(&self) -> Result<(GateState, ExportKind), GateError> {
        match self {
            GateState::Processing { pending } => Ok((GateState::Idle, *pending)),
            _ => Err(self.invalid("finish confirming")),
        }
    }

    /// Backs out of a confirm that never finished. Only `Processing` changes.
    pub fn abandon_confirm(&self) -> GateState {
        match self {
            GateState::Processing { .. } => GateState::Idle,
            other => other.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub delay: Duration,
    pub merchant_id: String,
    pub amount: String,
    pub code_service: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1000),
            merchant_id: "0924452492".to_string(),
            amount: "2.00".to_string(),
            code_service: "https://promptpay.io".to_string(),
        }
    }
}

/// Everything the client needs to draw the prompt.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatePrompt {
    pub state: &'static str,
    pub pending: Option<ExportKind>,
    pub slip_attached: bool,
    pub title: &'static str,
    pub description: &'static str,
    pub price: &'static str,
    pub scan_to_pay: &'static str,
    pub confirm: &'static str,
    pub checking: &'static str,
    pub upload_slip: &'static str,
    pub slip_hint: &'static str,
    pub code_image_url: String,
}

impl GateConfig {
    pub fn code_image_url(&self) -> String {
        format!(
            "{}/{}/{}.png",
            self.code_service.trim_end_matches('/'),
            self.merchant_id,
            self.amount
        )
    }

    pub fn prompt(&self, state: &GateState, language: Language) -> GatePrompt {
        let l = labels(language);
        GatePrompt {
            state: state.name(),
            pending: state.pending(),
            slip_attached: state.has_slip(),
            title: l.payment_required,
            description: l.payment_desc,
            price: l.price,
            scan_to_pay: l.scan_to_pay,
            confirm: l.confirm_payment,
            checking: l.checking_payment,
            upload_slip: l.upload_slip,
            slip_hint: l.slip_hint,
            code_image_url: self.code_image_url(),
        }
    }

    /// The simulated "checking payment" pause.
    pub async fn settle(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_opens_prompt_and_replaces_pending() {
        let shown = GateState::Idle.request(ExportKind::Png).unwrap();
        assert_eq!(shown.pending(), Some(ExportKind::Png));

        let with_slip = shown.attach_slip(Bytes::from_static(b"slip")).unwrap();
        assert!(with_slip.has_slip());

        let again = with_slip.request(ExportKind::Pdf).unwrap();
        assert_eq!(again.pending(), Some(ExportKind::Pdf));
        assert!(!again.has_slip());
    }

    #[test]
    fn test_full_confirm_cycle_returns_pending_export() {
        let processing = GateState::Idle
            .request(ExportKind::Pdf)
            .and_then(|s| s.begin_confirm())
            .unwrap();
        assert_eq!(processing.name(), "processing");

        let (idle, kind) = processing.finish_confirm().unwrap();
        assert_eq!(idle, GateState::Idle);
        assert_eq!(kind, ExportKind::Pdf);
    }

    #[test]
    fn test_abandon_confirm_only_resets_processing() {
        let processing = GateState::Processing { pending: ExportKind::Png };
        assert_eq!(processing.abandon_confirm(), GateState::Idle);

        let shown = GateState::Idle.request(ExportKind::Png).unwrap();
        assert_eq!(shown.abandon_confirm(), shown);
        assert_eq!(GateState::Idle.abandon_confirm(), GateState::Idle);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        assert!(GateState::Idle.dismiss().is_err());
        assert!(GateState::Idle.begin_confirm().is_err());
        assert!(GateState::Idle.attach_slip(Bytes::new()).is_err());
        assert_eq!(
            GateState::Idle.finish_confirm().unwrap_err(),
            GateError::InvalidTransition {
                action: "finish confirming",
                state: "idle"
            }
        );
        let processing = GateState::Processing {
            pending: ExportKind::Png,
        };
        assert!(processing.request(ExportKind::Pdf).is_err());
        assert!(processing.dismiss().is_err());
    }

    #[test]
    fn test_dismiss_returns_to_idle() {
        let shown = GateState::Idle.request(ExportKind::Png).unwrap();
        assert_eq!(shown.dismiss().unwrap(), GateState::Idle);
    }

    #[test]
    fn test_prompt_is_localized_and_links_code_image() {
        let config = GateConfig::default();
        let state = GateState::Idle.request(ExportKind::Png).unwrap();
        let en = config.prompt(&state, Language::EN);
        assert_eq!(en.code_image_url, "https://promptpay.io/0924452492/2.00.png");
        assert_eq!(en.state, "promptShown");
        assert_eq!(en.confirm, "Download Now");

        let th = config.prompt(&state, Language::TH);
        assert_ne!(th.title, en.title);
    }

    #[test]
    fn test_slip_is_not_serialized() {
        let state = GateState::Idle
            .request(ExportKind::Png)
            .and_then(|s| s.attach_slip(Bytes::from_static(b"secret")))
            .unwrap();
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json, serde_json::json!({"state": "promptShown", "pending": "png"}));
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_waits_the_configured_delay() {
        let config = GateConfig::default();
        let start = tokio::time::Instant::now();
        config.settle().await;
        assert!(start.elapsed() >= Duration::from_millis(1000));
        assert!(start.elapsed() < Duration::from_millis(1100));
    }
}

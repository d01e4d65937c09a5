use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;
use crate::render::DEFAULT_SCAN_SERVICE;

/// Application configuration loaded from environment variables.
/// Every variable is optional; malformed numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub port: u16,
    pub rust_log: String,
    pub qr_service_url: String,
    pub gate_delay: Duration,
    pub font_settle: Duration,
    pub asset_fetch_timeout: Duration,
    pub gate_merchant_id: String,
    pub gate_amount: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let text = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Config {
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            gemini_model: text("GEMINI_MODEL", DEFAULT_MODEL),
            port: parse_var(&lookup, "PORT", 8080)
                .context("PORT must be a valid port number")?,
            rust_log: text("RUST_LOG", "info"),
            qr_service_url: text("QR_SERVICE_URL", DEFAULT_SCAN_SERVICE),
            gate_delay: Duration::from_millis(parse_var(&lookup, "GATE_DELAY_MS", 1000)?),
            font_settle: Duration::from_millis(parse_var(&lookup, "FONT_SETTLE_MS", 100)?),
            asset_fetch_timeout: Duration::from_secs(parse_var(
                &lookup,
                "ASSET_FETCH_TIMEOUT_SECS",
                10,
            )?),
            gate_merchant_id: text("GATE_MERCHANT_ID", "0924452492"),
            gate_amount: text("GATE_AMOUNT", "2.00"),
        })
    }
}

fn parse_var<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'")),
        _ => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_when_nothing_is_set() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.gemini_api_key, None);
        assert_eq!(cfg.gemini_model, DEFAULT_MODEL);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.gate_delay, Duration::from_millis(1000));
        assert_eq!(cfg.font_settle, Duration::from_millis(100));
        assert_eq!(cfg.asset_fetch_timeout, Duration::from_secs(10));
        assert_eq!(cfg.qr_service_url, DEFAULT_SCAN_SERVICE);
        assert_eq!(cfg.gate_amount, "2.00");
    }

    #[test]
    fn test_blank_api_key_counts_as_missing() {
        assert_eq!(config(&[("GEMINI_API_KEY", "  ")]).unwrap().gemini_api_key, None);
        assert_eq!(
            config(&[("GEMINI_API_KEY", "k")]).unwrap().gemini_api_key.as_deref(),
            Some("k")
        );
    }

    #[test]
    fn test_invalid_numbers_fail_with_variable_name() {
        let err = config(&[("GATE_DELAY_MS", "soon")]).unwrap_err();
        assert!(format!("{err:#}").contains("GATE_DELAY_MS"));
        assert!(config(&[("PORT", "70000")]).is_err());
    }
}

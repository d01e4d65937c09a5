use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use super::{prompts, Assistant};
use crate::models::{Language, ResumeData, Rgb, ThemeKind};

const LIST_LIMIT: usize = 3;
pub const ANALYSIS_FAILED: &str = "Error analyzing data. Please try again.";

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioAnalysis {
    pub score: u8,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub interview_questions: Vec<String>,
}

impl PortfolioAnalysis {
    fn failed() -> Self {
        Self {
            improvements: vec![ANALYSIS_FAILED.to_string()],
            ..Self::default()
        }
    }

    /// Picks fields out of a loosely-shaped reply. Anything missing or of the
    /// wrong type falls back to zero or empty.
    pub fn from_value(value: &Value) -> Self {
        let score = value
            .get("score")
            .and_then(|s| s.as_f64())
            .map(|s| s.round().clamp(0.0, 100.0) as u8)
            .unwrap_or(0);
        Self {
            score,
            strengths: string_list(value.get("strengths")),
            improvements: string_list(value.get("improvements")),
            interview_questions: string_list(value.get("interviewQuestions")),
        }
    }
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .take(LIST_LIMIT)
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSuggestion {
    pub color: Rgb,
    pub theme: ThemeKind,
    pub reasoning: String,
}

impl DesignSuggestion {
    /// `None` unless the colour is a valid hex and the theme is known.
    pub fn from_value(value: &Value) -> Option<Self> {
        let color = Rgb::parse_hex(value.get("color")?.as_str()?)?;
        let theme = ThemeKind::parse(value.get("theme")?.as_str()?)?;
        let reasoning = value
            .get("reasoning")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .trim()
            .to_string();
        Some(Self {
            color,
            theme,
            reasoning,
        })
    }
}

impl Assistant {
    pub async fn analyze(&self, data: &ResumeData, lang: Language) -> PortfolioAnalysis {
        // The photo is a large data URI that tells a reviewer nothing.
        let resume_json = match serde_json::to_string(&data.with_profile_image(None)) {
            Ok(json) => json,
            Err(e) => {
                warn!("Could not serialise resume for analysis: {e}");
                return PortfolioAnalysis::failed();
            }
        };
        match self.generator.generate_json(&prompts::analyze(&resume_json, lang)).await {
            Ok(value) if value.is_object() => {
                let analysis = PortfolioAnalysis::from_value(&value);
                info!(score = analysis.score, "Portfolio analysed");
                analysis
            }
            Ok(other) => {
                warn!("Analysis reply was not an object: {other}");
                PortfolioAnalysis::failed()
            }
            Err(e) => {
                warn!("Analysis failed: {e}");
                PortfolioAnalysis::failed()
            }
        }
    }

    /// Theme and accent picked for the job title. An empty title makes no call.
    pub async fn suggest_design(&self, title: &str, skills: &str) -> Option<DesignSuggestion> {
        if title.trim().is_empty() {
            return None;
        }
        match self.generator.generate_json(&prompts::design(title, skills)).await {
            Ok(value) => {
                let suggestion = DesignSuggestion::from_value(&value);
                if suggestion.is_none() {
                    warn!("Design suggestion was unusable: {value}");
                }
                suggestion
            }
            Err(e) => {
                warn!("Design suggestion failed: {e}");
                None
            }
        }
    }
}

//! Writing assistant on top of the generative-text client.
//!
//! Every operation is best-effort. Transport or parse failures are logged and
//! turned into the fallback value for that operation; nothing here returns an
//! error to the caller.

use std::sync::Arc;

use crate::llm_client::TextGenerator;
use crate::models::resume::ScalarField;
use crate::models::ResumeData;

pub mod analysis;
pub mod loading;
pub mod prompts;
pub mod rewrite;

pub use analysis::{DesignSuggestion, PortfolioAnalysis};
pub use loading::{LoadingError, LoadingTracker};
pub use rewrite::SuggestSection;

#[derive(Clone)]
pub struct Assistant {
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }
}

/// Context line for an enhance request, chosen from the field being edited.
///
/// `about` gets the title and skills, `exp-desc-<id>` the role and company of
/// that experience, `proj-desc-<id>` the project's name and technologies.
/// An id that no longer exists yields an empty context.
pub fn field_context(data: &ResumeData, field: &str) -> String {
    if field == "about" {
        return format!(
            "Target role/title: \"{}\". Key skills: \"{}\". This is the \"About Me\" section.",
            data.title, data.skills
        );
    }
    if let Some(id) = field.strip_prefix("exp-desc-") {
        return data
            .experiences
            .iter()
            .find(|e| e.id == id)
            .map(|e| {
                format!(
                    "Specific role: \"{}\" at company: \"{}\". Focus only on this role and company.",
                    e.role, e.company
                )
            })
            .unwrap_or_default();
    }
    if let Some(id) = field.strip_prefix("proj-desc-") {
        return data
            .projects
            .iter()
            .find(|p| p.id == id)
            .map(|p| {
                format!(
                    "Project name: \"{}\". Technologies used: \"{}\".",
                    p.name, p.technologies
                )
            })
            .unwrap_or_default();
    }
    "Professional portfolio.".to_string()
}

/// Writes assistant output back into the field it came from. `None` when the
/// field id names nothing stored (an unknown key or a removed entry).
pub fn apply_field_text(data: &ResumeData, field: &str, text: &str) -> Option<ResumeData> {
    if field == "about" {
        return Some(data.with_field(ScalarField::About, text.to_string()));
    }
    let mut next = data.clone();
    if let Some(id) = field.strip_prefix("exp-desc-") {
        next.experiences.iter_mut().find(|e| e.id == id)?.description = text.to_string();
        return Some(next);
    }
    if let Some(id) = field.strip_prefix("proj-desc-") {
        next.projects.iter_mut().find(|p| p.id == id)?.description = text.to_string();
        return Some(next);
    }
    None
}

#[cfg(test)]
pub(crate) mod fakes {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::Value;

    use crate::llm_client::{LlmError, TextGenerator};

    /// Replies with canned output and records the prompts it saw.
    pub struct FakeGenerator {
        pub text: Result<String, ()>,
        pub json: Result<Value, ()>,
        pub calls: AtomicUsize,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn text(reply: &str) -> Self {
            Self {
                text: Ok(reply.to_string()),
                json: Err(()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn json(reply: Value) -> Self {
            Self {
                text: Err(()),
                json: Ok(reply),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                text: Err(()),
                json: Err(()),
                calls: AtomicUsize::new(0),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn record(&self, prompt: &str) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate_text(&self, prompt: &str) -> Result<String, LlmError> {
            self.record(prompt);
            self.text.clone().map_err(|_| LlmError::Api {
                status: 503,
                message: "service unavailable".into(),
            })
        }

        async fn generate_json(&self, prompt: &str) -> Result<Value, LlmError> {
            self.record(prompt);
            self.json.clone().map_err(|_| LlmError::EmptyContent)
        }
    }
}

use serde::Deserialize;
use tracing::{info, warn};

use super::{prompts, Assistant};
use crate::models::{Language, ResumeData};

/// Shorter inputs are returned as-is without a call.
pub const MIN_ENHANCE_CHARS: usize = 5;

pub const COVER_LETTER_FALLBACK: &str = "Could not generate cover letter. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SuggestSection {
    About,
    Experience,
    Project,
}

impl Assistant {
    /// Rewrites `text` in the candidate's voice. Returns `text` unchanged when
    /// it is too short, when the call fails, or when the reply is empty.
    pub async fn enhance_text(&self, text: &str, lang: Language, context: &str) -> String {
        if text.chars().count() < MIN_ENHANCE_CHARS {
            return text.to_string();
        }
        match self.generator.generate_text(&prompts::enhance(text, lang, context)).await {
            Ok(reply) if !reply.trim().is_empty() => {
                info!(chars = reply.len(), "Enhanced text");
                reply.trim().to_string()
            }
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!("Enhance failed, keeping original text: {e}");
                text.to_string()
            }
        }
    }

    pub async fn translate_text(&self, text: &str, target: Language) -> String {
        if text.is_empty() {
            return String::new();
        }
        match self.generator.generate_text(&prompts::translate(text, target)).await {
            Ok(reply) if !reply.trim().is_empty() => reply.trim().to_string(),
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!("Translation failed, keeping original text: {e}");
                text.to_string()
            }
        }
    }

    /// A ready-to-use draft for an empty field. Empty string on failure.
    pub async fn suggest(&self, section: SuggestSection, title: &str, skills: &str, lang: Language) -> String {
        let task = suggestion_task(section, title, skills, lang);
        match self.generator.generate_text(&prompts::suggest(&task, lang)).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!(section = ?section, "Suggestion failed: {e}");
                String::new()
            }
        }
    }

    pub async fn cover_letter(&self, data: &ResumeData, company: &str, lang: Language) -> String {
        let experience = data
            .experiences
            .first()
            .map(|e| format!("{} at {}", e.role, e.company))
            .unwrap_or_default();
        let company = match company.trim() {
            "" => "[Company Name]",
            c => c,
        };
        let facts = prompts::CoverLetterFacts {
            name: &data.full_name,
            title: &data.title,
            company,
            skills: &data.skills,
            experience,
        };
        match self.generator.generate_text(&prompts::cover_letter(&facts, lang)).await {
            Ok(reply) => reply.trim().to_string(),
            Err(e) => {
                warn!("Cover letter generation failed: {e}");
                COVER_LETTER_FALLBACK.to_string()
            }
        }
    }
}

fn suggestion_task(section: SuggestSection, title: &str, skills: &str, lang: Language) -> String {
    match (lang, section) {
        (Language::EN, SuggestSection::About) => format!(
            "Draft an \"About Me\" for a \"{title}\" skilled in \"{skills}\". Mention being \
             introverted but focused and reliable, handling pressure well, and being humble, \
             teachable and ready to grow with the company."
        ),
        (Language::EN, SuggestSection::Experience) => format!(
            "Draft a job description for the role \"{title}\". Focus on delivering reliably and \
             honestly, handling pressure and learning from mistakes, and being a supportive team \
             player who listens."
        ),
        (Language::EN, SuggestSection::Project) => format!(
            "Draft a project description for \"{title}\" built with \"{skills}\". Explain the \
             problem it solves, the persistence it took to get past technical hurdles, and pride \
             in learning \"{skills}\"."
        ),
        (Language::TH, SuggestSection::About) => format!(
            "เขียนร่างแนะนำตัวสำหรับตำแหน่ง \"{title}\" (ทักษะ: \"{skills}\") บอกว่าเป็นคนเงียบแต่ตั้งใจทำงาน \
             พร้อมสู้งานหนักและรับแรงกดดันได้ และอยากเติบโตไปกับบริษัท"
        ),
        (Language::TH, SuggestSection::Experience) => format!(
            "เขียนร่างรายละเอียดงานสำหรับตำแหน่ง \"{title}\" เน้นความรับผิดชอบและตรงเวลา \
             อดทนแก้ปัญหาจนสำเร็จ และทำงานเป็นทีมอย่างถ่อมตัว"
        ),
        (Language::TH, SuggestSection::Project) => format!(
            "เขียนร่างคำอธิบายโปรเจกต์ \"{title}\" (ใช้ \"{skills}\") เล่าว่าแก้ปัญหาอะไร \
             เจออุปสรรคแต่ก็เรียนรู้จนแก้ได้ และภูมิใจที่ได้ใช้ \"{skills}\""
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::assistant::fakes::FakeGenerator;

    fn assistant(fake: FakeGenerator) -> (Assistant, Arc<FakeGenerator>) {
        let fake = Arc::new(fake);
        (Assistant::new(fake.clone()), fake)
    }

    #[tokio::test]
    async fn test_enhance_returns_original_when_generator_fails() {
        let (assistant, fake) = assistant(FakeGenerator::failing());
        let input = "Built internal dashboards for the sales team";
        let out = assistant.enhance_text(input, Language::EN, "").await;
        assert_eq!(out, input);
        assert_eq!(fake.calls(), 1);
    }

    #[tokio::test]
    async fn test_enhance_skips_short_text() {
        let (assistant, fake) = assistant(FakeGenerator::text("should not be used"));
        assert_eq!(assistant.enhance_text("Hi", Language::EN, "").await, "Hi");
        assert_eq!(
            assistant.enhance_text("สวัสดี", Language::TH, "").await,
            "should not be used"
        );
        assert_eq!(fake.calls(), 1, "six Thai chars is long enough");
    }

    #[tokio::test]
    async fn test_enhance_uses_trimmed_reply_and_ignores_blank() {
        let (trimmed, _) = assistant(FakeGenerator::text("  Shipped dashboards.\n"));
        assert_eq!(
            trimmed.enhance_text("made dashboards", Language::EN, "").await,
            "Shipped dashboards."
        );

        let (blank, _) = assistant(FakeGenerator::text("   "));
        assert_eq!(
            blank.enhance_text("made dashboards", Language::EN, "").await,
            "made dashboards"
        );
    }

    #[tokio::test]
    async fn test_translate_falls_back_to_original() {
        let (assistant, fake) = assistant(FakeGenerator::failing());
        assert_eq!(assistant.translate_text("", Language::TH).await, "");
        assert_eq!(fake.calls(), 0);
        assert_eq!(assistant.translate_text("Hello", Language::TH).await, "Hello");
    }

    #[tokio::test]
    async fn test_suggest_is_empty_on_failure() {
        let (assistant, _) = assistant(FakeGenerator::failing());
        let out = assistant
            .suggest(SuggestSection::About, "Designer", "Figma", Language::EN)
            .await;
        assert_eq!(out, "");
    }

    #[tokio::test]
    async fn test_suggest_prompt_mentions_title_and_skills() {
        let (assistant, fake) = assistant(FakeGenerator::text("Draft"));
        let out = assistant
            .suggest(SuggestSection::Project, "Shop", "Rust", Language::EN)
            .await;
        assert_eq!(out, "Draft");
        let prompt = fake.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("\"Shop\"") && prompt.contains("\"Rust\""));
    }

    #[tokio::test]
    async fn test_cover_letter_apologises_on_failure() {
        let (assistant, _) = assistant(FakeGenerator::failing());
        let out = assistant
            .cover_letter(&ResumeData::example(), "Acme", Language::EN)
            .await;
        assert_eq!(out, COVER_LETTER_FALLBACK);
    }

    #[tokio::test]
    async fn test_cover_letter_uses_placeholder_company_and_first_experience() {
        let (assistant, fake) = assistant(FakeGenerator::text("Dear team"));
        let data = ResumeData::example();
        assistant.cover_letter(&data, "  ", Language::TH).await;
        let prompt = fake.prompts.lock().unwrap()[0].clone();
        assert!(prompt.contains("[Company Name]"));
        assert!(prompt.contains(&format!(
            "{} at {}",
            data.experiences[0].role, data.experiences[0].company
        )));
    }
}

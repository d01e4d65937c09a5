// Prompt templates for the writing assistant. Placeholders in `{braces}` are
// filled by the builders at the bottom of the file.

use crate::models::Language;

/// Voice shared by rewrites and drafts.
pub const PERSONA_EN: &str = "Writer persona:
- Quiet and introverted, but sincere and honest.
- Humble: never claims to be a rock star; stresses being teachable and eager to learn.
- Selling points: hard-working, resilient, handles pressure well, has grit.
- Mindset: \"I may not be the expert yet, but I will work the hardest to learn and deliver.\"";

pub const PERSONA_TH: &str = "บุคลิกของผู้เขียน:
- เป็นคนเงียบๆ พูดไม่เก่ง แต่จริงใจและซื่อสัตย์
- ถ่อมตัว ไม่อวดว่าเก่ง เน้นว่าพร้อมเรียนรู้และสอนได้
- จุดแข็ง: ขยัน อดทน รับแรงกดดันได้ดี สู้งาน
- แนวคิด: \"วันนี้อาจยังไม่เก่งที่สุด แต่จะขยันและเรียนรู้ให้เร็วที่สุด\"";

pub const ENHANCE_EN: &str = r#"You are a professional resume editor.

Context: {context}
Original text: "{text}"

Task: rewrite the text in this voice:
{persona}

Rules:
1. No buzzwords (synergy, leverage). Use plain, strong verbs.
2. Keep the original meaning; make it sound like a dedicated, humble employee.
3. Short and professional.

Return ONLY the rewritten text."#;

pub const ENHANCE_TH: &str = r#"คุณเป็นบรรณาธิการเรซูเม่มืออาชีพ

บริบท: {context}
ข้อความเดิม: "{text}"

งาน: เขียนข้อความนี้ใหม่ด้วยน้ำเสียงแบบนี้
{persona}

กฎ:
1. ไม่ใช้ศัพท์หรูแบบ AI ใช้ภาษาคนทำงานจริง
2. คงความหมายเดิม แต่ให้ฟังดูน่าจ้างและน่าไว้ใจ
3. กระชับและสุภาพ

ตอบกลับเฉพาะข้อความที่แก้แล้วเท่านั้น"#;

pub const TRANSLATE_TEMPLATE: &str =
    r#"Translate to {language}. Style: professional, authentic, natural. Text: "{text}""#;

pub const SUGGEST_EN: &str = r#"Act as a career coach helping a humble, introverted candidate.

Task: {task}

Output requirements:
- Give a ready-to-use draft, not instructions ("You should write..." is wrong).
- Tone: {persona}
- Style: authentic, human, sincere.
- Length: 2-3 short lines.

Return ONLY the draft."#;

pub const SUGGEST_TH: &str = r#"คุณเป็นโค้ชด้านอาชีพที่ช่วยคนทำงานสายเงียบๆ เขียนเรซูเม่

โจทย์: {task}

สิ่งที่ต้องทำ:
- เขียนเป็นเนื้อหาตัวอย่างที่นำไปใช้ได้ทันที ไม่ใช่คำแนะนำ
- น้ำเสียง: {persona}
- ภาษาเป็นธรรมชาติ ไม่แข็งและไม่เล่นเกินไป
- ความยาว 2-3 บรรทัด

ตอบกลับเฉพาะเนื้อหาตัวอย่างเท่านั้น"#;

pub const COVER_LETTER_TEMPLATE: &str = r#"Write a short, sincere cover letter in {language}.

Applicant: {name}
Current role: {title}
Target company: {company}
Key skills: {skills}
Recent experience: {experience}

Tone: {persona}

Structure:
1. Greeting
2. Brief introduction and why this company
3. What I bring (humble but gritty)
4. Ask for an interview"#;

pub const ANALYZE_TEMPLATE: &str = r#"Act as a senior HR manager. Analyze this resume JSON: {resume_json}
Reply in {language}. Output a JSON object only, no markdown, with this structure:
{
  "score": number (0-100),
  "strengths": ["string", "string", "string"],
  "improvements": ["string", "string", "string"],
  "interviewQuestions": ["string", "string", "string"]
}
Improvements must be specific fixes. Interview questions must be challenging and based on the candidate's own projects and experience."#;

pub const DESIGN_TEMPLATE: &str = r##"You are a professional design consultant.
Given the job title "{title}" and skills "{skills}", pick the best visual theme for a portfolio.

Rules:
- Use colour psychology (banking: navy blue, creative: purple or pink, environmental: green, tech or security: dark with neon).
- Choose one layout theme from: "modern", "minimal", "creative", "cyber".

Output JSON only:
{
  "color": "#hexcode",
  "theme": "modern" | "minimal" | "creative" | "cyber",
  "reasoning": "one short sentence in English"
}"##;

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

fn persona(lang: Language) -> &'static str {
    match lang {
        Language::EN => PERSONA_EN,
        Language::TH => PERSONA_TH,
    }
}

fn language_name(lang: Language) -> &'static str {
    match lang {
        Language::EN => "English",
        Language::TH => "Thai",
    }
}

pub fn enhance(text: &str, lang: Language, context: &str) -> String {
    let template = match lang {
        Language::EN => ENHANCE_EN,
        Language::TH => ENHANCE_TH,
    };
    template
        .replace("{context}", context)
        .replace("{persona}", persona(lang))
        .replace("{text}", text)
}

pub fn translate(text: &str, target: Language) -> String {
    TRANSLATE_TEMPLATE
        .replace("{language}", language_name(target))
        .replace("{text}", text)
}

pub fn suggest(task: &str, lang: Language) -> String {
    let template = match lang {
        Language::EN => SUGGEST_EN,
        Language::TH => SUGGEST_TH,
    };
    template
        .replace("{persona}", persona(lang))
        .replace("{task}", task)
}

pub struct CoverLetterFacts<'a> {
    pub name: &'a str,
    pub title: &'a str,
    pub company: &'a str,
    pub skills: &'a str,
    pub experience: String,
}

pub fn cover_letter(facts: &CoverLetterFacts<'_>, lang: Language) -> String {
    COVER_LETTER_TEMPLATE
        .replace("{language}", language_name(lang))
        .replace("{persona}", persona(lang))
        .replace("{name}", facts.name)
        .replace("{title}", facts.title)
        .replace("{company}", facts.company)
        .replace("{skills}", facts.skills)
        .replace("{experience}", &facts.experience)
}

pub fn analyze(resume_json: &str, lang: Language) -> String {
    ANALYZE_TEMPLATE
        .replace("{language}", language_name(lang))
        .replace("{resume_json}", resume_json)
}

pub fn design(title: &str, skills: &str) -> String {
    DESIGN_TEMPLATE
        .replace("{title}", title)
        .replace("{skills}", skills)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enhance_fills_every_placeholder() {
        let prompt = enhance("built a site", Language::EN, "Project Name: \"Shop\"");
        assert!(prompt.contains("Original text: \"built a site\""));
        assert!(prompt.contains("Project Name: \"Shop\""));
        assert!(prompt.contains("Writer persona"));
        assert!(!prompt.contains("{persona}") && !prompt.contains("{context}"));
    }

    #[test]
    fn test_thai_prompts_use_thai_persona() {
        assert!(enhance("ทดสอบข้อความ", Language::TH, "").contains("บุคลิกของผู้เขียน"));
        assert!(suggest("task", Language::TH).contains("บุคลิกของผู้เขียน"));
    }

    #[test]
    fn test_translate_names_target_language() {
        assert!(translate("hello", Language::TH).starts_with("Translate to Thai."));
        assert!(translate("สวัสดี", Language::EN).starts_with("Translate to English."));
    }

    #[test]
    fn test_design_prompt_lists_all_themes() {
        let prompt = design("Data Analyst", "SQL");
        for theme in ["modern", "minimal", "creative", "cyber"] {
            assert!(prompt.contains(theme));
        }
        assert!(prompt.contains("\"Data Analyst\""));
    }
}

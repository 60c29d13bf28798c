//! Prompt construction for the rewriting collaborator

use std::collections::HashSet;

/// Prompt template with placeholder substitution.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub rewrite: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            rewrite: REWRITE_TEMPLATE.to_string(),
        }
    }
}

/// Parameters for prompt rendering.
#[derive(Debug, Clone)]
pub struct PromptParams {
    pub resume_text: String,
    pub job_text: String,
    pub missing_keywords: Vec<String>,
    /// Inputs longer than this many characters are truncated before
    /// substitution to stay inside the model's context budget.
    pub max_input_chars: usize,
    /// At most this many missing keywords are surfaced to the model.
    pub max_injected_keywords: usize,
}

impl PromptTemplates {
    pub fn render_rewrite(&self, params: &PromptParams) -> String {
        let keywords = injectable_keywords(&params.missing_keywords, params.max_injected_keywords);
        let keywords_section = if keywords.is_empty() {
            String::new()
        } else {
            format!(
                "CRITICAL ATS OPTIMIZATION TASK:\n\
                 The following keywords are MISSING from the resume but present in the job \
                 description:\n{}\n\n\
                 Incorporate them naturally where truthful and relevant. Skip any keyword that \
                 does not fit the candidate's actual background, and record every keyword you \
                 added or skipped in the keywords_added / keywords_skipped fields.",
                keywords.join(", ")
            )
        };

        self.rewrite
            .replace("{keywords_section}", &keywords_section)
            .replace(
                "{resume}",
                &truncate_chars(&params.resume_text, params.max_input_chars),
            )
            .replace(
                "{job}",
                &truncate_chars(&params.job_text, params.max_input_chars),
            )
    }
}

/// Filter missing keywords before injection: generic short words and filler
/// terms only invite keyword stuffing, so keep terms longer than three
/// characters that are not on the blocklist, capped at `max`.
pub fn injectable_keywords(missing: &[String], max: usize) -> Vec<String> {
    let blocklist: HashSet<&str> = GENERIC_TERMS.iter().copied().collect();

    missing
        .iter()
        .filter(|k| k.len() > 3 && !blocklist.contains(k.to_lowercase().as_str()))
        .take(max)
        .cloned()
        .collect()
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        text.chars().take(max_chars).collect()
    }
}

const GENERIC_TERMS: &[&str] = &[
    "key", "detail", "details", "issues", "issue", "closely", "outputs",
    "efficient", "userfacing", "user", "facing", "software", "thirdparty",
];

const REWRITE_TEMPLATE: &str = r#"You are an expert ATS resume optimization specialist.

{keywords_section}

TASK:
1. Extract the name, email, phone, linkedin, github, and website from the resume.
2. Rewrite the experience bullets to be strong, impact-driven, and ATS-optimized.
3. If missing keywords were provided, naturally incorporate them where truthful.
4. Return ONLY a valid JSON object with this exact structure (no markdown formatting):
{
    "name": "Full Name",
    "email": "email@example.com",
    "phone": "+1234567890",
    "linkedin": "linkedin-username",
    "github": "github-username",
    "website": "https://portfolio.com",
    "summary": "Professional summary...",
    "experience": [
        { "title": "Job Title", "company": "Company Name", "dates": "Month Year - Month Year", "bullets": ["..."] }
    ],
    "projects": [
        { "name": "Project Name", "link": "https://github.com/...", "description": "..." }
    ],
    "education": [
        { "school": "University Name", "degree": "Degree Name", "year": "Year", "gpa": "GPA" }
    ],
    "skills": [
        { "category": "Programming Languages", "items": "Python, Java" }
    ],
    "keywords_added": ["keyword1"],
    "keywords_skipped": [
        {"keyword": "keyword2", "reason": "Not relevant to candidate's experience"}
    ]
}

IMPORTANT:
- The "company" field in experience is required; infer it from context if needed.
- If no missing keywords were provided, return empty arrays for keywords_added and keywords_skipped.
- Do not use any markdown formatting in the text content.

ORIGINAL RESUME:
{resume}

JOB DESCRIPTION:
{job}"#;

//! Structured rewritten-resume record: the rewriter's output contract,
//! tolerant parsing of model JSON, and flattening back to plain text.

use crate::error::{Result, ResumeOptimizerError};
use crate::scoring::delta::SkippedKeyword;
use serde::{Deserialize, Serialize};

/// The rewriting collaborator's structured output.
///
/// All fields default when absent so a sparse model response still parses;
/// the claim arrays in particular default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RewrittenResume {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub linkedin: Option<String>,
    #[serde(default)]
    pub github: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub projects: Vec<ProjectEntry>,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
    #[serde(default)]
    pub skills: Vec<SkillGroup>,
    #[serde(default)]
    pub keywords_added: Vec<String>,
    #[serde(default)]
    pub keywords_skipped: Vec<SkippedKeyword>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub dates: String,
    #[serde(default)]
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectEntry {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EducationEntry {
    #[serde(default)]
    pub school: String,
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub gpa: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillGroup {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub items: String,
}

impl RewrittenResume {
    /// Parse a model response that should contain the resume JSON.
    ///
    /// Models wrap JSON in markdown fences or surround it with prose; strip
    /// fences, then slice from the first `{` to the last `}` before parsing.
    pub fn from_model_response(raw: &str) -> Result<Self> {
        let mut text = raw.trim().to_string();

        if text.contains("```") {
            text = text.replace("```json", "").replace("```", "").trim().to_string();
        }

        let (start, end) = match (text.find('{'), text.rfind('}')) {
            (Some(start), Some(end)) if end > start => (start, end),
            _ => {
                return Err(ResumeOptimizerError::Rewrite(format!(
                    "Model response contained no JSON object: {}",
                    truncate_for_error(&text)
                )))
            }
        };

        let resume: RewrittenResume = serde_json::from_str(&text[start..=end])?;
        Ok(resume)
    }

    /// Flatten the record into plain text for re-scoring.
    ///
    /// Fixed section order: contact info, summary, experience, projects,
    /// education, skills. Absent fields are skipped. The output approximates
    /// the final rendered document and is the exact "after" scoring input.
    pub fn to_plain_text(&self) -> String {
        let mut parts: Vec<String> = Vec::new();

        let contact = [
            ("Name", &self.name),
            ("Email", &self.email),
            ("Phone", &self.phone),
            ("LinkedIn", &self.linkedin),
            ("GitHub", &self.github),
            ("Website", &self.website),
        ];
        for (label, value) in contact {
            if let Some(value) = value {
                if !value.is_empty() {
                    parts.push(format!("{}: {}", label, value));
                }
            }
        }
        parts.push(String::new());

        if let Some(summary) = self.summary.as_deref().filter(|s| !s.is_empty()) {
            parts.push("PROFESSIONAL SUMMARY".to_string());
            parts.push(summary.to_string());
            parts.push(String::new());
        }

        if !self.experience.is_empty() {
            parts.push("WORK EXPERIENCE".to_string());
            for job in &self.experience {
                if job.company.is_empty() {
                    parts.push(format!("{} ({})", job.title, job.dates));
                } else {
                    parts.push(format!("{} at {} ({})", job.title, job.company, job.dates));
                }
                for bullet in &job.bullets {
                    parts.push(format!("- {}", bullet));
                }
                parts.push(String::new());
            }
        }

        if !self.projects.is_empty() {
            parts.push("PROJECTS".to_string());
            for project in &self.projects {
                parts.push(project.name.clone());
                if !project.link.is_empty() {
                    parts.push(format!("Link: {}", project.link));
                }
                if !project.description.is_empty() {
                    parts.push(project.description.clone());
                }
                parts.push(String::new());
            }
        }

        if !self.education.is_empty() {
            parts.push("EDUCATION".to_string());
            for edu in &self.education {
                parts.push(format!("{} at {} ({})", edu.degree, edu.school, edu.year));
                if !edu.gpa.is_empty() {
                    parts.push(format!("GPA: {}", edu.gpa));
                }
                parts.push(String::new());
            }
        }

        if !self.skills.is_empty() {
            parts.push("SKILLS".to_string());
            for group in &self.skills {
                parts.push(format!("{}: {}", group.category, group.items));
            }
            parts.push(String::new());
        }

        parts.join("\n")
    }
}

fn truncate_for_error(text: &str) -> String {
    const MAX: usize = 200;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let cut: String = text.chars().take(MAX).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RewrittenResume {
        RewrittenResume {
            name: Some("Jane Doe".to_string()),
            email: Some("jane@example.com".to_string()),
            summary: Some("Backend engineer focused on Rust and AWS.".to_string()),
            experience: vec![ExperienceEntry {
                title: "Software Engineer".to_string(),
                company: "Acme".to_string(),
                dates: "Jan 2020 - Present".to_string(),
                bullets: vec!["Deployed Docker services on Kubernetes".to_string()],
            }],
            projects: vec![ProjectEntry {
                name: "crate-search".to_string(),
                link: "https://github.com/jane/crate-search".to_string(),
                description: "Full-text search over crates.io metadata".to_string(),
            }],
            education: vec![EducationEntry {
                school: "State University".to_string(),
                degree: "BSc Computer Science".to_string(),
                year: "2019".to_string(),
                gpa: String::new(),
            }],
            skills: vec![SkillGroup {
                category: "Languages".to_string(),
                items: "Rust, Python".to_string(),
            }],
            keywords_added: vec!["docker".to_string()],
            keywords_skipped: vec![],
            ..Default::default()
        }
    }

    #[test]
    fn test_flatten_section_order() {
        let text = sample().to_plain_text();
        let name = text.find("Name: Jane Doe").unwrap();
        let summary = text.find("PROFESSIONAL SUMMARY").unwrap();
        let experience = text.find("WORK EXPERIENCE").unwrap();
        let projects = text.find("PROJECTS").unwrap();
        let education = text.find("EDUCATION").unwrap();
        let skills = text.find("SKILLS").unwrap();
        assert!(name < summary);
        assert!(summary < experience);
        assert!(experience < projects);
        assert!(projects < education);
        assert!(education < skills);
    }

    #[test]
    fn test_flatten_skips_absent_fields() {
        let resume = RewrittenResume {
            summary: Some("Engineer".to_string()),
            ..Default::default()
        };
        let text = resume.to_plain_text();
        assert!(text.contains("PROFESSIONAL SUMMARY"));
        assert!(!text.contains("Name:"));
        assert!(!text.contains("WORK EXPERIENCE"));
        assert!(!text.contains("GPA:"));
    }

    #[test]
    fn test_flatten_experience_without_company() {
        let resume = RewrittenResume {
            experience: vec![ExperienceEntry {
                title: "Freelancer".to_string(),
                company: String::new(),
                dates: "2021".to_string(),
                bullets: vec![],
            }],
            ..Default::default()
        };
        let text = resume.to_plain_text();
        assert!(text.contains("Freelancer (2021)"));
        assert!(!text.contains(" at "));
    }

    #[test]
    fn test_parse_plain_json() {
        let raw = r#"{"name": "Jane", "keywords_added": ["aws"]}"#;
        let resume = RewrittenResume::from_model_response(raw).unwrap();
        assert_eq!(resume.name.as_deref(), Some("Jane"));
        assert_eq!(resume.keywords_added, vec!["aws"]);
        assert!(resume.keywords_skipped.is_empty());
    }

    #[test]
    fn test_parse_fenced_json() {
        let raw = "```json\n{\"name\": \"Jane\"}\n```";
        let resume = RewrittenResume::from_model_response(raw).unwrap();
        assert_eq!(resume.name.as_deref(), Some("Jane"));
    }

    #[test]
    fn test_parse_json_with_surrounding_prose() {
        let raw = "Here is the optimized resume:\n{\"summary\": \"Engineer\"} hope it helps!";
        let resume = RewrittenResume::from_model_response(raw).unwrap();
        assert_eq!(resume.summary.as_deref(), Some("Engineer"));
    }

    #[test]
    fn test_parse_skipped_keywords() {
        let raw = r#"{"keywords_skipped": [{"keyword": "cobol", "reason": "Not in background"}]}"#;
        let resume = RewrittenResume::from_model_response(raw).unwrap();
        assert_eq!(resume.keywords_skipped[0].keyword, "cobol");
    }

    #[test]
    fn test_parse_no_json_is_error() {
        assert!(RewrittenResume::from_model_response("sorry, I cannot do that").is_err());
    }

    #[test]
    fn test_roundtrip_through_flatten_raises_score() {
        use crate::scoring::OverlapScorer;
        let scorer = OverlapScorer::default();
        let jd = "Rust AWS Docker Kubernetes";
        let before = scorer.score("Rust engineer", jd);
        let after = scorer.score(&sample().to_plain_text(), jd);
        assert!(after.score > before.score);
    }
}

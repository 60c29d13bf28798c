//! Overlap scoring: percentage keyword match between resume and job description

use crate::scoring::keywords::KeywordExtractor;
use serde::{Deserialize, Serialize};

/// Result of a single overlap measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Percentage of job-description tokens also present in the resume,
    /// in [0, 100], rounded to two decimal places.
    pub score: f64,
    /// Job-description tokens absent from the resume, sorted alphabetically.
    pub missing: Vec<String>,
}

/// Compares resume and job-description token sets.
pub struct OverlapScorer {
    extractor: KeywordExtractor,
}

impl Default for OverlapScorer {
    fn default() -> Self {
        Self::new(KeywordExtractor::default())
    }
}

impl OverlapScorer {
    pub fn new(extractor: KeywordExtractor) -> Self {
        Self { extractor }
    }

    /// Score `resume_text` against `job_text`.
    ///
    /// An empty keyword universe on the job-description side yields
    /// `score = 0.0, missing = []`: a percentage is meaningless against zero
    /// keywords, and this is a defined outcome rather than an error.
    pub fn score(&self, resume_text: &str, job_text: &str) -> ScoreResult {
        let resume_tokens = self.extractor.extract(resume_text);
        let jd_tokens = self.extractor.extract(job_text);

        if jd_tokens.is_empty() {
            return ScoreResult {
                score: 0.0,
                missing: Vec::new(),
            };
        }

        let matches = jd_tokens.intersection(&resume_tokens).count();
        let missing: Vec<String> = jd_tokens.difference(&resume_tokens).cloned().collect();

        let score = round2(100.0 * matches as f64 / jd_tokens.len() as f64);

        ScoreResult { score, missing }
    }

    pub fn extractor(&self) -> &KeywordExtractor {
        &self.extractor
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::stopwords::StopwordList;

    #[test]
    fn test_concrete_scenario() {
        // jd tokens {python, aws, docker, kubernetes}, resume {python, developer}
        let scorer = OverlapScorer::default();
        let result = scorer.score(
            "Python developer",
            "Must know Python, AWS, Docker, and Kubernetes",
        );
        assert_eq!(result.score, 25.0);
        assert_eq!(result.missing, vec!["aws", "docker", "kubernetes"]);
    }

    #[test]
    fn test_empty_job_description() {
        let scorer = OverlapScorer::default();
        let result = scorer.score("Anything", "");
        assert_eq!(result.score, 0.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_all_stopword_job_description() {
        let scorer = OverlapScorer::default();
        let result = scorer.score("Rust engineer", "the and of with experience team");
        assert_eq!(result.score, 0.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_empty_resume() {
        let scorer = OverlapScorer::default();
        let result = scorer.score("", "Kubernetes administrator");
        assert_eq!(result.score, 0.0);
        assert_eq!(result.missing, vec!["administrator", "kubernetes"]);
    }

    #[test]
    fn test_full_overlap() {
        let scorer = OverlapScorer::default();
        let text = "Rust developer building distributed systems";
        let result = scorer.score(text, text);
        assert_eq!(result.score, 100.0);
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_rounding_two_decimals() {
        // 1 of 3 jd tokens matched: 33.333... rounds to 33.33
        let scorer = OverlapScorer::default();
        let result = scorer.score("rust", "rust golang zig");
        assert_eq!(result.score, 33.33);
        assert_eq!(result.missing, vec!["golang", "zig"]);
    }

    #[test]
    fn test_monotonicity_under_keyword_addition() {
        let scorer = OverlapScorer::default();
        let resume = "Python developer";
        let jd = "Python AWS Docker Kubernetes Terraform";

        let base = scorer.score(resume, jd);
        for keyword in &base.missing {
            let augmented = format!("{} {}", resume, keyword);
            let improved = scorer.score(&augmented, jd);
            assert!(
                improved.score >= base.score,
                "adding '{}' lowered the score",
                keyword
            );
        }
    }

    #[test]
    fn test_removing_matched_keyword_cannot_increase() {
        let scorer = OverlapScorer::default();
        let jd = "python aws docker";
        let full = scorer.score("python aws docker", jd);
        let reduced = scorer.score("python aws", jd);
        assert!(reduced.score <= full.score);
    }

    #[test]
    fn test_range_invariant() {
        let scorer = OverlapScorer::default();
        let cases = [
            ("", ""),
            ("a", "b"),
            ("rust python", "rust python"),
            ("nothing shared here", "completely different posting"),
        ];
        for (resume, jd) in cases {
            let result = scorer.score(resume, jd);
            assert!((0.0..=100.0).contains(&result.score));
        }
    }

    #[test]
    fn test_determinism() {
        let scorer = OverlapScorer::default();
        let a = scorer.score("Rust tokio serde", "Rust tokio axum postgres");
        let b = scorer.score("Rust tokio serde", "Rust tokio axum postgres");
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_stopwords_change_universe() {
        let extractor = KeywordExtractor::new(StopwordList::from_words(["know", "must"]));
        let scorer = OverlapScorer::new(extractor);
        let result = scorer.score("python", "Must know Python");
        assert_eq!(result.score, 100.0);
    }
}

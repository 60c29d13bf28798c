//! Before/after optimization measurement and keyword-claim correlation

use crate::scoring::overlap::{OverlapScorer, ScoreResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A keyword the rewriter chose not to inject, with its stated reason.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedKeyword {
    pub keyword: String,
    pub reason: String,
}

/// Before/after overlap measurement for one optimization pass.
///
/// Held only for the duration of a display cycle; a new analysis replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationDelta {
    pub before: ScoreResult,
    pub after: ScoreResult,
    /// `after.score - before.score`. Negative when the rewrite paraphrased
    /// away exact keyword matches.
    pub improvement: f64,
}

/// The rewriter's keyword claims correlated against the measured missing sets.
///
/// Claims are compared, never recomputed: a claim counts as confirmed only if
/// the keyword actually left the measured missing set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeywordDisposition {
    /// Claimed added, was missing before, and no longer missing after.
    pub confirmed_added: Vec<String>,
    /// Claimed added but still absent from the measured revised text.
    pub unconfirmed_added: Vec<String>,
    /// Left the missing set without an accompanying claim.
    pub resolved_unclaimed: Vec<String>,
    /// Skip records passed through from the rewriter verbatim.
    pub skipped: Vec<SkippedKeyword>,
}

impl OptimizationDelta {
    /// Score the original and revised texts against the same job description.
    pub fn measure(
        scorer: &OverlapScorer,
        original_text: &str,
        revised_text: &str,
        job_text: &str,
    ) -> Self {
        let before = scorer.score(original_text, job_text);
        let after = scorer.score(revised_text, job_text);
        let improvement = after.score - before.score;

        Self {
            before,
            after,
            improvement,
        }
    }

    /// Correlate the rewriter's `keywords_added` / `keywords_skipped` claims
    /// with the measured before/after missing sets.
    pub fn correlate(
        &self,
        keywords_added: &[String],
        keywords_skipped: &[SkippedKeyword],
    ) -> KeywordDisposition {
        let before_missing: BTreeSet<&str> =
            self.before.missing.iter().map(|s| s.as_str()).collect();
        let after_missing: BTreeSet<&str> =
            self.after.missing.iter().map(|s| s.as_str()).collect();

        let claimed: BTreeSet<String> = keywords_added
            .iter()
            .map(|k| normalize_claim(k))
            .filter(|k| !k.is_empty())
            .collect();

        let mut confirmed_added = Vec::new();
        let mut unconfirmed_added = Vec::new();
        for claim in &claimed {
            if after_missing.contains(claim.as_str()) {
                unconfirmed_added.push(claim.clone());
            } else if before_missing.contains(claim.as_str()) {
                confirmed_added.push(claim.clone());
            }
            // Claims about keywords that were never missing are dropped: there
            // is nothing to verify them against.
        }

        let resolved_unclaimed: Vec<String> = before_missing
            .difference(&after_missing)
            .filter(|k| !claimed.contains(**k))
            .map(|k| k.to_string())
            .collect();

        KeywordDisposition {
            confirmed_added,
            unconfirmed_added,
            resolved_unclaimed,
            skipped: keywords_skipped.to_vec(),
        }
    }
}

/// Normalize a rewriter claim into the extractor's token form: lowercase, then
/// delete every character outside `[a-z0-9\s]`. The rewriter reports keywords
/// in surface form ("Node.js", "CI/CD"); the measured missing sets hold
/// normalized tokens ("nodejs", "cicd"), so claims must pass through the same
/// rule before comparison.
fn normalize_claim(claim: &str) -> String {
    claim
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect::<String>()
        .trim()
        .to_string()
}

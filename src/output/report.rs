//! Report records produced by the score and optimize flows

use crate::scoring::{KeywordDisposition, OptimizationDelta, ScoreResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub optimizer_version: String,
    pub resume_file: String,
    pub job_file: String,
    /// Rewriting model, when a rewrite ran.
    pub model: Option<String>,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_file: String, job_file: String) -> Self {
        Self {
            generated_at: Utc::now(),
            optimizer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file,
            job_file,
            model: None,
            processing_time_ms: 0,
        }
    }

    pub fn with_model(mut self, model: String) -> Self {
        self.model = Some(model);
        self
    }

    pub fn with_processing_time(mut self, ms: u64) -> Self {
        self.processing_time_ms = ms;
        self
    }
}

/// Result of a plain before-only analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreReport {
    pub result: ScoreResult,
    pub metadata: ReportMetadata,
}

/// Result of a full optimization pass: before/after measurement plus the
/// keyword-claim audit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizationReport {
    pub delta: OptimizationDelta,
    pub disposition: KeywordDisposition,
    pub metadata: ReportMetadata,
}

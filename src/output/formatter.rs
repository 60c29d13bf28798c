//! Output formatters: console, JSON, and markdown renderings of reports

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::report::{OptimizationReport, ScoreReport};
use colored::Colorize;
use std::fmt::Write as _;
use std::path::Path;

/// Trait for rendering reports into a displayable string.
pub trait OutputFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String>;
    fn format_optimization(&self, report: &OptimizationReport) -> Result<String>;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter;

pub struct MarkdownFormatter;

/// Dispatches reports to the formatter matching the requested output format.
pub struct ReportGenerator {
    console: ConsoleFormatter,
    json: JsonFormatter,
    markdown: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            use_colors,
            detailed,
        }
    }

    fn paint_score(&self, score: f64) -> String {
        let text = format!("{:.2}%", score);
        if !self.use_colors {
            return text;
        }
        if score >= 70.0 {
            text.as_str().green().bold().to_string()
        } else if score >= 40.0 {
            text.as_str().yellow().bold().to_string()
        } else {
            text.as_str().red().bold().to_string()
        }
    }

    fn keyword_lines(&self, label: &str, keywords: &[String], out: &mut String) {
        if keywords.is_empty() {
            return;
        }
        let shown = if self.detailed {
            keywords.len()
        } else {
            keywords.len().min(15)
        };
        let _ = writeln!(out, "\n{} ({}):", label, keywords.len());
        for keyword in &keywords[..shown] {
            let _ = writeln!(out, "  - {}", keyword);
        }
        if shown < keywords.len() {
            let _ = writeln!(out, "  ... and {} more", keywords.len() - shown);
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "ATS Keyword Analysis");
        let _ = writeln!(out, "  Resume: {}", report.metadata.resume_file);
        let _ = writeln!(out, "  Job description: {}", report.metadata.job_file);
        let _ = writeln!(out, "\n  Overlap score: {}", self.paint_score(report.result.score));
        self.keyword_lines("Missing keywords", &report.result.missing, &mut out);
        Ok(out)
    }

    fn format_optimization(&self, report: &OptimizationReport) -> Result<String> {
        let delta = &report.delta;
        let mut out = String::new();
        let _ = writeln!(out, "Resume Optimization Results");
        let _ = writeln!(out, "  Resume: {}", report.metadata.resume_file);
        let _ = writeln!(out, "  Job description: {}", report.metadata.job_file);
        if let Some(model) = &report.metadata.model {
            let _ = writeln!(out, "  Model: {}", model);
        }

        let _ = writeln!(out, "\n  Before: {}", self.paint_score(delta.before.score));
        let _ = writeln!(out, "  After:  {}", self.paint_score(delta.after.score));

        let improvement = format!("{:+.2}", delta.improvement);
        let improvement = if !self.use_colors {
            improvement
        } else if delta.improvement >= 0.0 {
            improvement.as_str().green().bold().to_string()
        } else {
            improvement.as_str().red().bold().to_string()
        };
        let _ = writeln!(out, "  Improvement: {} points", improvement);

        self.keyword_lines(
            "Confirmed added",
            &report.disposition.confirmed_added,
            &mut out,
        );
        self.keyword_lines(
            "Claimed but not found in revised text",
            &report.disposition.unconfirmed_added,
            &mut out,
        );
        self.keyword_lines(
            "Resolved without a claim",
            &report.disposition.resolved_unclaimed,
            &mut out,
        );
        if !report.disposition.skipped.is_empty() {
            let _ = writeln!(out, "\nSkipped by the rewriter:");
            for skip in &report.disposition.skipped {
                let _ = writeln!(out, "  - {}: {}", skip.keyword, skip.reason);
            }
        }
        self.keyword_lines("Still missing", &delta.after.missing, &mut out);

        let _ = writeln!(
            out,
            "\n  Processing time: {}ms",
            report.metadata.processing_time_ms
        );
        Ok(out)
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }

    fn format_optimization(&self, report: &OptimizationReport) -> Result<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}

impl MarkdownFormatter {
    fn keyword_section(&self, title: &str, keywords: &[String], out: &mut String) {
        if keywords.is_empty() {
            return;
        }
        let _ = writeln!(out, "\n## {}\n", title);
        for keyword in keywords {
            let _ = writeln!(out, "- `{}`", keyword);
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_score(&self, report: &ScoreReport) -> Result<String> {
        let mut out = String::new();
        let _ = writeln!(out, "# ATS Keyword Analysis\n");
        let _ = writeln!(out, "- Resume: `{}`", report.metadata.resume_file);
        let _ = writeln!(out, "- Job description: `{}`", report.metadata.job_file);
        let _ = writeln!(out, "- Overlap score: **{:.2}%**", report.result.score);
        self.keyword_section("Missing keywords", &report.result.missing, &mut out);
        Ok(out)
    }

    fn format_optimization(&self, report: &OptimizationReport) -> Result<String> {
        let delta = &report.delta;
        let mut out = String::new();
        let _ = writeln!(out, "# Resume Optimization Results\n");
        let _ = writeln!(out, "- Resume: `{}`", report.metadata.resume_file);
        let _ = writeln!(out, "- Job description: `{}`", report.metadata.job_file);
        if let Some(model) = &report.metadata.model {
            let _ = writeln!(out, "- Model: `{}`", model);
        }
        let _ = writeln!(out, "\n## Scores\n");
        let _ = writeln!(out, "| Before | After | Improvement |");
        let _ = writeln!(out, "|--------|-------|-------------|");
        let _ = writeln!(
            out,
            "| {:.2}% | {:.2}% | {:+.2} |",
            delta.before.score, delta.after.score, delta.improvement
        );
        self.keyword_section(
            "Confirmed added",
            &report.disposition.confirmed_added,
            &mut out,
        );
        self.keyword_section(
            "Claimed but not found in revised text",
            &report.disposition.unconfirmed_added,
            &mut out,
        );
        self.keyword_section(
            "Resolved without a claim",
            &report.disposition.resolved_unclaimed,
            &mut out,
        );
        if !report.disposition.skipped.is_empty() {
            let _ = writeln!(out, "\n## Skipped by the rewriter\n");
            for skip in &report.disposition.skipped {
                let _ = writeln!(out, "- `{}`: {}", skip.keyword, skip.reason);
            }
        }
        self.keyword_section("Still missing", &delta.after.missing, &mut out);
        Ok(out)
    }
}

impl ReportGenerator {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self {
            console: ConsoleFormatter::new(use_colors, detailed),
            json: JsonFormatter,
            markdown: MarkdownFormatter,
        }
    }

    pub fn render_score(&self, format: &OutputFormat, report: &ScoreReport) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format_score(report),
            OutputFormat::Json => self.json.format_score(report),
            OutputFormat::Markdown => self.markdown.format_score(report),
        }
    }

    pub fn render_optimization(
        &self,
        format: &OutputFormat,
        report: &OptimizationReport,
    ) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.format_optimization(report),
            OutputFormat::Json => self.json.format_optimization(report),
            OutputFormat::Markdown => self.markdown.format_optimization(report),
        }
    }

    pub fn save(&self, rendered: &str, path: &Path) -> Result<()> {
        std::fs::write(path, rendered)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::report::ReportMetadata;
    use crate::scoring::{KeywordDisposition, OptimizationDelta, OverlapScorer, SkippedKeyword};

    fn sample_optimization() -> OptimizationReport {
        let scorer = OverlapScorer::default();
        let delta = OptimizationDelta::measure(
            &scorer,
            "Python developer",
            "Python developer with AWS and Docker deployments",
            "Must know Python, AWS, Docker, and Kubernetes",
        );
        let disposition = delta.correlate(
            &["aws".to_string(), "docker".to_string()],
            &[SkippedKeyword {
                keyword: "kubernetes".to_string(),
                reason: "No cluster experience".to_string(),
            }],
        );
        OptimizationReport {
            delta,
            disposition,
            metadata: ReportMetadata::new("resume.txt".to_string(), "job.txt".to_string())
                .with_model("test-model".to_string()),
        }
    }

    #[test]
    fn test_console_plain_output() {
        let report = sample_optimization();
        let rendered = ConsoleFormatter::new(false, false)
            .format_optimization(&report)
            .unwrap();
        assert!(rendered.contains("Before: 25.00%"));
        assert!(rendered.contains("After:  75.00%"));
        assert!(rendered.contains("+50.00 points"));
        assert!(rendered.contains("kubernetes"));
    }

    #[test]
    fn test_json_output_roundtrips() {
        let report = sample_optimization();
        let rendered = JsonFormatter.format_optimization(&report).unwrap();
        let parsed: OptimizationReport = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed.delta.improvement, 50.0);
    }

    #[test]
    fn test_markdown_output() {
        let report = sample_optimization();
        let rendered = MarkdownFormatter.format_optimization(&report).unwrap();
        assert!(rendered.contains("# Resume Optimization Results"));
        assert!(rendered.contains("| 25.00% | 75.00% | +50.00 |"));
        assert!(rendered.contains("## Confirmed added"));
        assert!(rendered.contains("- `kubernetes`: No cluster experience"));
        assert!(rendered.is_ascii());
    }

    #[test]
    fn test_score_report_rendering() {
        let scorer = OverlapScorer::default();
        let report = ScoreReport {
            result: scorer.score("Python developer", "Python, AWS, Docker"),
            metadata: ReportMetadata::new("r.txt".to_string(), "j.txt".to_string()),
        };
        let generator = ReportGenerator::new(false, false);
        let console = generator
            .render_score(&OutputFormat::Console, &report)
            .unwrap();
        assert!(console.contains("33.33%"));
        let md = generator
            .render_score(&OutputFormat::Markdown, &report)
            .unwrap();
        assert!(md.contains("**33.33%**"));
    }

    #[test]
    fn test_empty_disposition_sections_omitted() {
        let scorer = OverlapScorer::default();
        let delta = OptimizationDelta::measure(&scorer, "rust", "rust", "rust");
        let report = OptimizationReport {
            disposition: KeywordDisposition::default(),
            delta,
            metadata: ReportMetadata::new("r.txt".to_string(), "j.txt".to_string()),
        };
        let rendered = ConsoleFormatter::new(false, false)
            .format_optimization(&report)
            .unwrap();
        assert!(!rendered.contains("Confirmed added"));
        assert!(!rendered.contains("Skipped by the rewriter"));
    }
}

//! Resume optimizer: ATS keyword scoring and AI-assisted resume rewriting

mod cli;
mod config;
mod error;
mod input;
mod output;
mod rewrite;
mod scoring;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction};
use config::{Config, OutputFormat};
use error::{Result, ResumeOptimizerError};
use indicatif::{ProgressBar, ProgressStyle};
use input::manager::InputManager;
use log::{error, info};
use output::{OptimizationReport, ReportGenerator, ReportMetadata, ScoreReport};
use rewrite::{ChatRewriter, RewriteRequest, TextRewriter};
use scoring::{KeywordExtractor, OptimizationDelta, OverlapScorer, StopwordList};
use std::path::Path;
use std::process;
use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Score {
            resume,
            job,
            output,
            save,
            detailed,
        } => {
            let (resume_text, job_text, format) =
                load_inputs(&resume, &job, &output).await?;

            let started = Instant::now();
            let scorer = build_scorer(&config);
            let result = scorer.score(&resume_text, &job_text);

            info!(
                "Scored {} job-description keywords missing",
                result.missing.len()
            );

            let report = ScoreReport {
                result,
                metadata: ReportMetadata::new(
                    resume.to_string_lossy().to_string(),
                    job.to_string_lossy().to_string(),
                )
                .with_processing_time(started.elapsed().as_millis() as u64),
            };

            let generator =
                ReportGenerator::new(config.output.color_output, detailed || config.output.detailed);
            let rendered = generator.render_score(&format, &report)?;
            emit(&generator, rendered, save.as_deref())?;
        }

        Commands::Optimize {
            resume,
            job,
            model,
            output,
            save,
            detailed,
        } => {
            let (resume_text, job_text, format) =
                load_inputs(&resume, &job, &output).await?;

            let started = Instant::now();
            let scorer = build_scorer(&config);
            let before = scorer.score(&resume_text, &job_text);
            info!(
                "Before optimization: {:.2}% ({} keywords missing)",
                before.score,
                before.missing.len()
            );

            let mut rewriter_config = config.rewriter.clone();
            if let Some(model) = model {
                rewriter_config.model = model;
            }
            let rewriter = ChatRewriter::new(rewriter_config)?;

            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner} {msg}")
                    .expect("Invalid spinner template"),
            );
            spinner.set_message(format!("Rewriting resume with {}...", rewriter.model()));
            spinner.enable_steady_tick(std::time::Duration::from_millis(120));

            let rewrite_result = rewriter
                .rewrite(&RewriteRequest {
                    resume_text: resume_text.clone(),
                    job_text: job_text.clone(),
                    missing_keywords: before.missing.clone(),
                })
                .await;
            spinner.finish_and_clear();

            // On rewrite failure the delta tracker is never invoked
            let rewritten = rewrite_result?;

            let revised_text = rewritten.to_plain_text();
            let delta = OptimizationDelta::measure(&scorer, &resume_text, &revised_text, &job_text);
            let disposition =
                delta.correlate(&rewritten.keywords_added, &rewritten.keywords_skipped);

            info!(
                "After optimization: {:.2}% (improvement {:+.2})",
                delta.after.score, delta.improvement
            );

            let report = OptimizationReport {
                delta,
                disposition,
                metadata: ReportMetadata::new(
                    resume.to_string_lossy().to_string(),
                    job.to_string_lossy().to_string(),
                )
                .with_model(rewriter.model().to_string())
                .with_processing_time(started.elapsed().as_millis() as u64),
            };

            let generator =
                ReportGenerator::new(config.output.color_output, detailed || config.output.detailed);
            let rendered = generator.render_optimization(&format, &report)?;
            emit(&generator, rendered, save.as_deref())?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("Configuration\n");
                println!("Rewriter endpoint: {}", config.rewriter.base_url);
                println!("Rewriter model: {}", config.rewriter.model);
                println!("API key env var: {}", config.rewriter.api_key_env);
                println!("Timeout: {}s", config.rewriter.timeout_secs);
                println!("Max retries: {}", config.rewriter.max_retries);
                println!(
                    "Extra stop-words: {}",
                    if config.scoring.extra_stopwords.is_empty() {
                        "(none)".to_string()
                    } else {
                        config.scoring.extra_stopwords.join(", ")
                    }
                );
            }
            Some(ConfigAction::Reset) => {
                Config::default().save()?;
                println!("Configuration reset to defaults");
            }
        },
    }

    Ok(())
}

/// Validate the input paths, extract their text, and parse the output format.
async fn load_inputs(
    resume: &Path,
    job: &Path,
    output: &str,
) -> Result<(String, String, OutputFormat)> {
    cli::validate_file_extension(resume, &["pdf", "txt", "md"])
        .map_err(|e| ResumeOptimizerError::InvalidInput(format!("Resume file: {}", e)))?;
    cli::validate_file_extension(job, &["txt", "md"])
        .map_err(|e| ResumeOptimizerError::InvalidInput(format!("Job description file: {}", e)))?;

    let format = cli::parse_output_format(output).map_err(ResumeOptimizerError::InvalidInput)?;

    let mut input_manager = InputManager::new();
    let resume_text = input_manager.extract_text(resume).await?;
    let job_text = input_manager.extract_text(job).await?;

    info!(
        "Extracted {} resume chars, {} job-description chars",
        resume_text.len(),
        job_text.len()
    );

    Ok((resume_text, job_text, format))
}

fn build_scorer(config: &Config) -> OverlapScorer {
    let stopwords =
        StopwordList::default().with_extra(config.scoring.extra_stopwords.iter().cloned());
    OverlapScorer::new(KeywordExtractor::new(stopwords))
}

fn emit(generator: &ReportGenerator, rendered: String, save: Option<&Path>) -> Result<()> {
    println!("{}", rendered);
    if let Some(path) = save {
        generator.save(&rendered, path)?;
        println!("Saved report to {}", path.display());
    }
    Ok(())
}

//! Per-format text extraction, flattened for keyword scoring

use crate::error::{Result, ResumeOptimizerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub async fn extract_pdf(path: &Path) -> Result<String> {
    let bytes = fs::read(path).await?;

    pdf_extract::extract_text_from_mem(&bytes).map_err(|e| {
        ResumeOptimizerError::PdfExtraction(format!(
            "Failed to extract text from PDF '{}': {}",
            path.display(),
            e
        ))
    })
}

pub async fn extract_plain_text(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).await?;
    Ok(content)
}

pub async fn extract_markdown(path: &Path) -> Result<String> {
    let markdown_content = fs::read_to_string(path).await?;
    Ok(markdown_to_text(&markdown_content))
}

/// Flatten markdown to the plain text the scorer consumes.
///
/// Walks the parser events and keeps only textual content: formatting marks,
/// heading levels, and link targets disappear, while block boundaries become
/// line breaks so section structure survives as plain lines.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak | Event::HardBreak => text.push('\n'),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_)) => text.push('\n'),
            _ => {}
        }
    }

    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    lines.join("\n")
}

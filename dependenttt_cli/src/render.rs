//! Output formats for highlighted documents

use crate::theme::Theme;
use clap::ValueEnum;
use dependenttt_mode::folding::FoldRange;
use dependenttt_mode::HighlightedDocument;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `line:start-end style "text"` entry per token
    Text,
    /// The highlighted document as JSON
    Json,
    /// The source colored for a terminal
    Ansi,
}

#[derive(Serialize)]
struct FileReport<'a> {
    file: &'a str,
    #[serde(flatten)]
    document: &'a HighlightedDocument,
    #[serde(skip_serializing_if = "Option::is_none")]
    folds: Option<&'a [FoldRange]>,
}

pub fn render(
    out: &mut dyn Write,
    format: OutputFormat,
    file: &str,
    document: &HighlightedDocument,
    folds: Option<&[FoldRange]>,
) -> io::Result<()> {
    match format {
        OutputFormat::Text => render_text(out, document, folds),
        OutputFormat::Json => render_json(out, file, document, folds),
        OutputFormat::Ansi => render_ansi(out, document, &Theme::default()),
    }
}

pub fn render_text(
    out: &mut dyn Write,
    document: &HighlightedDocument,
    folds: Option<&[FoldRange]>,
) -> io::Result<()> {
    for token in document.tokens() {
        writeln!(out, "{}", token)?;
    }
    for fold in folds.unwrap_or_default() {
        writeln!(out, "fold {}", fold)?;
    }
    Ok(())
}

pub fn render_json(
    out: &mut dyn Write,
    file: &str,
    document: &HighlightedDocument,
    folds: Option<&[FoldRange]>,
) -> io::Result<()> {
    let report = FileReport {
        file,
        document,
        folds,
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}

pub fn render_ansi(
    out: &mut dyn Write,
    document: &HighlightedDocument,
    theme: &Theme,
) -> io::Result<()> {
    for line in &document.lines {
        for token in &line.tokens {
            write!(out, "{}", theme.paint(token.style, &token.text))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

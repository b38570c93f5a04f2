//! Terminal rendering surface for the submission and results views.

use std::io::{self, Write};

use client_core::{
    render::{DisplayModel, ExternalLink, SourceList},
    ResultsView, SubmissionView,
};

#[derive(Default)]
pub struct TerminalSubmissionView {
    pub navigated: bool,
}

impl SubmissionView for TerminalSubmissionView {
    fn set_loading(&mut self, loading: bool) {
        if loading {
            eprintln!("Submitting for analysis...");
        }
    }

    fn show_error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }

    fn hide_error(&mut self) {}

    fn navigate_to_results(&mut self) {
        self.navigated = true;
    }

    fn set_word_count(&mut self, words: usize) {
        tracing::info!(words, "text ready");
    }

    fn show_file_info(&mut self, name: &str, size: &str) {
        eprintln!("Selected {name} ({size})");
    }

    fn hide_file_info(&mut self) {}
}

pub struct TerminalResultsView<W: Write + Send> {
    out: W,
}

impl TerminalResultsView<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write + Send> TerminalResultsView<W> {
    fn write_model(&mut self, model: &DisplayModel) -> io::Result<()> {
        let out = &mut self.out;
        writeln!(
            out,
            "Overall similarity: {} [{}]",
            model.summary.overall_label,
            model.meter.color.hex()
        )?;
        writeln!(
            out,
            "Sources: {}   Matches: {}",
            model.summary.sources_count, model.summary.total_matches
        )?;
        writeln!(
            out,
            "{}: {}",
            model.interpretation.headline(),
            model.interpretation.detail()
        )?;
        writeln!(out)?;

        let cards = match &model.sources {
            SourceList::NoMatches => {
                writeln!(out, "No matching sources found.")?;
                return out.flush();
            }
            SourceList::Sources(cards) => cards,
        };

        for card in cards {
            writeln!(
                out,
                "{} <{}> (opens with target={} rel=\"{}\")",
                card.link.text,
                card.link.href,
                ExternalLink::TARGET,
                ExternalLink::REL
            )?;
            writeln!(out, "  {} [{}]", card.badge.label(), card.badge.color.hex())?;
            for row in &card.matches {
                writeln!(out, "  > {}", row.sentence)?;
                writeln!(out, "    Similar to: {}", row.source_text)?;
                writeln!(
                    out,
                    "    {} {} [{}]",
                    similarity_bar(row.bar_width_percent),
                    row.label(),
                    row.color.hex()
                )?;
            }
            writeln!(out)?;
        }
        out.flush()
    }
}

impl<W: Write + Send> ResultsView for TerminalResultsView<W> {
    fn show_results(&mut self, model: &DisplayModel) {
        if let Err(error) = self.write_model(model) {
            tracing::error!(%error, "failed to write results");
        }
    }

    fn show_fatal(&mut self, message: &str) {
        eprintln!("Error: {message}");
    }
}

const BAR_WIDTH: usize = 20;

fn similarity_bar(width_percent: f64) -> String {
    let filled = ((width_percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

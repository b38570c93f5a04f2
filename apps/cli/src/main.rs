use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, HttpAnalysisApi, InputMode, PollChain, PollOutcome, ResultsPoller,
    SubmissionController, SubmissionEvent, TokioTimer,
};
use shared::domain::FileUpload;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod view;

use view::{TerminalResultsView, TerminalSubmissionView};

#[derive(Parser, Debug)]
#[command(name = "simcheck", about = "Submit content for a similarity check and wait for the report")]
struct Cli {
    /// Analysis service base URL; overrides the settings file and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file (defaults to ./simcheck.toml when present).
    #[arg(long)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check a piece of text.
    Text { text: String },
    /// Check a .txt, .doc, .docx or .pdf document.
    File { path: PathBuf },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    let api = Arc::new(HttpAnalysisApi::new(&settings).context("invalid analysis endpoint")?);
    info!(server_url = %settings.server_url, "using analysis service");

    let mut controller = SubmissionController::new(api.clone(), TerminalSubmissionView::default());
    let prepared = match cli.command {
        Command::Text { text } => controller
            .dispatch(SubmissionEvent::TextChanged(text))
            .map(|_| ()),
        Command::File { path } => {
            let bytes = tokio::fs::read(&path)
                .await
                .with_context(|| format!("failed to read '{}'", path.display()))?;
            let filename = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            controller
                .dispatch(SubmissionEvent::ModeSelected(InputMode::File))
                .and_then(|_| {
                    controller.dispatch(SubmissionEvent::FileSelected(FileUpload::new(filename, bytes)))
                })
                .map(|_| ())
        }
    };
    if prepared.is_err() {
        return Ok(ExitCode::FAILURE);
    }

    if controller.submit().await.is_err() || !controller.view().navigated {
        return Ok(ExitCode::FAILURE);
    }

    let chain = PollChain::new(
        api,
        Arc::new(TokioTimer),
        ResultsPoller::from_settings(&settings),
        TerminalResultsView::stdout(),
    );
    let report = chain.run().await;
    info!(queries = report.queries, "poll chain settled");

    match report.outcome {
        PollOutcome::Complete(_) => Ok(ExitCode::SUCCESS),
        PollOutcome::Fatal(_) | PollOutcome::Detached => Ok(ExitCode::FAILURE),
    }
}

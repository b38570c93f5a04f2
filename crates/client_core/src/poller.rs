//! Results polling: the `Idle -> Polling -> {Complete, Fatal}` state machine
//! and the chain that drives it against an [`AnalysisApi`].

use std::{sync::Arc, time::Duration};

use shared::{
    domain::AnalysisResult,
    protocol::{JobStatus, PollResponse},
};
use tracing::{debug, error, info, warn};

use crate::{
    api::AnalysisApi,
    config::Settings,
    error::{PollFailure, TransportError},
    render::{render, DisplayModel},
    timer::{PollHandle, Timer},
    view::ResultsView,
};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Idle,
    Polling {
        queries: u32,
    },
    Complete,
    Fatal(String),
}

impl PollerState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, PollerState::Complete | PollerState::Fatal(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollCommand {
    Query,
    QueryAfter(Duration),
    Render(AnalysisResult),
    Fail(PollFailure),
    Stop,
}

#[derive(Debug, Clone)]
pub struct ResultsPoller {
    state: PollerState,
    processing_delay: Duration,
    transport_retry_delay: Duration,
}

impl ResultsPoller {
    pub fn new(processing_delay: Duration, transport_retry_delay: Duration) -> Self {
        Self {
            state: PollerState::Idle,
            processing_delay,
            transport_retry_delay,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.processing_delay, settings.transport_retry_delay)
    }

    pub fn state(&self) -> &PollerState {
        &self.state
    }

    /// View entry: the first query goes out with no delay.
    pub fn start(&mut self) -> PollCommand {
        if self.state != PollerState::Idle {
            return PollCommand::Stop;
        }
        self.state = PollerState::Polling { queries: 1 };
        PollCommand::Query
    }

    pub fn on_response(&mut self, outcome: Result<PollResponse, TransportError>) -> PollCommand {
        let PollerState::Polling { queries } = self.state else {
            debug!(state = ?self.state, "poll response outside of an active chain; ignoring");
            return PollCommand::Stop;
        };

        let status = match outcome {
            Ok(response) => response.into_status().map_err(PollFailure::from),
            Err(err) => {
                warn!(error = %err, queries, "status query failed; retrying");
                self.state = PollerState::Polling {
                    queries: queries + 1,
                };
                return PollCommand::QueryAfter(self.transport_retry_delay);
            }
        };

        match status {
            Ok(JobStatus::Processing) => {
                self.state = PollerState::Polling {
                    queries: queries + 1,
                };
                PollCommand::QueryAfter(self.processing_delay)
            }
            Ok(JobStatus::Complete(result)) => {
                info!(queries, total_matches = result.total_matches, "analysis complete");
                self.state = PollerState::Complete;
                PollCommand::Render(result)
            }
            Ok(JobStatus::Failed { status, message }) => {
                self.fatal(PollFailure::service_reported(status, message))
            }
            Err(failure) => self.fatal(failure),
        }
    }

    fn fatal(&mut self, failure: PollFailure) -> PollCommand {
        error!(error = %failure, "analysis failed");
        self.state = PollerState::Fatal(failure.message());
        PollCommand::Fail(failure)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    Complete(DisplayModel),
    Fatal(PollFailure),
    /// The view went away while the chain was suspended.
    Detached,
}

#[derive(Debug)]
pub struct ChainReport<V> {
    pub outcome: PollOutcome,
    pub queries: u32,
    pub view: V,
}

/// One poll chain bound to one results view.
pub struct PollChain<V: ResultsView> {
    api: Arc<dyn AnalysisApi>,
    timer: Arc<dyn Timer>,
    poller: ResultsPoller,
    view: V,
}

impl<V: ResultsView> PollChain<V> {
    pub fn new(
        api: Arc<dyn AnalysisApi>,
        timer: Arc<dyn Timer>,
        poller: ResultsPoller,
        view: V,
    ) -> Self {
        Self {
            api,
            timer,
            poller,
            view,
        }
    }

    /// Queries strictly one at a time until a terminal state. There is no
    /// retry cap: a job stuck in `processing` polls forever.
    pub async fn run(mut self) -> ChainReport<V> {
        let mut queries = 0;
        let mut command = self.poller.start();

        let outcome = loop {
            match command {
                PollCommand::Query => {}
                PollCommand::QueryAfter(delay) => {
                    self.timer.sleep(delay).await;
                    if !self.view.is_attached() {
                        break PollOutcome::Detached;
                    }
                }
                PollCommand::Render(result) => {
                    let model = render(&result);
                    self.view.show_results(&model);
                    break PollOutcome::Complete(model);
                }
                PollCommand::Fail(failure) => {
                    self.view.show_fatal(&failure.message());
                    break PollOutcome::Fatal(failure);
                }
                PollCommand::Stop => break PollOutcome::Detached,
            }

            queries += 1;
            let response = self.api.poll().await;
            if !self.view.is_attached() {
                debug!(queries, "results view detached during status query");
                break PollOutcome::Detached;
            }
            command = self.poller.on_response(response);
        };

        ChainReport {
            outcome,
            queries,
            view: self.view,
        }
    }
}

impl<V: ResultsView + 'static> PollChain<V> {
    /// Runs the chain on the current runtime. Each call starts an
    /// independent chain; earlier chains are left running.
    pub fn spawn(self) -> PollHandle<ChainReport<V>> {
        PollHandle::new(tokio::spawn(self.run()))
    }
}

#[cfg(test)]
#[path = "tests/poller_tests.rs"]
mod tests;

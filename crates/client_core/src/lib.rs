//! Client side of the similarity-check workflow.
//!
//! [`SubmissionController`] sends one analysis request and hands off to the
//! results view, [`PollChain`] queries job status until it settles, and
//! [`render`] turns the finished payload into a [`DisplayModel`]. Rendering
//! surfaces plug in through the traits in [`view`].

pub mod api;
pub mod config;
pub mod error;
pub mod poller;
pub mod render;
pub mod submission;
pub mod timer;
pub mod view;

pub use api::{AnalysisApi, HttpAnalysisApi};
pub use config::{load_settings, Settings};
pub use error::{PollFailure, SettingsError, SubmitError, TransportError};
pub use poller::{ChainReport, PollChain, PollCommand, PollOutcome, PollerState, ResultsPoller};
pub use render::{render, DisplayModel};
pub use submission::{InputMode, SubmissionController, SubmissionEvent, SubmissionState};
pub use timer::{PollHandle, Timer, TokioTimer};
pub use view::{ResultsView, SubmissionView};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;

use std::{
    collections::VecDeque,
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{AnalysisRequest, AnalysisResult, SentenceMatch, SourceMatch},
    protocol::{PollResponse, SubmitResponse},
};

use crate::{
    api::AnalysisApi,
    error::TransportError,
    render::DisplayModel,
    timer::Timer,
    view::{ResultsView, SubmissionView},
};

/// Replays canned responses and records every call.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    submit_responses: Mutex<VecDeque<Result<SubmitResponse, TransportError>>>,
    poll_responses: Mutex<VecDeque<Result<PollResponse, TransportError>>>,
    pub submitted: Mutex<Vec<AnalysisRequest>>,
    pub polls: AtomicUsize,
}

impl ScriptedApi {
    pub fn with_submit(response: Result<SubmitResponse, TransportError>) -> Self {
        let api = Self::default();
        api.submit_responses
            .lock()
            .expect("lock")
            .push_back(response);
        api
    }

    pub fn with_polls(responses: Vec<Result<PollResponse, TransportError>>) -> Self {
        let api = Self::default();
        api.poll_responses.lock().expect("lock").extend(responses);
        api
    }

    pub fn submit_count(&self) -> usize {
        self.submitted.lock().expect("lock").len()
    }

    pub fn poll_count(&self) -> usize {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AnalysisApi for ScriptedApi {
    async fn submit(&self, request: &AnalysisRequest) -> Result<SubmitResponse, TransportError> {
        self.submitted.lock().expect("lock").push(request.clone());
        self.submit_responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| Ok(SubmitResponse::default()))
    }

    async fn poll(&self) -> Result<PollResponse, TransportError> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        self.poll_responses
            .lock()
            .expect("lock")
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected status query #{}", self.poll_count()))
    }
}

/// Records requested delays and returns immediately.
#[derive(Default)]
pub struct RecordingTimer {
    pub delays: Mutex<Vec<Duration>>,
}

impl RecordingTimer {
    pub fn delays(&self) -> Vec<Duration> {
        self.delays.lock().expect("lock").clone()
    }
}

#[async_trait]
impl Timer for RecordingTimer {
    async fn sleep(&self, delay: Duration) {
        self.delays.lock().expect("lock").push(delay);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCall {
    Loading(bool),
    Error(String),
    HideError,
    Navigate,
    WordCount(usize),
    FileInfo { name: String, size: String },
    HideFileInfo,
}

#[derive(Debug, Default)]
pub struct RecordingSubmissionView {
    pub calls: Vec<FormCall>,
}

impl RecordingSubmissionView {
    pub fn errors(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                FormCall::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn navigated(&self) -> bool {
        self.calls.contains(&FormCall::Navigate)
    }
}

impl SubmissionView for RecordingSubmissionView {
    fn set_loading(&mut self, loading: bool) {
        self.calls.push(FormCall::Loading(loading));
    }

    fn show_error(&mut self, message: &str) {
        self.calls.push(FormCall::Error(message.to_string()));
    }

    fn hide_error(&mut self) {
        self.calls.push(FormCall::HideError);
    }

    fn navigate_to_results(&mut self) {
        self.calls.push(FormCall::Navigate);
    }

    fn set_word_count(&mut self, words: usize) {
        self.calls.push(FormCall::WordCount(words));
    }

    fn show_file_info(&mut self, name: &str, size: &str) {
        self.calls.push(FormCall::FileInfo {
            name: name.to_string(),
            size: size.to_string(),
        });
    }

    fn hide_file_info(&mut self) {
        self.calls.push(FormCall::HideFileInfo);
    }
}

#[derive(Debug, Default)]
pub struct RecordingResultsView {
    pub rendered: Vec<DisplayModel>,
    pub fatal: Vec<String>,
    pub polls_seen_at_render: Vec<usize>,
    pub api: Option<Arc<ScriptedApi>>,
    pub attached: Option<Arc<AtomicBool>>,
}

impl RecordingResultsView {
    pub fn observing(api: Arc<ScriptedApi>) -> Self {
        Self {
            api: Some(api),
            ..Self::default()
        }
    }
}

impl ResultsView for RecordingResultsView {
    fn show_results(&mut self, model: &DisplayModel) {
        if let Some(api) = &self.api {
            self.polls_seen_at_render.push(api.poll_count());
        }
        self.rendered.push(model.clone());
    }

    fn show_fatal(&mut self, message: &str) {
        self.fatal.push(message.to_string());
    }

    fn is_attached(&self) -> bool {
        self.attached
            .as_ref()
            .map_or(true, |flag| flag.load(Ordering::SeqCst))
    }
}

pub fn sentence(text: &str, similarity: f64) -> SentenceMatch {
    SentenceMatch {
        sentence: text.to_string(),
        source_text: format!("source of {text}"),
        similarity,
    }
}

pub fn source(url: &str, avg_similarity: f64, sentences: Vec<SentenceMatch>) -> SourceMatch {
    SourceMatch {
        url: url.to_string(),
        title: format!("Title for {url}"),
        avg_similarity,
        matched_sentences: sentences,
    }
}

pub fn sample_result() -> AnalysisResult {
    AnalysisResult {
        overall_percentage: 22.0,
        total_matches: 3,
        results: vec![
            source(
                "https://example.org/low",
                0.52,
                vec![sentence("alpha", 0.52)],
            ),
            source(
                "https://example.org/high",
                0.81,
                vec![sentence("beta", 0.9), sentence("gamma", 0.72)],
            ),
        ],
    }
}

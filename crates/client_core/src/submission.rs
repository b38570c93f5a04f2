//! Submission side of the workflow: input form, validation, and the
//! `Idle -> Submitting -> {Idle, Error}` state machine.

use std::sync::Arc;

use shared::{
    domain::{AnalysisRequest, FileUpload},
    error::ValidationError,
    protocol::SubmitResponse,
};
use tracing::{debug, info, warn};

use crate::{
    api::AnalysisApi,
    error::{SubmitError, TransportError},
    view::SubmissionView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Text,
    File,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Error(String),
}

#[derive(Debug, Clone)]
pub enum SubmissionEvent {
    ModeSelected(InputMode),
    TextChanged(String),
    FileSelected(FileUpload),
    FileRemoved,
    Cleared,
    SubmitRequested,
    SubmitFinished(Result<SubmitResponse, TransportError>),
}

#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    pub mode: InputMode,
    pub text: String,
    pub file: Option<FileUpload>,
}

impl SubmissionForm {
    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }

    /// Builds the request from the active mode only; the inactive input is
    /// ignored even when it holds a value.
    pub fn to_request(&self) -> Result<AnalysisRequest, ValidationError> {
        match self.mode {
            InputMode::Text => AnalysisRequest::from_text(&self.text),
            InputMode::File => AnalysisRequest::from_file(self.file.clone()),
        }
    }
}

pub struct SubmissionController<V: SubmissionView> {
    api: Arc<dyn AnalysisApi>,
    view: V,
    form: SubmissionForm,
    state: SubmissionState,
}

impl<V: SubmissionView> SubmissionController<V> {
    pub fn new(api: Arc<dyn AnalysisApi>, view: V) -> Self {
        Self {
            api,
            view,
            form: SubmissionForm::default(),
            state: SubmissionState::Idle,
        }
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn form(&self) -> &SubmissionForm {
        &self.form
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn into_view(self) -> V {
        self.view
    }

    /// Applies one event. `SubmitRequested` yields the request to transmit
    /// when it passes validation and nothing is already in flight.
    pub fn dispatch(
        &mut self,
        event: SubmissionEvent,
    ) -> Result<Option<AnalysisRequest>, SubmitError> {
        match event {
            SubmissionEvent::ModeSelected(mode) => self.form.mode = mode,
            SubmissionEvent::TextChanged(text) => self.set_text(text),
            SubmissionEvent::FileSelected(file) => self.select_file(file)?,
            SubmissionEvent::FileRemoved => self.remove_file(),
            SubmissionEvent::Cleared => self.clear(),
            SubmissionEvent::SubmitRequested => return self.begin_submit().map(Some),
            SubmissionEvent::SubmitFinished(outcome) => self.finish_submit(outcome)?,
        }
        Ok(None)
    }

    pub fn set_text(&mut self, text: String) {
        self.form.text = text;
        self.view.set_word_count(self.form.word_count());
    }

    /// A rejected pick also drops any earlier selection so a later submit
    /// cannot send a file the user meant to replace.
    pub fn select_file(&mut self, file: FileUpload) -> Result<(), ValidationError> {
        if !file.has_allowed_extension() {
            let err = ValidationError::UnsupportedExtension {
                filename: file.filename,
            };
            self.remove_file();
            self.view.show_error(&err.to_string());
            return Err(err);
        }
        let size = file.size_label();
        debug!(filename = %file.filename, %size, "file selected");
        self.view.show_file_info(&file.filename, &size);
        self.form.file = Some(file);
        Ok(())
    }

    pub fn remove_file(&mut self) {
        self.form.file = None;
        self.view.hide_file_info();
    }

    /// Resets the active input only.
    pub fn clear(&mut self) {
        match self.form.mode {
            InputMode::Text => self.set_text(String::new()),
            InputMode::File => self.remove_file(),
        }
    }

    pub fn begin_submit(&mut self) -> Result<AnalysisRequest, SubmitError> {
        if self.state == SubmissionState::Submitting {
            debug!("ignoring submit while a request is in flight");
            return Err(SubmitError::InFlight);
        }

        let request = match self.form.to_request() {
            Ok(request) => request,
            Err(err) => return Err(self.fail(err.into())),
        };

        self.view.hide_error();
        self.view.set_loading(true);
        self.state = SubmissionState::Submitting;
        Ok(request)
    }

    pub fn finish_submit(
        &mut self,
        outcome: Result<SubmitResponse, TransportError>,
    ) -> Result<(), SubmitError> {
        if self.state != SubmissionState::Submitting {
            warn!("submit outcome arrived with no submission in flight; dropping");
            return Ok(());
        }
        self.view.set_loading(false);

        match outcome {
            Ok(response) => match response.rejection() {
                Some(message) => Err(self.fail(SubmitError::Application(message))),
                None => {
                    info!("analysis accepted; switching to results view");
                    self.state = SubmissionState::Idle;
                    self.view.navigate_to_results();
                    Ok(())
                }
            },
            Err(err) => Err(self.fail(SubmitError::Transport(err))),
        }
    }

    /// Validates, transmits once, and applies the outcome.
    pub async fn submit(&mut self) -> Result<(), SubmitError> {
        let request = self.begin_submit()?;
        let outcome = self.api.submit(&request).await;
        self.finish_submit(outcome)
    }

    fn fail(&mut self, err: SubmitError) -> SubmitError {
        let message = err.to_string();
        if err.reached_network() {
            warn!(error = %message, "submission failed");
        }
        self.view.show_error(&message);
        self.state = SubmissionState::Error(message);
        err
    }
}

#[cfg(test)]
#[path = "tests/submission_tests.rs"]
mod tests;

//! View bindings injected into the controller and poller.
//!
//! Each method corresponds to one visible mutation of the rendering surface.
//! Implementations are only ever called from the task driving the workflow.

use crate::render::DisplayModel;

pub trait SubmissionView: Send {
    fn set_loading(&mut self, loading: bool);
    fn show_error(&mut self, message: &str);
    fn hide_error(&mut self);
    fn navigate_to_results(&mut self);
    fn set_word_count(&mut self, words: usize);
    fn show_file_info(&mut self, name: &str, size: &str);
    fn hide_file_info(&mut self);
}

pub trait ResultsView: Send {
    fn show_results(&mut self, model: &DisplayModel);
    /// Blocking, non-recoverable notification.
    fn show_fatal(&mut self, message: &str);

    /// `false` once the view has been torn down. Checked after every
    /// suspension point before the view is touched again.
    fn is_attached(&self) -> bool {
        true
    }
}

//! Transport seam between the workflow and the remote analysis service.

use async_trait::async_trait;
use reqwest::{
    multipart::{Form, Part},
    Client,
};
use shared::{
    domain::AnalysisRequest,
    protocol::{PollResponse, SubmitResponse},
};
use tracing::debug;
use url::Url;

use crate::{
    config::Settings,
    error::{SettingsError, TransportError},
};

#[async_trait]
pub trait AnalysisApi: Send + Sync {
    async fn submit(&self, request: &AnalysisRequest) -> Result<SubmitResponse, TransportError>;
    async fn poll(&self) -> Result<PollResponse, TransportError>;
}

pub struct HttpAnalysisApi {
    http: Client,
    submit_url: Url,
    poll_url: Url,
}

impl HttpAnalysisApi {
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        let http = Client::builder()
            .timeout(settings.request_timeout)
            .build()
            .map_err(SettingsError::HttpClient)?;
        Self::with_client(http, settings)
    }

    pub fn with_client(http: Client, settings: &Settings) -> Result<Self, SettingsError> {
        Ok(Self {
            http,
            submit_url: settings.submit_url()?,
            poll_url: settings.poll_url()?,
        })
    }

    fn multipart_form(request: &AnalysisRequest) -> Result<Form, TransportError> {
        let form = Form::new().text("source_type", request.source_type().as_str());
        let form = match request {
            AnalysisRequest::Text { text } => form.text("text", text.clone()),
            AnalysisRequest::File(file) => {
                let mime = mime_guess::from_path(&file.filename).first_or_octet_stream();
                let part = Part::bytes(file.bytes.clone())
                    .file_name(file.filename.clone())
                    .mime_str(mime.essence_str())?;
                form.part("file", part)
            }
        };
        Ok(form)
    }
}

#[async_trait]
impl AnalysisApi for HttpAnalysisApi {
    async fn submit(&self, request: &AnalysisRequest) -> Result<SubmitResponse, TransportError> {
        let form = Self::multipart_form(request)?;
        debug!(
            url = %self.submit_url,
            source_type = request.source_type().as_str(),
            "submitting analysis request"
        );
        let response = self
            .http
            .post(self.submit_url.clone())
            .multipart(form)
            .send()
            .await?
            .json::<SubmitResponse>()
            .await?;
        Ok(response)
    }

    async fn poll(&self) -> Result<PollResponse, TransportError> {
        let response = self
            .http
            .get(self.poll_url.clone())
            .send()
            .await?
            .json::<PollResponse>()
            .await?;
        debug!(status = %response.status_text(), "poll response");
        Ok(response)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;

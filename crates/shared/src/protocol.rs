use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    domain::{AnalysisResult, SourceMatch},
    error::ProtocolError,
};

pub const STATUS_PROCESSING: &str = "processing";
pub const STATUS_COMPLETE: &str = "complete";

/// Body returned by the submit endpoint. Only `error` drives client behavior;
/// informational fields the service adds are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmitResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl SubmitResponse {
    pub fn rejected(error: impl Into<Value>) -> Self {
        Self {
            error: Some(error.into()),
        }
    }

    /// Rejection message when `error` is present and truthy.
    pub fn rejection(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::String(message) if message.is_empty() => None,
            Value::String(message) => Some(message.clone()),
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Body returned by the results endpoint.
///
/// Only `status` and `message` are read eagerly. Everything else stays raw in
/// `payload` and is decoded by [`PollResponse::into_status`] once the status
/// says a result is present, so a malformed result is reported against a
/// known status instead of failing the whole body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PollResponse {
    #[serde(default)]
    pub status: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

#[derive(Deserialize)]
struct CompletePayload {
    overall_percentage: Option<f64>,
    total_matches: Option<u64>,
    results: Option<Vec<SourceMatch>>,
}

impl PollResponse {
    pub fn with_status(status: impl Into<String>) -> Self {
        Self {
            status: Value::String(status.into()),
            ..Self::default()
        }
    }

    pub fn processing() -> Self {
        Self::with_status(STATUS_PROCESSING)
    }

    pub fn complete(result: AnalysisResult) -> Self {
        let payload = match serde_json::to_value(result) {
            Ok(Value::Object(fields)) => fields,
            _ => Map::new(),
        };
        Self {
            payload,
            ..Self::with_status(STATUS_COMPLETE)
        }
    }

    pub fn failed(status: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: Some(Value::String(message.into())),
            ..Self::with_status(status)
        }
    }

    pub fn status_text(&self) -> String {
        match &self.status {
            Value::String(status) => status.clone(),
            other => other.to_string(),
        }
    }

    pub fn into_status(self) -> Result<JobStatus, ProtocolError> {
        match self.status.as_str() {
            Some(STATUS_PROCESSING) => Ok(JobStatus::Processing),
            Some(STATUS_COMPLETE) => {
                let payload: CompletePayload = serde_json::from_value(Value::Object(self.payload))
                    .map_err(|err| ProtocolError::Malformed {
                        detail: err.to_string(),
                    })?;
                let missing = |field| ProtocolError::MissingField { field };
                let overall_percentage = payload
                    .overall_percentage
                    .ok_or_else(|| missing("overall_percentage"))?;
                let total_matches = payload
                    .total_matches
                    .ok_or_else(|| missing("total_matches"))?;
                let results = payload.results.ok_or_else(|| missing("results"))?;
                Ok(JobStatus::Complete(AnalysisResult {
                    overall_percentage,
                    total_matches,
                    results,
                }))
            }
            _ => Ok(JobStatus::Failed {
                status: self.status_text(),
                message: self.message.and_then(message_text),
            }),
        }
    }
}

fn message_text(message: Value) -> Option<String> {
    match message {
        Value::Null => None,
        Value::String(text) => Some(text),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JobStatus {
    Processing,
    Complete(AnalysisResult),
    Failed {
        status: String,
        message: Option<String>,
    },
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobStatus::Processing)
    }
}

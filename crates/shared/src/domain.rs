use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Extensions accepted client-side before a file is sent for analysis.
/// The remote service re-validates; this list is advisory.
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["txt", "doc", "docx", "pdf"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    Text,
    File,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::Text => "text",
            SourceType::File => "file",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            bytes,
        }
    }

    /// Lowercased text after the last dot. A name without a dot yields the
    /// whole name, which never matches the accept list.
    pub fn extension(&self) -> String {
        self.filename
            .rsplit('.')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    pub fn has_allowed_extension(&self) -> bool {
        self.filename.contains('.') && ALLOWED_EXTENSIONS.contains(&self.extension().as_str())
    }

    pub fn size_bytes(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn size_label(&self) -> String {
        format_file_size(self.size_bytes())
    }
}

pub fn format_file_size(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} bytes")
    } else if bytes < 1_048_576 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / 1_048_576.0)
    }
}

/// One analysis submission. Exactly one payload is carried; the variant is
/// the `source_type` tag on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisRequest {
    Text { text: String },
    File(FileUpload),
}

impl AnalysisRequest {
    pub fn from_text(raw: &str) -> Result<Self, ValidationError> {
        let text = raw.trim();
        if text.is_empty() {
            return Err(ValidationError::EmptyText);
        }
        Ok(Self::Text {
            text: text.to_string(),
        })
    }

    pub fn from_file(file: Option<FileUpload>) -> Result<Self, ValidationError> {
        let file = file.ok_or(ValidationError::MissingFile)?;
        if !file.has_allowed_extension() {
            return Err(ValidationError::UnsupportedExtension {
                filename: file.filename,
            });
        }
        Ok(Self::File(file))
    }

    pub fn source_type(&self) -> SourceType {
        match self {
            AnalysisRequest::Text { .. } => SourceType::Text,
            AnalysisRequest::File(_) => SourceType::File,
        }
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            AnalysisRequest::Text { text } => Some(text),
            AnalysisRequest::File(_) => None,
        }
    }

    pub fn file(&self) -> Option<&FileUpload> {
        match self {
            AnalysisRequest::Text { .. } => None,
            AnalysisRequest::File(file) => Some(file),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentenceMatch {
    pub sentence: String,
    pub source_text: String,
    pub similarity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceMatch {
    pub url: String,
    pub title: String,
    pub avg_similarity: f64,
    #[serde(default)]
    pub matched_sentences: Vec<SentenceMatch>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overall_percentage: f64,
    pub total_matches: u64,
    pub results: Vec<SourceMatch>,
}

use thiserror::Error;

/// Local input problems caught before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some text to check for plagiarism.")]
    EmptyText,
    #[error("Please select a file to check for plagiarism.")]
    MissingFile,
    #[error("Invalid file type. Please upload a .txt, .doc, .docx, or .pdf file.")]
    UnsupportedExtension { filename: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("complete status is missing field `{field}`")]
    MissingField { field: &'static str },
    #[error("complete status carries a malformed result: {detail}")]
    Malformed { detail: String },
}

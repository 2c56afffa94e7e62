//! Error types for the boleto-core library.

use thiserror::Error;

use crate::models::boleto::RecordField;

/// Main error type for the boleto library.
#[derive(Error, Debug)]
pub enum BoletoError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised by a boleto store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Database driver error.
    #[cfg(feature = "sqlite")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A stored row could not be mapped back to a record.
    #[error("invalid stored row: {0}")]
    InvalidRow(String),

    /// Backend-specific failure.
    #[error("{0}")]
    Backend(String),
}

/// Why a single uploaded file was not turned into a stored boleto.
///
/// The `Display` text is the detail message returned to API clients.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// The file name does not carry the `.pdf` extension.
    #[error("Arquivo não é um PDF.")]
    InvalidFileType,

    /// The uploaded payload has no bytes.
    #[error("O arquivo está vazio ou não pôde ser lido.")]
    EmptyFile,

    /// The PDF has no usable text layer.
    #[error("O texto não pôde ser extraído.")]
    TextExtractionFailed,

    /// No known template marker was found in the text.
    #[error("Tipo de boleto não reconhecido.")]
    UnrecognizedDocumentType,

    /// Extraction left some attributes empty.
    #[error("Dados incompletos, não foi possível salvar.")]
    IncompleteFields(Vec<RecordField>),

    /// The store refused the record.
    #[error("Erro ao salvar o boleto: {0}")]
    PersistenceFailed(String),

    /// Unexpected fault while processing the file.
    #[error("Erro ao processar o arquivo: {0}")]
    InternalError(String),
}

impl Rejection {
    /// Short machine-readable name, used in logs and CLI summaries.
    pub fn kind(&self) -> &'static str {
        match self {
            Rejection::InvalidFileType => "invalid_file_type",
            Rejection::EmptyFile => "empty_file",
            Rejection::TextExtractionFailed => "text_extraction_failed",
            Rejection::UnrecognizedDocumentType => "unrecognized_document_type",
            Rejection::IncompleteFields(_) => "incomplete_fields",
            Rejection::PersistenceFailed(_) => "persistence_failed",
            Rejection::InternalError(_) => "internal_error",
        }
    }

    /// Informational HTTP status for this file.
    pub fn status_code(&self) -> u16 {
        match self {
            Rejection::PersistenceFailed(_) | Rejection::InternalError(_) => 500,
            _ => 400,
        }
    }

    /// Missing attributes, when the rejection is about an incomplete record.
    pub fn missing_fields(&self) -> Option<&[RecordField]> {
        match self {
            Rejection::IncompleteFields(fields) => Some(fields),
            _ => None,
        }
    }
}

/// Result type for the boleto library.
pub type Result<T> = std::result::Result<T, BoletoError>;

//! Core library for boleto (Brazilian payment slip) PDF processing.
//!
//! This crate provides:
//! - PDF text extraction
//! - Template classification by marker phrase
//! - Rule-based field extraction (installation/user codes, due date, amount, digitable line)
//! - Completeness validation and storage of extracted boletos

pub mod boleto;
pub mod error;
pub mod models;
pub mod pdf;
pub mod pipeline;
pub mod store;
pub mod upload;

pub use boleto::{BoletoExtractor, Classification, DocumentClassifier, InternetBoletoExtractor};
pub use error::{BoletoError, PdfError, Rejection, Result, StoreError};
pub use models::boleto::{BoletoRecord, DocumentType, ExtractedRecord, PersistedBoleto, RecordField};
pub use models::config::BoletoConfig;
pub use pdf::{PdfExtractor, TextExtractor};
pub use pipeline::ExtractionPipeline;
pub use store::{BoletoStore, MemoryStore};
#[cfg(feature = "sqlite")]
pub use store::SqliteStore;
pub use upload::{process_batch, validate_batch, FileOutcome, FileResponse, UploadedFile};

//! Per-file processing: bytes to stored boleto.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, error, info, warn};

use crate::boleto::DocumentClassifier;
use crate::error::Rejection;
use crate::models::boleto::{BoletoRecord, PersistedBoleto};
use crate::pdf::TextExtractor;
use crate::store::BoletoStore;

/// Extension every accepted upload must carry.
pub const PDF_EXTENSION: &str = ".pdf";

/// Runs one uploaded file through extraction, validation and storage.
#[derive(Clone)]
pub struct ExtractionPipeline {
    text_extractor: Arc<dyn TextExtractor>,
    classifier: DocumentClassifier,
    store: Arc<dyn BoletoStore>,
}

impl ExtractionPipeline {
    /// Create a pipeline with the default classifier.
    pub fn new(text_extractor: Arc<dyn TextExtractor>, store: Arc<dyn BoletoStore>) -> Self {
        Self {
            text_extractor,
            classifier: DocumentClassifier::new(),
            store,
        }
    }

    /// Use a custom classifier.
    pub fn with_classifier(mut self, classifier: DocumentClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn classifier(&self) -> &DocumentClassifier {
        &self.classifier
    }

    /// Extract and validate a file without storing it.
    ///
    /// Decoder errors and panics are converted into
    /// [`Rejection::InternalError`] here and never reach the caller.
    pub fn prepare(&self, file_name: &str, data: &[u8]) -> Result<BoletoRecord, Rejection> {
        match panic::catch_unwind(AssertUnwindSafe(|| self.prepare_inner(file_name, data))) {
            Ok(result) => result,
            Err(payload) => {
                let message = panic_message(payload.as_ref());
                error!("Panic while processing {}: {}", file_name, message);
                Err(Rejection::InternalError(message))
            }
        }
    }

    fn prepare_inner(&self, file_name: &str, data: &[u8]) -> Result<BoletoRecord, Rejection> {
        if data.is_empty() {
            return Err(Rejection::EmptyFile);
        }

        if !has_pdf_extension(file_name) {
            return Err(Rejection::InvalidFileType);
        }

        let text = self.text_extractor.extract_text(data).map_err(|e| {
            error!("Text extraction failed for {}: {:?}", file_name, e);
            Rejection::InternalError(e.to_string())
        })?;

        if text.trim().is_empty() {
            return Err(Rejection::TextExtractionFailed);
        }
        debug!("Extracted {} characters from {}", text.len(), file_name);

        let classification = self
            .classifier
            .classify(&text)
            .ok_or(Rejection::UnrecognizedDocumentType)?;

        classification
            .extract(&text)
            .into_complete()
            .map_err(Rejection::IncompleteFields)
    }

    /// Extract, validate and store a file.
    ///
    /// Decoding runs on the blocking thread pool; only the insert runs on
    /// the async worker.
    pub async fn process(&self, file_name: &str, data: &[u8]) -> Result<PersistedBoleto, Rejection> {
        let start = Instant::now();

        let pipeline = self.clone();
        let name = file_name.to_string();
        let bytes = data.to_vec();
        let record = tokio::task::spawn_blocking(move || pipeline.prepare(&name, &bytes))
            .await
            .unwrap_or_else(|e| {
                error!("Extraction task for {} failed: {}", file_name, e);
                Err(Rejection::InternalError(e.to_string()))
            })
            .inspect_err(|rejection| {
                warn!("Rejected {}: {} ({})", file_name, rejection, rejection.kind());
            })?;

        let id = self.store.insert(&record).await.map_err(|e| {
            error!("Failed to store boleto from {}: {}", file_name, e);
            Rejection::PersistenceFailed(e.to_string())
        })?;

        info!(
            "Stored boleto {} from {} in {}ms",
            id,
            file_name,
            start.elapsed().as_millis()
        );

        Ok(PersistedBoleto { id, record })
    }
}

/// Check the `.pdf` extension, ignoring case.
pub fn has_pdf_extension(file_name: &str) -> bool {
    file_name.to_lowercase().ends_with(PDF_EXTENSION)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unexpected panic".to_string()
    }
}

//! Marker-based document classification.

use std::fmt;

use tracing::{debug, warn};

use crate::models::boleto::{DocumentType, ExtractedRecord};
use crate::models::config::ExtractionConfig;

use super::{BoletoExtractor, InternetBoletoExtractor};

static INTERNET: InternetBoletoExtractor = InternetBoletoExtractor::new();

/// Extraction strategy bound to a document type.
pub fn strategy_for(document_type: DocumentType) -> &'static dyn BoletoExtractor {
    match document_type {
        DocumentType::Internet => &INTERNET,
    }
}

/// A recognized document and the strategy that extracts it.
#[derive(Clone, Copy)]
pub struct Classification {
    pub document_type: DocumentType,
    pub extractor: &'static dyn BoletoExtractor,
}

impl Classification {
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            extractor: strategy_for(document_type),
        }
    }

    /// Run the bound strategy.
    pub fn extract(&self, text: &str) -> ExtractedRecord {
        self.extractor.extract(text)
    }
}

impl fmt::Debug for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Classification")
            .field("document_type", &self.document_type)
            .finish_non_exhaustive()
    }
}

/// Decides which template, if any, a document follows.
///
/// Each binding pairs a marker phrase with a document type. The first
/// binding whose marker occurs anywhere in the text wins.
#[derive(Debug, Clone)]
pub struct DocumentClassifier {
    bindings: Vec<(String, DocumentType)>,
}

impl DocumentClassifier {
    /// Classifier with the built-in marker of every template.
    pub fn new() -> Self {
        Self {
            bindings: DocumentType::ALL
                .into_iter()
                .map(|t| (t.default_marker().to_string(), t))
                .collect(),
        }
    }

    /// Classifier using the configured markers.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self::new().with_marker(DocumentType::Internet, &config.internet_marker)
    }

    /// Replace the marker bound to `document_type`. Empty markers are ignored.
    pub fn with_marker(mut self, document_type: DocumentType, marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if marker.trim().is_empty() {
            warn!("Ignoring empty marker for {} boletos", document_type);
            return self;
        }

        self.bindings.retain(|(_, t)| *t != document_type);
        self.bindings.push((marker, document_type));
        self
    }

    /// Marker currently bound to `document_type`.
    pub fn marker(&self, document_type: DocumentType) -> Option<&str> {
        self.bindings
            .iter()
            .find(|(_, t)| *t == document_type)
            .map(|(marker, _)| marker.as_str())
    }

    /// Classify a document by its text.
    pub fn classify(&self, text: &str) -> Option<Classification> {
        let found = self
            .bindings
            .iter()
            .find(|(marker, _)| text.contains(marker.as_str()))
            .map(|(_, document_type)| Classification::new(*document_type));

        match &found {
            Some(c) => debug!("Document classified as {}", c.document_type),
            None => debug!("No template marker found in {} characters of text", text.len()),
        }

        found
    }
}

impl Default for DocumentClassifier {
    fn default() -> Self {
        Self::new()
    }
}

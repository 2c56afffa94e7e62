//! Boleto classification and field extraction.

mod classifier;
mod parser;
pub mod rules;

pub use classifier::{strategy_for, Classification, DocumentClassifier};
pub use parser::InternetBoletoExtractor;

use crate::models::boleto::ExtractedRecord;

/// Extraction strategy for one boleto template.
///
/// Extraction never fails: rules that find nothing leave the attribute
/// empty and the caller decides what an incomplete record means.
pub trait BoletoExtractor: Send + Sync {
    /// Extract the template's fields from plain text.
    fn extract(&self, text: &str) -> ExtractedRecord;
}

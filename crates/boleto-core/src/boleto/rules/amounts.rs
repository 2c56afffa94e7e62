//! Total amount extraction.

use super::FieldExtractor;
use super::patterns::TOTAL_AMOUNT;

/// Amount field extractor.
///
/// Keeps the number exactly as printed after `R$` (for example `1.234,56`);
/// separators are not normalized.
#[derive(Debug, Clone, Copy, Default)]
pub struct AmountExtractor;

impl AmountExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for AmountExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        TOTAL_AMOUNT
            .captures_iter(text)
            .map(|caps| caps[1].to_string())
            .collect()
    }
}

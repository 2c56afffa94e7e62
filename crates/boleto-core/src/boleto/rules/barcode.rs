//! Digitable line (linha digitável) extraction.

use super::FieldExtractor;
use super::patterns::BARCODE;

/// Length of the extracted digitable line: four blocks of 11 digits plus
/// one check digit each.
pub const BARCODE_DIGITS: usize = 48;

/// Barcode field extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct BarcodeExtractor;

impl BarcodeExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl FieldExtractor for BarcodeExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        self.extract_all(text).into_iter().next()
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        BARCODE
            .find_iter(text)
            .map(|m| {
                m.as_str()
                    .chars()
                    .filter(|c| *c != '-' && !c.is_whitespace())
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const LINE: &str = "83640000001-2 29900048100-5 12345678901-3 23456789012-4";

    #[test]
    fn test_extract_barcode() {
        let barcode = BarcodeExtractor::new().extract(LINE).unwrap();

        assert_eq!(barcode, "836400000012299000481005123456789013234567890124");
        assert_eq!(barcode.len(), BARCODE_DIGITS);
        assert!(barcode.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_barcode_blocks_across_lines() {
        let text = "Linha digitável:\n83640000001-2\n29900048100-5\n12345678901-3\n23456789012-4\n";
        let barcode = BarcodeExtractor::new().extract(text).unwrap();

        assert_eq!(barcode.len(), BARCODE_DIGITS);
    }

    #[test]
    fn test_incomplete_barcode() {
        let text = "83640000001-2 29900048100-5 12345678901-3";
        assert_eq!(BarcodeExtractor::new().extract(text), None);
    }
}

//! Rule-based field extractors for boletos.

pub mod amounts;
pub mod barcode;
pub mod codes;
pub mod dates;
pub mod patterns;

pub use amounts::AmountExtractor;
pub use barcode::{BarcodeExtractor, BARCODE_DIGITS};
pub use codes::{InstallationCodeExtractor, UserCodeExtractor};
pub use dates::{latest_date, normalize_dates, DateNormalizer, DueDateExtractor};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

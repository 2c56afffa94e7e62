//! PDF processing module.

mod extractor;

pub use extractor::PdfExtractor;

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Turns raw document bytes into linear text.
///
/// Implementations return the text of all pages in document order. An
/// image-only document yields empty text rather than an error.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of the whole document.
    fn extract_text(&self, data: &[u8]) -> Result<String>;
}

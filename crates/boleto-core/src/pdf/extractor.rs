//! PDF text extraction using lopdf and pdf-extract.

use std::borrow::Cow;

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextExtractor};
use crate::error::PdfError;

/// PDF text extractor.
///
/// Documents are opened with lopdf first so that PDFs protected by an empty
/// user password can be decrypted before pdf-extract reads the text layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfExtractor;

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self
    }

    /// Count the pages of a document.
    pub fn page_count(&self, data: &[u8]) -> Result<u32> {
        let doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;
        Ok(doc.get_pages().len() as u32)
    }

    /// Return bytes that pdf-extract can read, decrypting if needed.
    fn readable_bytes<'a>(&self, data: &'a [u8]) -> Result<Cow<'a, [u8]>> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }
        debug!("Loaded PDF with {} pages", page_count);

        if !doc.is_encrypted() {
            return Ok(Cow::Borrowed(data));
        }

        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
        Ok(Cow::Owned(decrypted))
    }
}

impl TextExtractor for PdfExtractor {
    fn extract_text(&self, data: &[u8]) -> Result<String> {
        let raw = self.readable_bytes(data)?;

        let text = pdf_extract::extract_text_from_mem(&raw)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;

        trace!("Extracted {} characters of text", text.len());
        Ok(text)
    }
}

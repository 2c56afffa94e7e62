//! Field extraction for the internet bill template.

use tracing::debug;

use crate::models::boleto::{DocumentType, ExtractedRecord};

use super::rules::{
    AmountExtractor, BarcodeExtractor, DueDateExtractor, FieldExtractor,
    InstallationCodeExtractor, UserCodeExtractor,
};
use super::BoletoExtractor;

/// Extraction strategy for [`DocumentType::Internet`] bills.
#[derive(Debug, Clone, Copy, Default)]
pub struct InternetBoletoExtractor {
    installation_code: InstallationCodeExtractor,
    user_code: UserCodeExtractor,
    due_date: DueDateExtractor,
    total_amount: AmountExtractor,
    barcode: BarcodeExtractor,
}

impl InternetBoletoExtractor {
    pub const fn new() -> Self {
        Self {
            installation_code: InstallationCodeExtractor,
            user_code: UserCodeExtractor,
            due_date: DueDateExtractor::new(),
            total_amount: AmountExtractor,
            barcode: BarcodeExtractor,
        }
    }
}

impl BoletoExtractor for InternetBoletoExtractor {
    fn extract(&self, text: &str) -> ExtractedRecord {
        let record = ExtractedRecord {
            installation_code: self.installation_code.extract(text),
            user_code: self.user_code.extract(text),
            due_date: self.due_date.extract(text),
            total_amount: self.total_amount.extract(text),
            barcode: self.barcode.extract(text),
            ..ExtractedRecord::new(DocumentType::Internet)
        };

        debug!(
            "Extracted internet boleto: installation={:?} user={:?} due={:?} amount={:?} barcode={}",
            record.installation_code,
            record.user_code,
            record.due_date,
            record.total_amount,
            record.barcode.is_some()
        );

        record
    }
}

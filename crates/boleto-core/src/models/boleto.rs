//! Boleto data models.
//!
//! Column and JSON names follow the storage schema (`boleto_tipo`,
//! `codigo_instalacao`, ...); Rust field names are English.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Placeholder stored as the issuer tax id (CNPJ). It is not read from the document.
pub const ISSUER_TAX_ID_PLACEHOLDER: &str = "00.00.000/0000-00";

/// Recognized boleto templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// Internet service bill.
    Internet,
}

impl DocumentType {
    /// All supported templates, in classification order.
    pub const ALL: [DocumentType; 1] = [DocumentType::Internet];

    /// Tag stored in the `boleto_tipo` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Internet => "internet",
        }
    }

    /// Boilerplate phrase printed on every document of this template.
    pub fn default_marker(&self) -> &'static str {
        match self {
            DocumentType::Internet => "Alguma frase para identificar o boleto",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown document type: {}", s))
    }
}

/// Attributes of a boleto record, in completeness-check order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordField {
    #[serde(rename = "boleto_tipo")]
    DocumentType,
    #[serde(rename = "codigo_instalacao")]
    InstallationCode,
    #[serde(rename = "codigo_usuario")]
    UserCode,
    #[serde(rename = "vencimento")]
    DueDate,
    #[serde(rename = "valor_total")]
    TotalAmount,
    #[serde(rename = "cod_barras")]
    Barcode,
    #[serde(rename = "cnpj_concessionaria")]
    IssuerTaxId,
}

impl RecordField {
    pub const ALL: [RecordField; 7] = [
        RecordField::DocumentType,
        RecordField::InstallationCode,
        RecordField::UserCode,
        RecordField::DueDate,
        RecordField::TotalAmount,
        RecordField::Barcode,
        RecordField::IssuerTaxId,
    ];

    /// Attribute name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            RecordField::DocumentType => "document_type",
            RecordField::InstallationCode => "installation_code",
            RecordField::UserCode => "user_code",
            RecordField::DueDate => "due_date",
            RecordField::TotalAmount => "total_amount",
            RecordField::Barcode => "barcode",
            RecordField::IssuerTaxId => "issuer_tax_id",
        }
    }

    /// Storage column / JSON key.
    pub fn column(&self) -> &'static str {
        match self {
            RecordField::DocumentType => "boleto_tipo",
            RecordField::InstallationCode => "codigo_instalacao",
            RecordField::UserCode => "codigo_usuario",
            RecordField::DueDate => "vencimento",
            RecordField::TotalAmount => "valor_total",
            RecordField::Barcode => "cod_barras",
            RecordField::IssuerTaxId => "cnpj_concessionaria",
        }
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Candidate field values pulled out of a document's text.
///
/// Built once per file and never mutated; absent values are reported by
/// [`ExtractedRecord::missing_fields`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedRecord {
    /// Template the record was extracted with.
    pub document_type: DocumentType,

    /// Twelve-digit installation code.
    pub installation_code: Option<String>,

    /// Customer code (8 to 11 digits).
    pub user_code: Option<String>,

    /// Due date as `dd/mm/yyyy`.
    pub due_date: Option<String>,

    /// Amount as printed, without currency symbol.
    pub total_amount: Option<String>,

    /// Digitable line with separators removed.
    pub barcode: Option<String>,

    /// Issuer tax id placeholder.
    pub issuer_tax_id: String,
}

impl ExtractedRecord {
    /// Create an empty record for a template.
    pub fn new(document_type: DocumentType) -> Self {
        Self {
            document_type,
            installation_code: None,
            user_code: None,
            due_date: None,
            total_amount: None,
            barcode: None,
            issuer_tax_id: ISSUER_TAX_ID_PLACEHOLDER.to_string(),
        }
    }

    fn value(&self, field: RecordField) -> Option<&str> {
        match field {
            RecordField::DocumentType => Some(self.document_type.as_str()),
            RecordField::InstallationCode => self.installation_code.as_deref(),
            RecordField::UserCode => self.user_code.as_deref(),
            RecordField::DueDate => self.due_date.as_deref(),
            RecordField::TotalAmount => self.total_amount.as_deref(),
            RecordField::Barcode => self.barcode.as_deref(),
            RecordField::IssuerTaxId => Some(self.issuer_tax_id.as_str()),
        }
    }

    /// Attributes that are absent or empty, in declaration order.
    pub fn missing_fields(&self) -> Vec<RecordField> {
        RecordField::ALL
            .into_iter()
            .filter(|field| self.value(*field).is_none_or(str::is_empty))
            .collect()
    }

    /// Check whether every attribute is present.
    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    /// Convert into a persistable record, or return the missing attributes.
    pub fn into_complete(self) -> Result<BoletoRecord, Vec<RecordField>> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(BoletoRecord {
            document_type: self.document_type,
            installation_code: self.installation_code.unwrap_or_default(),
            user_code: self.user_code.unwrap_or_default(),
            due_date: self.due_date.unwrap_or_default(),
            total_amount: self.total_amount.unwrap_or_default(),
            barcode: self.barcode.unwrap_or_default(),
            issuer_tax_id: self.issuer_tax_id,
        })
    }
}

/// A complete boleto, ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoletoRecord {
    #[serde(rename = "boleto_tipo")]
    pub document_type: DocumentType,

    #[serde(rename = "codigo_instalacao")]
    pub installation_code: String,

    #[serde(rename = "codigo_usuario")]
    pub user_code: String,

    #[serde(rename = "vencimento")]
    pub due_date: String,

    #[serde(rename = "valor_total")]
    pub total_amount: String,

    #[serde(rename = "cod_barras")]
    pub barcode: String,

    #[serde(rename = "cnpj_concessionaria")]
    pub issuer_tax_id: String,
}

/// A stored boleto with its store-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedBoleto {
    pub id: i64,

    #[serde(flatten)]
    pub record: BoletoRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn full_record() -> ExtractedRecord {
        ExtractedRecord {
            installation_code: Some("123456789012".to_string()),
            user_code: Some("12345678".to_string()),
            due_date: Some("15/06/2024".to_string()),
            total_amount: Some("129,90".to_string()),
            barcode: Some("8".repeat(48)),
            ..ExtractedRecord::new(DocumentType::Internet)
        }
    }

    #[test]
    fn test_complete_record() {
        let record = full_record();
        assert!(record.is_complete());

        let complete = record.into_complete().unwrap();
        assert_eq!(complete.total_amount, "129,90");
        assert_eq!(complete.issuer_tax_id, ISSUER_TAX_ID_PLACEHOLDER);
    }

    #[test]
    fn test_missing_fields_in_order() {
        let record = ExtractedRecord {
            total_amount: None,
            user_code: Some(String::new()),
            ..full_record()
        };

        assert_eq!(
            record.missing_fields(),
            vec![RecordField::UserCode, RecordField::TotalAmount]
        );
        assert!(record.into_complete().is_err());
    }

    #[test]
    fn test_serialized_column_names() {
        let complete = full_record().into_complete().unwrap();
        let json = serde_json::to_value(&complete).unwrap();

        assert_eq!(json["boleto_tipo"], "internet");
        assert_eq!(json["codigo_instalacao"], "123456789012");
        assert_eq!(json["cnpj_concessionaria"], "00.00.000/0000-00");

        let missing = serde_json::to_value([RecordField::TotalAmount]).unwrap();
        assert_eq!(missing, serde_json::json!(["valor_total"]));
    }

    #[test]
    fn test_document_type_round_trip_from_str() {
        assert_eq!("internet".parse::<DocumentType>(), Ok(DocumentType::Internet));
        assert!("energia".parse::<DocumentType>().is_err());
    }
}

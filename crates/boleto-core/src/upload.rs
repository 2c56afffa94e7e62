//! Batch handling for uploaded files.
//!
//! Files are processed one after another in the order received. A rejected
//! file never stops the rest of the batch; every file gets an outcome.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::Rejection;
use crate::models::boleto::{BoletoRecord, PersistedBoleto, RecordField};
use crate::pipeline::ExtractionPipeline;

/// Detail returned for a stored boleto.
pub const SAVED_DETAIL: &str = "Boleto processado e salvo com sucesso.";

/// Detail returned for a boleto validated without storing it.
pub const VALIDATED_DETAIL: &str = "Boleto válido, não salvo (simulação).";

/// Error body returned when a request carries no files.
pub const NO_FILES_ERROR: &str = "Não há arquivos para a requisição";

/// A file received for processing.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }
}

/// What happened to an accepted file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Accepted {
    /// Stored with an id.
    Saved(PersistedBoleto),
    /// Passed every check; not stored.
    Validated(BoletoRecord),
}

impl Accepted {
    pub fn record(&self) -> &BoletoRecord {
        match self {
            Accepted::Saved(persisted) => &persisted.record,
            Accepted::Validated(record) => record,
        }
    }

    pub fn id(&self) -> Option<i64> {
        match self {
            Accepted::Saved(persisted) => Some(persisted.id),
            Accepted::Validated(_) => None,
        }
    }
}

/// Outcome of one file in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileOutcome {
    pub file_name: String,
    pub result: Result<Accepted, Rejection>,
}

impl FileOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Informational HTTP status for this file.
    pub fn status_code(&self) -> u16 {
        match &self.result {
            Ok(Accepted::Saved(_)) => 201,
            Ok(Accepted::Validated(_)) => 200,
            Err(rejection) => rejection.status_code(),
        }
    }

    /// JSON payload for this file.
    pub fn to_response(&self) -> FileResponse {
        match &self.result {
            Ok(accepted) => FileResponse {
                detalhes: match accepted {
                    Accepted::Saved(_) => SAVED_DETAIL.to_string(),
                    Accepted::Validated(_) => VALIDATED_DETAIL.to_string(),
                },
                boleto: Some(accepted.record().clone()),
                campos_faltando: None,
            },
            Err(rejection) => FileResponse {
                detalhes: rejection.to_string(),
                boleto: None,
                campos_faltando: rejection.missing_fields().map(<[RecordField]>::to_vec),
            },
        }
    }
}

/// Per-file JSON payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResponse {
    pub detalhes: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boleto: Option<BoletoRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campos_faltando: Option<Vec<RecordField>>,
}

/// Process every file and store the complete ones.
pub async fn process_batch<I>(pipeline: &ExtractionPipeline, files: I) -> Vec<FileOutcome>
where
    I: IntoIterator<Item = UploadedFile>,
{
    let mut outcomes = Vec::new();

    for file in files {
        let result = pipeline
            .process(&file.file_name, &file.data)
            .await
            .map(Accepted::Saved);
        outcomes.push(FileOutcome {
            file_name: file.file_name,
            result,
        });
    }

    log_summary(&outcomes);
    outcomes
}

/// Process every file without storing anything.
pub fn validate_batch<I>(pipeline: &ExtractionPipeline, files: I) -> Vec<FileOutcome>
where
    I: IntoIterator<Item = UploadedFile>,
{
    let outcomes: Vec<_> = files
        .into_iter()
        .map(|file| {
            let result = pipeline
                .prepare(&file.file_name, &file.data)
                .map(Accepted::Validated);
            FileOutcome {
                file_name: file.file_name,
                result,
            }
        })
        .collect();

    log_summary(&outcomes);
    outcomes
}

fn log_summary(outcomes: &[FileOutcome]) {
    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    info!(
        "Batch finished: {} files, {} accepted, {} rejected",
        outcomes.len(),
        succeeded,
        outcomes.len() - succeeded
    );
}

//! Process command - run the extraction pipeline over files on disk.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, warn};

use boleto_core::models::boleto::RecordField;
use boleto_core::store::BoletoStore;
use boleto_core::upload::{self, FileOutcome};
use boleto_core::{
    BoletoConfig, DocumentClassifier, ExtractionPipeline, FileResponse, MemoryStore,
    PdfExtractor, SqliteStore, UploadedFile,
};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Validate only; nothing is written to the database
    #[arg(long)]
    dry_run: bool,

    /// SQLite database URL (overrides config)
    #[arg(long)]
    database_url: Option<String>,

    /// Also write a summary CSV
    #[arg(long)]
    summary: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text summary
    Text,
}

/// One line of command output.
#[derive(Debug, Serialize)]
struct FileReport {
    arquivo: String,
    status: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    #[serde(flatten)]
    response: FileResponse,
}

impl FileReport {
    fn from_outcome(outcome: &FileOutcome) -> Self {
        Self {
            arquivo: outcome.file_name.clone(),
            status: outcome.status_code(),
            id: outcome.result.as_ref().ok().and_then(|a| a.id()),
            response: outcome.to_response(),
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(url) = &args.database_url {
        config.database.url = url.clone();
    }

    let files: Vec<PathBuf> = glob(&args.input)?.filter_map(|r| r.ok()).collect();
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pipeline = build_pipeline(&config, args.dry_run).await?;

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let uploads = pb.wrap_iter(files.iter().map(|path| read_upload(path)));
    let outcomes = if args.dry_run {
        upload::validate_batch(&pipeline, uploads)
    } else {
        upload::process_batch(&pipeline, uploads).await
    };
    pb.finish_and_clear();

    let reports: Vec<FileReport> = outcomes.iter().map(FileReport::from_outcome).collect();
    let output = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&reports)?,
        OutputFormat::Csv => format_csv(&reports)?,
        OutputFormat::Text => format_text(&reports),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.summary {
        let summary_path = args
            .output
            .as_deref()
            .and_then(Path::parent)
            .map(|dir| dir.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &reports)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
    eprintln!(
        "{} Processed {} files in {:?}: {} accepted, {} rejected",
        style("✓").green(),
        outcomes.len(),
        start.elapsed(),
        style(succeeded).green(),
        style(outcomes.len() - succeeded).red()
    );

    Ok(())
}

async fn build_pipeline(config: &BoletoConfig, dry_run: bool) -> anyhow::Result<ExtractionPipeline> {
    let store: Arc<dyn BoletoStore> = if dry_run {
        debug!("Dry run, records are kept in memory only");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(SqliteStore::connect(&config.database).await?)
    };

    Ok(ExtractionPipeline::new(Arc::new(PdfExtractor::new()), store)
        .with_classifier(DocumentClassifier::from_config(&config.extraction)))
}

/// Unreadable files are passed on with no content and rejected as empty.
fn read_upload(path: &Path) -> UploadedFile {
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default()
        .to_string();

    let data = fs::read(path).unwrap_or_else(|e| {
        warn!("Failed to read {}: {}", path.display(), e);
        Vec::new()
    });

    UploadedFile::new(file_name, data)
}

fn record_values(response: &FileResponse) -> Vec<String> {
    let Some(boleto) = &response.boleto else {
        return vec![String::new(); RecordField::ALL.len()];
    };

    vec![
        boleto.document_type.to_string(),
        boleto.installation_code.clone(),
        boleto.user_code.clone(),
        boleto.due_date.clone(),
        boleto.total_amount.clone(),
        boleto.barcode.clone(),
        boleto.issuer_tax_id.clone(),
    ]
}

fn missing_columns(response: &FileResponse) -> String {
    response
        .campos_faltando
        .iter()
        .flatten()
        .map(|f| f.column())
        .collect::<Vec<_>>()
        .join(";")
}

fn format_csv(reports: &[FileReport]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec!["arquivo", "status", "id", "detalhes"];
    header.extend(RecordField::ALL.iter().map(|f| f.column()));
    header.push("campos_faltando");
    wtr.write_record(&header)?;

    for report in reports {
        let mut row = vec![
            report.arquivo.clone(),
            report.status.to_string(),
            report.id.map(|id| id.to_string()).unwrap_or_default(),
            report.response.detalhes.clone(),
        ];
        row.extend(record_values(&report.response));
        row.push(missing_columns(&report.response));
        wtr.write_record(&row)?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(reports: &[FileReport]) -> String {
    let mut output = String::new();

    for report in reports {
        output.push_str(&format!("{} [{}]\n", report.arquivo, report.status));
        output.push_str(&format!("  {}\n", report.response.detalhes));

        if let Some(boleto) = &report.response.boleto {
            if let Some(id) = report.id {
                output.push_str(&format!("  ID:          {}\n", id));
            }
            output.push_str(&format!("  Tipo:        {}\n", boleto.document_type));
            output.push_str(&format!("  Instalacao:  {}\n", boleto.installation_code));
            output.push_str(&format!("  Usuario:     {}\n", boleto.user_code));
            output.push_str(&format!("  Vencimento:  {}\n", boleto.due_date));
            output.push_str(&format!("  Valor:       R$ {}\n", boleto.total_amount));
            output.push_str(&format!("  Cod. barras: {}\n", boleto.barcode));
        }

        let missing = missing_columns(&report.response);
        if !missing.is_empty() {
            output.push_str(&format!("  Faltando:    {}\n", missing));
        }
        output.push('\n');
    }

    output
}

fn write_summary(path: &Path, reports: &[FileReport]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["arquivo", "status", "id", "vencimento", "valor_total", "detalhes"])?;

    for report in reports {
        let boleto = report.response.boleto.as_ref();
        wtr.write_record([
            report.arquivo.as_str(),
            report.status.to_string().as_str(),
            report.id.map(|id| id.to_string()).unwrap_or_default().as_str(),
            boleto.map(|b| b.due_date.as_str()).unwrap_or_default(),
            boleto.map(|b| b.total_amount.as_str()).unwrap_or_default(),
            report.response.detalhes.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

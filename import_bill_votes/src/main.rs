use std::sync::Arc;

use anyhow::{bail, Context};
use bill_votes::config::Settings;
use bill_votes::contracts::BillVotesImporter;
use bill_votes::data::BillId;
use bill_votes::pdf_reader::content_extractor::TracingDiagnostics;
use bill_votes::pdf_reader::PdfReader;
use bill_votes::web_page_reader::WebPageReader;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    shared_kernel::tracing::config_telemetry("import_bill_votes")?;
    let result = start().await;
    shared_kernel::tracing::shutdown_global_tracer_provider();
    result
}

async fn start() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    if settings.import.bills.is_empty() {
        bail!("No bills to import, set import.bills or APP_IMPORT__BILLS");
    }

    let importer = BillVotesImporter::new(
        Arc::new(WebPageReader::new(settings.bill_page.origin.clone())),
        Arc::new(PdfReader::new()),
        Arc::new(TracingDiagnostics),
    );
    let bills = settings
        .import
        .bills
        .iter()
        .map(|bill| BillId::from(bill.as_str()))
        .collect();

    let report = importer
        .import(&settings.import.year, bills, settings.import.batch_size)
        .await?;

    let output_file = &settings.import.output_file;
    let json = serde_json::to_string_pretty(&report).context("Failed to serialize the report")?;
    tokio::fs::write(output_file, json)
        .await
        .with_context(|| format!("Failed to write the report to {}", output_file.display()))?;

    info!(
        "wrote {} bills and {} failures to {}",
        report.bills.len(),
        report.failures.len(),
        output_file.display()
    );
    Ok(())
}

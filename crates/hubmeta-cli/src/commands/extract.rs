//! Extract and import command handlers

use hubmeta::ModelImportService;

use crate::OutputFormat;
use crate::error::CliError;

pub async fn run_extract(
    service: &ModelImportService,
    identifier: &str,
    format: OutputFormat,
    license_hint: Option<&str>,
) -> Result<(), CliError> {
    let record = service.preview(identifier, license_hint).await?;
    println!("{}", format.render(&record)?);
    Ok(())
}

pub async fn run_import(
    service: &ModelImportService,
    identifier: &str,
    license_hint: Option<&str>,
) -> Result<(), CliError> {
    println!("📥 Importing {}...", identifier);

    let stored = service.import_model(identifier, license_hint).await?;
    let record = &stored.record;

    println!("✅ Imported {} as '{}'", record.identifier, record.slug);
    println!("   ID:           {}", stored.id);
    if let Some(parameters) = &record.parameters {
        println!("   Parameters:   {}", parameters);
    }
    if let Some(architecture) = &record.architecture {
        println!("   Architecture: {}", architecture);
    }
    if let Some(license) = &record.license {
        println!("   License:      {}", license);
    }

    Ok(())
}

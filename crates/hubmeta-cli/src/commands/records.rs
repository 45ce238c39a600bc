//! Stored record command handlers

use hubmeta::ModelImportService;

use crate::OutputFormat;
use crate::error::CliError;

fn or_dash(value: Option<&str>) -> &str {
    value.unwrap_or("-")
}

pub async fn run_list(service: &ModelImportService) -> Result<(), CliError> {
    let models = service.list_models().await?;

    if models.is_empty() {
        println!("No models imported yet. Run: hubmeta import <ID>");
        return Ok(());
    }

    println!("📋 {} imported model(s)\n", models.len());
    println!(
        "{:<40} {:<10} {:<32} {}",
        "SLUG", "PARAMS", "ARCHITECTURE", "LICENSE"
    );
    for model in &models {
        let record = &model.record;
        println!(
            "{:<40} {:<10} {:<32} {}",
            record.slug,
            or_dash(record.parameters.as_deref()),
            or_dash(record.architecture.as_deref()),
            or_dash(record.license.as_deref()),
        );
    }

    Ok(())
}

pub async fn run_show(
    service: &ModelImportService,
    slug: &str,
    format: OutputFormat,
) -> Result<(), CliError> {
    let model = service.get_model(slug).await?;
    println!("{}", format.render(&model)?);
    Ok(())
}

pub async fn run_remove(service: &ModelImportService, slug: &str) -> Result<(), CliError> {
    service.remove_model(slug).await?;
    println!("🗑️  Removed '{}'", slug);
    Ok(())
}

use clap::Parser;
use deal_builder::utils::error::{DealError, ErrorSeverity};
use deal_builder::utils::{logger, validation::Validate};
use deal_builder::{
    builtin_catalog, CatalogFile, CliConfig, ExportEngine, LocalStorage, ProposalBuilder,
    ProposalPipeline,
};

fn fail(e: &DealError) -> ! {
    tracing::error!(
        "❌ Export failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting deal-builder CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let catalog = match &config.catalog {
        Some(path) => match CatalogFile::from_file(path) {
            Ok(catalog) => {
                tracing::info!("Loaded catalog from {}", path);
                catalog
            }
            Err(e) => fail(&e),
        },
        None => builtin_catalog(),
    };

    if config.list {
        for category in catalog.categories() {
            println!("{}", category.name);
            if let Some(description) = &category.description {
                println!("  {}", description);
            }
            for offering in &category.offerings {
                println!("  - {}", offering);
            }
            println!();
        }
        return Ok(());
    }

    let mut builder = ProposalBuilder::new(catalog);
    if let Some(institution) = config.institution.as_deref() {
        builder.set_institution_name(institution);
    }
    if let Some(focus_area) = config.focus_area.as_deref() {
        builder.set_focus_area(focus_area);
    }

    match config.parse_selection() {
        Ok(pairs) => {
            for (category, offering) in pairs {
                match builder.toggle(&category, &offering) {
                    Ok(true) => tracing::debug!("Selected '{}' in '{}'", offering, category),
                    Ok(false) => tracing::debug!("Deselected '{}' in '{}'", offering, category),
                    Err(e) => fail(&e),
                }
            }
        }
        Err(e) => fail(&e),
    }

    let storage = LocalStorage::new(config.output_path.clone());
    let pipeline = ProposalPipeline::new(storage, config, builder);
    let engine = ExportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Proposal export completed successfully!");
            tracing::info!("📁 Output saved to: {}", output_path);
            println!("✅ Proposal export completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

//! Review loader CLI binary
//!
//! This is the main entry point for the review-loader command-line interface.
//! The CLI is a thin adapter over existing APIs - NO logic is implemented here.

use log::info;
use review_loader::cli::{CliErrorPayload, CliSuccessPayload, Commands};
use review_loader::config::UploadConfig;
use review_loader::ingest::{self, Export};
use review_loader::report::{RunReport, SourceFile};
use review_loader::upload::{RestClient, Uploader};
use review_loader::LoaderError;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Seed the environment before clap reads it
    dotenvy::dotenv().ok();

    let cli = review_loader::cli::parse_args();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let result = match cli.command {
        Commands::Parse { file } => execute_parse(&file),
        Commands::Upload {
            file,
            api_url,
            api_key,
            business_table,
            review_table,
            link_function,
            report,
            operation_id,
        } => UploadConfig::resolve(
            file,
            api_url,
            api_key,
            review_loader::cli::remote_names(business_table, review_table, link_function),
        )
        .and_then(|config| execute_upload(config, report, operation_id)),
    };

    match result {
        Ok((message, data)) => {
            if cli.json {
                print_json(&CliSuccessPayload::with_data(message, data));
            } else {
                println!("{}", message);
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            if cli.json {
                print_json(&CliErrorPayload::from_error(&e));
            } else {
                eprintln!("Error: {}", e);
                if let Some(hint) = e.hint() {
                    eprintln!("Hint: {}", hint);
                }
            }
            ExitCode::from(1)
        }
    }
}

fn print_json<T: serde::Serialize>(payload: &T) {
    match serde_json::to_string_pretty(payload) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Error: failed to encode output: {}", e),
    }
}

/// Parse an export, escalating the no-records signal to an error.
fn load_export(file: &Path) -> Result<Export, LoaderError> {
    info!("parsing {}", file.display());
    ingest::parse_file(file)?.ok_or_else(|| LoaderError::NoRecords {
        file: file.to_path_buf(),
    })
}

/// Execute the parse command.
///
/// Reports counts and the export's digest without contacting the backend.
fn execute_parse(file: &Path) -> Result<(String, Value), LoaderError> {
    let source = SourceFile::digest(file)?;
    let export = load_export(file)?;

    let message = format!(
        "Parsed {} businesses and {} reviews ({} orphaned)",
        export.businesses.len(),
        export.reviews_parsed,
        export.orphaned_reviews
    );
    let data = json!({
        "source": source,
        "businesses": export.businesses.len(),
        "reviews_parsed": export.reviews_parsed,
        "reviews_attached": export.attached_reviews(),
        "orphaned_reviews": export.orphaned_reviews,
    });

    Ok((message, data))
}

/// Execute the upload command.
///
/// This function is a thin adapter that:
/// 1. Hashes and parses the export
/// 2. Uploads businesses and reviews through the REST backend
/// 3. Writes the run report if one was requested
fn execute_upload(
    config: UploadConfig,
    report_path: Option<PathBuf>,
    operation_id: Option<String>,
) -> Result<(String, Value), LoaderError> {
    let source = SourceFile::digest(&config.file)?;
    let mut report = RunReport::new(operation_id, source);
    info!("run {} started", report.operation_id);

    let mut export = load_export(&config.file)?;
    report.record_export(&export);

    let backend = RestClient::new(&config.api_url, &config.api_key)?;
    let mut uploader = Uploader::new(backend, config.names);
    let summary = uploader.upload(&mut export.businesses)?;
    report.record_upload(&summary);

    if let Some(path) = &report_path {
        report.save(path)?;
        info!("report written to {}", path.display());
    }

    let message = format!(
        "Completed uploading {} businesses and {} reviews",
        summary.businesses.len(),
        summary.reviews
    );
    let data = json!({
        "operation_id": report.operation_id,
        "businesses": summary.businesses,
        "reviews": summary.reviews,
        "links": summary.links,
        "orphaned_reviews": export.orphaned_reviews,
    });

    Ok((message, data))
}

//! Command-line interface for the review loader.
//!
//! This module handles argument parsing and output payloads only.
//! NO parsing or network work is performed here.

use crate::config::{ENV_API_KEY, ENV_API_URL, ENV_FILE_PATH};
use crate::upload::{
    RemoteNames, DEFAULT_BUSINESS_TABLE, DEFAULT_LINK_FUNCTION, DEFAULT_REVIEW_TABLE,
};
use clap::Parser;
use serde::Serialize;
use serde_json::Value;
use std::path::PathBuf;

/// Upload business/review text exports to a REST backend.
#[derive(Parser, Debug)]
#[command(name = "review-loader")]
#[command(author, version, about, long_about = None)]
#[command(subcommand_required = true)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print results as JSON.
    #[arg(long, global = true)]
    pub json: bool,
}

/// Available commands.
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Parse an export and report what it contains, without uploading.
    Parse {
        /// Path to the export file.
        #[arg(short, long, env = ENV_FILE_PATH)]
        file: PathBuf,
    },

    /// Parse an export and upload every business and review.
    Upload {
        /// Path to the export file.
        #[arg(short, long, env = ENV_FILE_PATH)]
        file: Option<PathBuf>,

        /// API base URL.
        #[arg(long, env = ENV_API_URL)]
        api_url: Option<String>,

        /// API access key.
        #[arg(long, env = ENV_API_KEY, hide_env_values = true)]
        api_key: Option<String>,

        /// Table receiving business rows.
        #[arg(long, env = "BUSINESS_TABLE", default_value = DEFAULT_BUSINESS_TABLE)]
        business_table: String,

        /// Table receiving review rows.
        #[arg(long, env = "REVIEW_TABLE", default_value = DEFAULT_REVIEW_TABLE)]
        review_table: String,

        /// Procedure linking a review to its business.
        #[arg(
            long,
            env = "LINK_FUNCTION",
            default_value = DEFAULT_LINK_FUNCTION
        )]
        link_function: String,

        /// Write a JSON run report to this path after a successful upload.
        #[arg(long, value_name = "FILE")]
        report: Option<PathBuf>,

        /// Optional operation ID for the run report (auto-generated UUID if not provided).
        #[arg(long)]
        operation_id: Option<String>,
    },
}

/// Collect the remote names from upload arguments.
pub fn remote_names(business_table: String, review_table: String, link_function: String) -> RemoteNames {
    RemoteNames {
        business_table,
        review_table,
        link_function,
    }
}

/// Parse command-line arguments.
///
/// Returns the parsed Cli struct or exits on error.
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// JSON success payload for CLI responses.
#[derive(Serialize)]
pub struct CliSuccessPayload {
    /// Status indicator ("ok").
    pub status: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional structured data.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl CliSuccessPayload {
    /// Construct a payload with structured data.
    pub fn with_data(message: String, data: Value) -> Self {
        Self {
            status: "ok",
            message,
            data: Some(data),
        }
    }
}

/// JSON error payload for CLI responses.
#[derive(Serialize)]
pub struct CliErrorPayload {
    /// Status indicator ("error").
    pub status: &'static str,
    /// Structured error details.
    pub error: ErrorDetails,
}

/// Details for a CLI error payload.
#[derive(Serialize)]
pub struct ErrorDetails {
    /// Error kind identifier (Config, InvalidNumber, etc.).
    pub kind: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Optional file context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    /// Optional hint for remediation steps.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl CliErrorPayload {
    /// Build payload from a LoaderError instance.
    pub fn from_error(error: &crate::LoaderError) -> Self {
        CliErrorPayload {
            status: "error",
            error: ErrorDetails {
                kind: error.kind(),
                message: error.to_string(),
                file: error
                    .file_path()
                    .map(|path| path.to_string_lossy().to_string()),
                hint: error.hint().map(|h| h.to_string()),
            },
        }
    }
}

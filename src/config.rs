//! Upload configuration.
//!
//! Values come from CLI flags or their environment variables (seeded from a
//! `.env` file by the binary). Missing values are reported before any file or
//! network work starts.

use crate::error::{LoaderError, Result};
use crate::upload::RemoteNames;
use std::path::PathBuf;

/// Environment variable holding the export path.
pub const ENV_FILE_PATH: &str = "FILE_PATH";
/// Environment variable holding the API base URL.
pub const ENV_API_URL: &str = "SUPABASE_URL";
/// Environment variable holding the API access key.
pub const ENV_API_KEY: &str = "SUPABASE_ANON";

/// Fully resolved settings for an upload run.
#[derive(Debug, Clone)]
pub struct UploadConfig {
    /// Export file to parse.
    pub file: PathBuf,
    /// API base URL.
    pub api_url: String,
    /// API access key.
    pub api_key: String,
    /// Remote table and procedure names.
    pub names: RemoteNames,
}

impl UploadConfig {
    /// Build a config, rejecting missing or empty values.
    pub fn resolve(
        file: Option<PathBuf>,
        api_url: Option<String>,
        api_key: Option<String>,
        names: RemoteNames,
    ) -> Result<Self> {
        let api_url = required(api_url, ENV_API_URL)?;
        let api_key = required(api_key, ENV_API_KEY)?;
        let file = file
            .filter(|p| !p.as_os_str().is_empty())
            .ok_or_else(|| missing(ENV_FILE_PATH))?;

        for (value, what) in [
            (&names.business_table, "business table"),
            (&names.review_table, "review table"),
            (&names.link_function, "link function"),
        ] {
            if value.trim().is_empty() {
                return Err(LoaderError::Config {
                    message: format!("{} name is empty", what),
                });
            }
        }

        Ok(Self {
            file,
            api_url,
            api_key,
            names,
        })
    }
}

fn required(value: Option<String>, var: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| missing(var))
}

fn missing(var: &str) -> LoaderError {
    LoaderError::Config {
        message: format!("{} is not set", var),
    }
}

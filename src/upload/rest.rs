//! PostgREST backend over blocking HTTP.
//!
//! Inserts go to `{base}/rest/v1/{table}` and procedure calls to
//! `{base}/rest/v1/rpc/{function}`. Every request carries the access key as
//! both `apikey` and bearer token.

use super::Backend;
use crate::error::{LoaderError, Result};
use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;

const REST_PREFIX: &str = "rest/v1";

/// Blocking REST client for a PostgREST-style API.
pub struct RestClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl RestClient {
    /// Create a client for `base_url` authenticated with `api_key`.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("review-loader/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Base URL with any trailing slash removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Endpoint for inserts into `table`.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/{}/{}", self.base_url, REST_PREFIX, table)
    }

    /// Endpoint for the remote procedure `function`.
    pub fn rpc_url(&self, function: &str) -> String {
        format!("{}/{}/rpc/{}", self.base_url, REST_PREFIX, function)
    }

    fn send(&self, operation: String, request: RequestBuilder) -> Result<Value> {
        let response = request
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        debug!("{} -> {}", operation, status);

        if !status.is_success() {
            return Err(LoaderError::Remote {
                operation,
                status: status.as_u16(),
                body,
            });
        }

        decode_body(&operation, &body)
    }
}

impl Backend for RestClient {
    fn insert(&mut self, table: &str, body: &str) -> Result<Value> {
        let request = self
            .client
            .post(self.table_url(table))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=representation")
            .body(body.to_string());
        self.send(format!("insert {}", table), request)
    }

    fn rpc(&mut self, function: &str, params: &Value) -> Result<Value> {
        let request = self.client.post(self.rpc_url(function)).json(params);
        self.send(format!("rpc {}", function), request)
    }
}

/// Decode a response body. Procedures returning `void` answer with an empty body.
fn decode_body(operation: &str, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Null);
    }

    serde_json::from_str(body).map_err(|e| LoaderError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

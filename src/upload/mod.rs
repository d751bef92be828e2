//! Sequential upload of the business/review tree.
//!
//! Each business is inserted first to obtain its generated identifier; its
//! reviews are then inserted with that identifier and linked back to the
//! business through a remote procedure. The first failure aborts the run and
//! nothing already inserted is rolled back.

pub mod rest;

use crate::error::{LoaderError, Result};
use crate::model::{Business, InsertedBusiness, InsertedReview};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub use rest::RestClient;

/// Remote operations the uploader needs from a backend.
pub trait Backend {
    /// Insert one row into `table`, returning the decoded response body.
    ///
    /// `body` is the row already encoded as JSON text.
    fn insert(&mut self, table: &str, body: &str) -> Result<Value>;

    /// Call the remote procedure `function` with named parameters.
    fn rpc(&mut self, function: &str, params: &Value) -> Result<Value>;
}

/// Remote table and procedure names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteNames {
    /// Table receiving business rows.
    pub business_table: String,
    /// Table receiving review rows.
    pub review_table: String,
    /// Procedure that appends a review id to a business.
    pub link_function: String,
}

/// Default table receiving business rows.
pub const DEFAULT_BUSINESS_TABLE: &str = "train_business";
/// Default table receiving review rows.
pub const DEFAULT_REVIEW_TABLE: &str = "train_review";
/// Default procedure linking a review to its business.
pub const DEFAULT_LINK_FUNCTION: &str = "append_review_to_train_business";

impl Default for RemoteNames {
    fn default() -> Self {
        Self {
            business_table: DEFAULT_BUSINESS_TABLE.to_string(),
            review_table: DEFAULT_REVIEW_TABLE.to_string(),
            link_function: DEFAULT_LINK_FUNCTION.to_string(),
        }
    }
}

/// A business after upload, with the identifiers the backend generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedBusiness {
    /// Generated business identifier.
    pub id: String,
    /// Business name.
    pub name: String,
    /// Generated review identifiers, in file order.
    pub review_ids: Vec<String>,
}

/// Outcome of a completed upload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadSummary {
    /// One entry per business, in upload order.
    pub businesses: Vec<UploadedBusiness>,
    /// Number of review inserts issued.
    pub reviews: usize,
    /// Number of linkage calls issued.
    pub links: usize,
}

/// Drives a [`Backend`] through the upload sequence.
pub struct Uploader<B> {
    backend: B,
    names: RemoteNames,
}

impl<B: Backend> Uploader<B> {
    /// Create an uploader with the given backend and remote names.
    pub fn new(backend: B, names: RemoteNames) -> Self {
        Self { backend, names }
    }

    /// Access the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Consume the uploader, returning the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Upload every business and its reviews, in order.
    ///
    /// Identifiers are written back into `businesses` as they are assigned.
    pub fn upload(&mut self, businesses: &mut [Business]) -> Result<UploadSummary> {
        let mut summary = UploadSummary::default();

        for business in businesses.iter_mut() {
            info!(
                "uploading '{}' ({} ratings, {}) with {} reviews",
                business.name,
                business.num_ratings,
                business.rating,
                business.reviews.len()
            );
            let uploaded = self.upload_business(business)?;
            summary.reviews += uploaded.review_ids.len();
            summary.links += uploaded.review_ids.len();
            summary.businesses.push(uploaded);
        }

        Ok(summary)
    }

    fn upload_business(&mut self, business: &mut Business) -> Result<UploadedBusiness> {
        let operation = format!("insert {}", self.names.business_table);
        let body = encode_row(&operation, &business.row(), business.rating)?;
        let response = self.backend.insert(&self.names.business_table, &body)?;
        let inserted: InsertedBusiness = first_record(&operation, response)?;
        debug!("business '{}' -> {}", business.name, inserted.id);
        business.id = Some(inserted.id.clone());

        let mut review_ids = Vec::with_capacity(business.reviews.len());
        for review in business.reviews.iter_mut() {
            review.business_id = Some(inserted.id.clone());

            let operation = format!("insert {}", self.names.review_table);
            let body = encode_row(&operation, &review.row(), review.rating)?;
            let response = self.backend.insert(&self.names.review_table, &body)?;
            let created: InsertedReview = first_record(&operation, response)?;
            debug!(
                "review by '{}' -> {} (parent {})",
                review.username,
                created.id,
                created.busi_id.as_deref().unwrap_or("?")
            );

            let params = json!({
                "business_id": inserted.id,
                "review_id": created.id,
            });
            let result = self.backend.rpc(&self.names.link_function, &params)?;
            debug!("link {} <- {}: {}", inserted.id, created.id, result);

            review_ids.push(created.id);
        }

        Ok(UploadedBusiness {
            id: inserted.id,
            name: business.name.clone(),
            review_ids,
        })
    }
}

/// Encode a row as JSON text. Non-finite ratings have no JSON form.
fn encode_row<T: Serialize>(operation: &str, row: &T, rating: f32) -> Result<String> {
    if !rating.is_finite() {
        return Err(LoaderError::Encode {
            operation: operation.to_string(),
            message: format!("rating {} is not a finite number", rating),
        });
    }

    serde_json::to_string(row).map_err(|e| LoaderError::Encode {
        operation: operation.to_string(),
        message: e.to_string(),
    })
}

/// Decode an insert response and take its first record.
fn first_record<T: DeserializeOwned>(operation: &str, response: Value) -> Result<T> {
    let records: Vec<T> = serde_json::from_value(response).map_err(|e| LoaderError::Decode {
        operation: operation.to_string(),
        message: e.to_string(),
    })?;

    records
        .into_iter()
        .next()
        .ok_or_else(|| LoaderError::EmptyResponse {
            operation: operation.to_string(),
        })
}

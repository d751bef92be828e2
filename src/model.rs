//! Business and review records.
//!
//! The in-memory tree built by the parser, and the row shapes sent to and
//! received from the backend.

use serde::{Deserialize, Serialize};

/// A business and the reviews that followed it in the export.
#[derive(Debug, Clone, PartialEq)]
pub struct Business {
    /// Business name.
    pub name: String,
    /// Aggregate rating.
    pub rating: f32,
    /// Number of ratings behind `rating`.
    pub num_ratings: i64,
    /// Owned reviews, in file order.
    pub reviews: Vec<Review>,
    /// Server-assigned identifier, set after a successful insert.
    pub id: Option<String>,
}

impl Business {
    /// Create a business with no reviews and no identifier.
    pub fn new(name: impl Into<String>, rating: f32, num_ratings: i64) -> Self {
        Self {
            name: name.into(),
            rating,
            num_ratings,
            reviews: Vec::new(),
            id: None,
        }
    }

    /// Row payload for the business insert. Reviews are never included.
    pub fn row(&self) -> BusinessRow<'_> {
        BusinessRow {
            name: &self.name,
            rating: self.rating,
            num_ratings: self.num_ratings,
        }
    }
}

/// A single customer review.
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Reviewer's username.
    pub username: String,
    /// Rating given by the reviewer.
    pub rating: f32,
    /// Review body.
    pub text: String,
    /// Parent business identifier, set at upload time.
    pub business_id: Option<String>,
}

impl Review {
    /// Create a review with no parent identifier.
    pub fn new(username: impl Into<String>, rating: f32, text: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            rating,
            text: text.into(),
            business_id: None,
        }
    }

    /// Row payload for the review insert.
    pub fn row(&self) -> ReviewRow<'_> {
        ReviewRow {
            username: &self.username,
            rating: self.rating,
            text: &self.text,
            busi_id: self.business_id.as_deref(),
        }
    }
}

/// Insert payload for the business table.
#[derive(Debug, Serialize)]
pub struct BusinessRow<'a> {
    /// Business name.
    pub name: &'a str,
    /// Aggregate rating.
    pub rating: f32,
    /// Number of ratings.
    pub num_ratings: i64,
}

/// Insert payload for the review table.
#[derive(Debug, Serialize)]
pub struct ReviewRow<'a> {
    /// Reviewer's username.
    pub username: &'a str,
    /// Review rating.
    pub rating: f32,
    /// Review body.
    pub text: &'a str,
    /// Parent business identifier.
    pub busi_id: Option<&'a str>,
}

/// Business record as echoed back by an insert.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertedBusiness {
    /// Generated identifier.
    pub id: String,
}

/// Review record as echoed back by an insert.
#[derive(Debug, Clone, Deserialize)]
pub struct InsertedReview {
    /// Generated identifier.
    pub id: String,
    /// Echoed parent business identifier.
    #[serde(default)]
    pub busi_id: Option<String>,
}

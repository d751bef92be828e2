//! Single-line record classification.
//!
//! Field layout of the export:
//!
//! ```text
//! business: id - name - rating - num_ratings - review_ids - image_ids
//! review:   id - busi_id - username - rating - user_profile_id - text
//! ```
//!
//! A line is a business if its first field is an integer, otherwise a review.

use crate::error::{LoaderError, Result};
use crate::model::{Business, Review};
use std::str::FromStr;

/// Field separator between columns.
pub const DELIMITER: &str = " - ";

/// A parsed line of the export.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    /// A business line.
    Business(Business),
    /// A review line.
    Review(Review),
}

/// Split a line into trimmed fields.
pub fn split_fields(line: &str) -> Vec<&str> {
    line.trim().split(DELIMITER).map(str::trim).collect()
}

/// Whether the fields describe a business record.
pub fn is_business(fields: &[&str]) -> bool {
    fields
        .first()
        .map(|id| id.parse::<i64>().is_ok())
        .unwrap_or(false)
}

/// Classify and parse one line. `line_no` is 1-based and only used in errors.
pub fn parse_line(line_no: usize, line: &str) -> Result<Record> {
    let fields = split_fields(line);
    if is_business(&fields) {
        parse_business(line_no, &fields).map(Record::Business)
    } else {
        parse_review(line_no, &fields).map(Record::Review)
    }
}

fn parse_business(line_no: usize, fields: &[&str]) -> Result<Business> {
    let name = field(line_no, fields, 1)?;
    let rating = number(line_no, "rating", field(line_no, fields, 2)?)?;
    let num_ratings = number(line_no, "num_ratings", field(line_no, fields, 3)?)?;

    Ok(Business::new(name, rating, num_ratings))
}

fn parse_review(line_no: usize, fields: &[&str]) -> Result<Review> {
    // [0] and [1] link back to the business in the source system; ownership
    // comes from file order instead.
    let username = field(line_no, fields, 2)?;
    let rating = number(line_no, "rating", field(line_no, fields, 3)?)?;
    let text = field(line_no, fields, 5)?;

    Ok(Review::new(username, rating, text))
}

fn field<'a>(line_no: usize, fields: &[&'a str], index: usize) -> Result<&'a str> {
    fields
        .get(index)
        .copied()
        .ok_or(LoaderError::MissingField {
            line: line_no,
            index,
            found: fields.len(),
        })
}

fn number<T>(line_no: usize, name: &'static str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value.parse::<T>().map_err(|e| LoaderError::InvalidNumber {
        line: line_no,
        field: name,
        value: value.to_string(),
        message: e.to_string(),
    })
}

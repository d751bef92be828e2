//! Export file → business/review tree.
//!
//! The export has a two-line header followed by records. Each business line
//! is followed by the review lines that belong to it; there are no explicit
//! nesting markers, so ownership is positional.

pub mod line;

use crate::error::{LoaderError, Result};
use crate::model::Business;
use line::{parse_line, Record};
use log::{debug, warn};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Number of leading lines skipped unconditionally.
pub const HEADER_LINES: usize = 2;

/// Result of parsing an export.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Export {
    /// Businesses in file order, each owning its reviews.
    pub businesses: Vec<Business>,
    /// Every review line seen, orphans included.
    pub reviews_parsed: usize,
    /// Review lines that appeared before any business line.
    pub orphaned_reviews: usize,
}

impl Export {
    /// Number of reviews attached to a business.
    pub fn attached_reviews(&self) -> usize {
        self.businesses.iter().map(|b| b.reviews.len()).sum()
    }

    fn push(mut self, line_no: usize, record: Record) -> Self {
        match record {
            Record::Business(business) => {
                debug!("line {}: business '{}'", line_no, business.name);
                self.businesses.push(business);
            }
            Record::Review(review) => {
                self.reviews_parsed += 1;
                match self.businesses.last_mut() {
                    Some(owner) => owner.reviews.push(review),
                    None => {
                        warn!(
                            "line {}: review by '{}' precedes any business, skipping",
                            line_no, review.username
                        );
                        self.orphaned_reviews += 1;
                    }
                }
            }
        }
        self
    }
}

/// Parse an export file.
///
/// Returns `Ok(None)` when the file has nothing past the header.
pub fn parse_file(path: &Path) -> Result<Option<Export>> {
    let file = File::open(path).map_err(|e| LoaderError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse_reader(BufReader::new(file)).map_err(|err| match err {
        LoaderError::Io { source, .. } => LoaderError::Io {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })
}

/// Parse an export from any buffered reader.
pub fn parse_reader<R: BufRead>(reader: R) -> Result<Option<Export>> {
    let mut lines = reader.lines().enumerate().peekable();

    for _ in 0..HEADER_LINES {
        match lines.next() {
            Some((_, header)) => {
                header?;
            }
            None => return Ok(None),
        }
    }

    if lines.peek().is_none() {
        return Ok(None);
    }

    let export = lines.try_fold(Export::default(), |export, (idx, line)| {
        let line_no = idx + 1;
        let record = parse_line(line_no, &line?)?;
        Ok::<_, LoaderError>(export.push(line_no, record))
    })?;

    debug!(
        "parsed {} businesses and {} reviews ({} orphaned)",
        export.businesses.len(),
        export.reviews_parsed,
        export.orphaned_reviews
    );

    Ok(Some(export))
}

/// Parse an export held in memory.
pub fn parse_str(text: &str) -> Result<Option<Export>> {
    parse_reader(text.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Yelp export\nbusinesses and reviews\n";

    #[test]
    fn test_reviews_follow_their_business() {
        let text = format!(
            "{}1 - Joe's Cafe - 4.5 - 120 - - \n\
             r1 - 1 - amy - 5 - u1 - first\n\
             r2 - 1 - bob - 3.5 - u2 - second\n\
             2 - Taqueria - 4.0 - 30 - - \n\
             r3 - 2 - cat - 4 - u3 - third\n",
            HEADER
        );

        let export = parse_str(&text).unwrap().unwrap();
        assert_eq!(export.businesses.len(), 2);
        assert_eq!(export.reviews_parsed, 3);
        assert_eq!(export.orphaned_reviews, 0);

        let joes = &export.businesses[0];
        let names: Vec<_> = joes.reviews.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["amy", "bob"]);
        assert_eq!(export.businesses[1].reviews[0].text, "third");
    }

    #[test]
    fn test_orphan_reviews_are_counted() {
        let text = format!(
            "{}r0 - 9 - early - 2 - u0 - too soon\n\
             1 - Joe's Cafe - 4.5 - 120\n\
             r1 - 1 - amy - 5 - u1 - first\n",
            HEADER
        );

        let export = parse_str(&text).unwrap().unwrap();
        assert_eq!(export.businesses.len(), 1);
        assert_eq!(export.reviews_parsed, 2);
        assert_eq!(export.orphaned_reviews, 1);
        assert_eq!(export.attached_reviews(), 1);
    }

    #[test]
    fn test_header_lines_are_never_parsed() {
        // Header lines would fail to parse as records.
        let text = "1 - X - abc - 10\nnot a record\n1 - Ok - 1.0 - 1\n";
        let export = parse_str(text).unwrap().unwrap();
        assert_eq!(export.businesses.len(), 1);
        assert_eq!(export.businesses[0].name, "Ok");
    }

    #[test]
    fn test_header_only_is_absent() {
        assert!(parse_str(HEADER).unwrap().is_none());
        assert!(parse_str("only one line\n").unwrap().is_none());
        assert!(parse_str("").unwrap().is_none());
    }

    #[test]
    fn test_bad_number_aborts_with_line_number() {
        let text = format!("{}1 - Fine - 4.0 - 2\n2 - X - abc - 10\n", HEADER);
        let err = parse_str(&text).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidNumber { line: 4, .. }));
    }
}

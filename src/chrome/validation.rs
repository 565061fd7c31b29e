//! URL input validation
//!
//! Mirrors the checks the check form runs while the user types.

use serde::Serialize;
use url::Url;

use super::error::{ChromeError, ChromeResult};

/// Number of lines in the URL textarea. An empty field counts as one line.
pub fn count_url_lines(text: &str) -> usize {
    text.split('\n').count()
}

/// Reject batches above `max` lines
pub fn validate_url_batch(text: &str, max: usize) -> ChromeResult<usize> {
    let count = count_url_lines(text);
    if count > max {
        return Err(ChromeError::TooManyUrls { count, max });
    }
    Ok(count)
}

/// Custom validity string for the textarea; empty means valid
pub fn custom_validity(text: &str, max: usize) -> String {
    match validate_url_batch(text, max) {
        Ok(_) => String::new(),
        Err(e) => e.to_string(),
    }
}

/// Whether `candidate` parses as an absolute URL
pub fn is_valid_url(candidate: &str) -> bool {
    Url::parse(candidate).is_ok()
}

/// One non-blank line of a URL batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlLine {
    pub line: usize,
    pub url: String,
    pub valid: bool,
}

/// Split a batch into trimmed, non-blank lines tagged with validity
pub fn parse_url_batch(text: &str) -> Vec<UrlLine> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let url = raw.trim();
            if url.is_empty() {
                return None;
            }
            Some(UrlLine {
                line: i + 1,
                url: url.to_string(),
                valid: is_valid_url(url),
            })
        })
        .collect()
}

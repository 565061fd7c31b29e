//! Form controls, alerts and date display.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone, Utc};

use super::error::{ChromeError, ChromeResult};

/// Submit button label while a check is running
pub const SUBMIT_LOADING_LABEL: &str = "Checking...";

/// Label of the CSV upload control before anything is chosen
pub const FILE_LABEL_EMPTY: &str = "Choose CSV file";

/// Only forms posting to a check endpoint get the loading spinner.
///
/// Takes the `action` attribute as written, not the resolved URL, so a form
/// without one never matches on the page's own address.
pub fn is_check_form(action_attribute: Option<&str>) -> bool {
    action_attribute.is_some_and(|action| action.contains("check"))
}

/// Upload label for the selected file names
pub fn file_label_text(files: &[String]) -> String {
    match files {
        [] => FILE_LABEL_EMPTY.to_string(),
        [single] => single.clone(),
        many => format!("{} files selected", many.len()),
    }
}

/// Format a timestamp for display as "MM/DD/YYYY h:mm:ss AM".
///
/// Accepts RFC 3339 or a naive `YYYY-MM-DD HH:MM:SS` (read as UTC).
pub fn format_date(date: &str) -> ChromeResult<String> {
    let parsed = parse_date(date)?;
    Ok(parsed
        .with_timezone(&Local)
        .format("%m/%d/%Y %-I:%M:%S %p")
        .to_string())
}

fn parse_date(date: &str) -> ChromeResult<DateTime<Utc>> {
    let trimmed = date.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| Utc.from_utc_datetime(&naive))
        .ok_or_else(|| ChromeError::InvalidDate(date.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_form_detection() {
        assert!(is_check_form(Some("/check")));
        assert!(!is_check_form(Some("/upload")));
        assert!(!is_check_form(Some("")));
        // No attribute: the form posts to the page itself
        assert!(!is_check_form(None));
    }

    #[test]
    fn test_file_label() {
        assert_eq!(file_label_text(&[]), FILE_LABEL_EMPTY);
        assert_eq!(file_label_text(&["urls.csv".to_string()]), "urls.csv");
        assert_eq!(
            file_label_text(&["a.csv".to_string(), "b.csv".to_string()]),
            "2 files selected"
        );
    }

    #[test]
    fn test_format_date() {
        let formatted = format_date("2024-03-05T14:07:09Z").unwrap();
        // Local timezone varies, the shape does not
        assert_eq!(formatted.matches('/').count(), 2);
        assert!(formatted.ends_with("AM") || formatted.ends_with("PM"));

        assert!(format_date("2024-03-05 14:07:09.123456").is_ok());
        assert_eq!(
            format_date("yesterday"),
            Err(ChromeError::InvalidDate("yesterday".to_string()))
        );
    }
}

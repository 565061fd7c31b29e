//! Page Chrome
//!
//! Small behaviors shared by every page: URL batch validation, the check
//! form's loading state, upload labels and date display.

pub mod controls;
pub mod error;
pub mod validation;

pub use controls::{
    file_label_text, format_date, is_check_form, FILE_LABEL_EMPTY, SUBMIT_LOADING_LABEL,
};
pub use error::{ChromeError, ChromeResult};
pub use validation::{
    count_url_lines, custom_validity, is_valid_url, parse_url_batch, validate_url_batch, UrlLine,
};

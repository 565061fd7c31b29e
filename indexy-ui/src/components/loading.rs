//! Loading indicators.

use indexy::chrome::SUBMIT_LOADING_LABEL;

/// Markup swapped into the check form's submit button while it posts
pub fn submit_loading_html() -> String {
    format!(
        r#"<span class="spinner-border spinner-border-sm" role="status" aria-hidden="true"></span> {}"#,
        SUBMIT_LOADING_LABEL
    )
}

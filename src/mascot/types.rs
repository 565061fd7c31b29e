//! Core mascot data types
//!
//! Display states, message categories, queued messages and the page
//! classification that drives the initial greeting.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::error::MascotError;

/// The mascot's current mood, driving styling and the default message pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayState {
    #[default]
    Default,
    Thinking,
    Working,
    Happy,
}

impl DisplayState {
    pub const ALL: [DisplayState; 4] = [
        DisplayState::Default,
        DisplayState::Thinking,
        DisplayState::Working,
        DisplayState::Happy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DisplayState::Default => "default",
            DisplayState::Thinking => "thinking",
            DisplayState::Working => "working",
            DisplayState::Happy => "happy",
        }
    }

    /// CSS class applied to the spider element while this state is active
    pub fn css_class(&self) -> String {
        format!("mascot-state-{}", self.as_str())
    }
}

impl fmt::Display for DisplayState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayState {
    type Err = MascotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(DisplayState::Default),
            "thinking" => Ok(DisplayState::Thinking),
            "working" => Ok(DisplayState::Working),
            "happy" => Ok(DisplayState::Happy),
            other => Err(MascotError::InvalidState(other.to_string())),
        }
    }
}

/// A named pool of canned messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageCategory {
    Default,
    Thinking,
    Working,
    Happy,
    Tips,
}

impl MessageCategory {
    pub const ALL: [MessageCategory; 5] = [
        MessageCategory::Default,
        MessageCategory::Thinking,
        MessageCategory::Working,
        MessageCategory::Happy,
        MessageCategory::Tips,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MessageCategory::Default => "default",
            MessageCategory::Thinking => "thinking",
            MessageCategory::Working => "working",
            MessageCategory::Happy => "happy",
            MessageCategory::Tips => "tips",
        }
    }

    /// Each display state owns the pool of the same name
    pub fn for_state(state: DisplayState) -> Self {
        match state {
            DisplayState::Default => MessageCategory::Default,
            DisplayState::Thinking => MessageCategory::Thinking,
            DisplayState::Working => MessageCategory::Working,
            DisplayState::Happy => MessageCategory::Happy,
        }
    }

    /// Category selection policy for a random message.
    ///
    /// `draw` is uniform in [0, 1). Above 0.7 a tip is picked; above 0.5 a
    /// non-default state falls back to the default pool; otherwise the
    /// state's own pool is used.
    pub fn resolve(draw: f64, state: DisplayState) -> Self {
        if draw > 0.7 {
            MessageCategory::Tips
        } else if draw > 0.5 && state != DisplayState::Default {
            MessageCategory::Default
        } else {
            MessageCategory::for_state(state)
        }
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageCategory {
    type Err = MascotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(MessageCategory::Default),
            "thinking" => Ok(MessageCategory::Thinking),
            "working" => Ok(MessageCategory::Working),
            "happy" => Ok(MessageCategory::Happy),
            "tips" => Ok(MessageCategory::Tips),
            other => Err(MascotError::InvalidCategory(other.to_string())),
        }
    }
}

/// A display request waiting for the current message to finish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingMessage {
    pub text: String,
    pub duration_ms: u64,
}

impl PendingMessage {
    pub fn new(text: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            text: text.into(),
            duration_ms,
        }
    }
}

/// Which page the mascot is living on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageContext {
    Home,
    Results,
    Processing,
    Reports,
    Other,
}

impl PageContext {
    /// Classify a location pathname.
    ///
    /// The home page must match exactly (every path starts with `/`),
    /// the others match by prefix.
    pub fn classify(pathname: &str) -> Self {
        if pathname == "/" || pathname == "/index" {
            PageContext::Home
        } else if pathname.starts_with("/results") {
            PageContext::Results
        } else if pathname.starts_with("/processing") {
            PageContext::Processing
        } else if pathname.starts_with("/reports") {
            PageContext::Reports
        } else {
            PageContext::Other
        }
    }

    /// Initial state and greeting for the page, `None` for unknown pages
    pub fn greeting(&self) -> Option<(DisplayState, &'static str)> {
        match self {
            PageContext::Home => Some((
                DisplayState::Default,
                "Welcome! Enter URLs to check or upload a CSV file.",
            )),
            PageContext::Results => Some((
                DisplayState::Happy,
                "Here are your results! Indexed URLs are shown in green.",
            )),
            PageContext::Processing => Some((
                DisplayState::Working,
                "I'm checking your URLs now. This might take a moment for large batches.",
            )),
            PageContext::Reports => Some((
                DisplayState::Happy,
                "Your reports are organized here. You can export them as CSV.",
            )),
            PageContext::Other => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PageContext::Home => "home",
            PageContext::Results => "results",
            PageContext::Processing => "processing",
            PageContext::Reports => "reports",
            PageContext::Other => "other",
        }
    }
}

impl fmt::Display for PageContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Tone band for the processing page's progress messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBand {
    /// [0, 30)
    Starting,
    /// [30, 70)
    InProgress,
    /// [70, 100)
    AlmostDone,
    /// 100
    Complete,
}

impl ProgressBand {
    pub fn from_progress(progress: u8) -> Self {
        match progress {
            0..=29 => ProgressBand::Starting,
            30..=69 => ProgressBand::InProgress,
            70..=99 => ProgressBand::AlmostDone,
            _ => ProgressBand::Complete,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            ProgressBand::Starting => "Starting to crawl through your URLs...",
            ProgressBand::InProgress => "Making good progress! Keep waiting...",
            ProgressBand::AlmostDone => "Almost done with your batch!",
            ProgressBand::Complete => "All done! Your results will be displayed shortly.",
        }
    }
}

/// Parse a progress bar's CSS width ("45%", "45.5%", "") into 0..=100.
///
/// Takes the leading integer like the browser's `parseInt`. An empty width
/// reads as 0, negative widths clamp to 0 and anything without leading
/// digits is `None`.
pub fn parse_progress_width(width: &str) -> Option<u8> {
    let trimmed = width.trim();
    if trimmed.is_empty() {
        return Some(0);
    }

    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: String = unsigned.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    if negative {
        return Some(0);
    }

    // Saturate absurd widths rather than overflow
    let value = digits.parse::<u64>().unwrap_or(u64::MAX);
    Some(value.min(100) as u8)
}

/// DOM events the home-page form helpers react to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    /// Focus on the URL textarea
    UrlFocus,
    /// Input on the URL textarea, carrying its current value
    UrlInput(String),
    /// The form was submitted
    Submit,
    /// The file input changed, carrying the number of selected files
    FilesSelected(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_state_parse() {
        for state in DisplayState::ALL {
            assert_eq!(state.as_str().parse::<DisplayState>().unwrap(), state);
        }
        assert_eq!(
            "bogus".parse::<DisplayState>(),
            Err(MascotError::InvalidState("bogus".to_string()))
        );
    }

    #[test]
    fn test_css_class() {
        assert_eq!(DisplayState::Working.css_class(), "mascot-state-working");
    }

    #[test]
    fn test_resolve_thresholds() {
        assert_eq!(
            MessageCategory::resolve(0.71, DisplayState::Default),
            MessageCategory::Tips
        );
        assert_eq!(
            MessageCategory::resolve(0.7, DisplayState::Happy),
            MessageCategory::Default
        );
        assert_eq!(
            MessageCategory::resolve(0.6, DisplayState::Default),
            MessageCategory::Default
        );
        assert_eq!(
            MessageCategory::resolve(0.5, DisplayState::Working),
            MessageCategory::Working
        );
        assert_eq!(
            MessageCategory::resolve(0.0, DisplayState::Thinking),
            MessageCategory::Thinking
        );
    }

    #[test]
    fn test_classify_paths() {
        assert_eq!(PageContext::classify("/"), PageContext::Home);
        assert_eq!(PageContext::classify("/index"), PageContext::Home);
        assert_eq!(PageContext::classify("/results"), PageContext::Results);
        assert_eq!(PageContext::classify("/processing"), PageContext::Processing);
        assert_eq!(PageContext::classify("/reports/12"), PageContext::Reports);
        assert_eq!(PageContext::classify("/health"), PageContext::Other);
        assert_eq!(PageContext::classify("/index.html"), PageContext::Other);
        assert!(PageContext::Other.greeting().is_none());
    }

    #[test]
    fn test_progress_bands() {
        assert_eq!(ProgressBand::from_progress(0), ProgressBand::Starting);
        assert_eq!(ProgressBand::from_progress(29), ProgressBand::Starting);
        assert_eq!(ProgressBand::from_progress(30), ProgressBand::InProgress);
        assert_eq!(ProgressBand::from_progress(69), ProgressBand::InProgress);
        assert_eq!(ProgressBand::from_progress(70), ProgressBand::AlmostDone);
        assert_eq!(ProgressBand::from_progress(99), ProgressBand::AlmostDone);
        assert_eq!(ProgressBand::from_progress(100), ProgressBand::Complete);
    }

    #[test]
    fn test_parse_progress_width() {
        assert_eq!(parse_progress_width("45%"), Some(45));
        assert_eq!(parse_progress_width("99.9%"), Some(99));
        assert_eq!(parse_progress_width(""), Some(0));
        assert_eq!(parse_progress_width("250%"), Some(100));
        assert_eq!(parse_progress_width("auto"), None);
        assert_eq!(parse_progress_width("-5%"), Some(0));
        assert_eq!(parse_progress_width("-"), None);
        assert_eq!(
            parse_progress_width("-5%").map(ProgressBand::from_progress),
            Some(ProgressBand::Starting)
        );
    }
}

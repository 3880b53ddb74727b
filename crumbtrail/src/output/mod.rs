//! Output formatting for rendered trails.

mod formatters;

use std::fmt;
use std::str::FromStr;

use crate::trail::RenderedTrail;
use crate::Result;

pub use formatters::{JsonFormatter, TextFormatter};

/// Formats a rendered trail for display.
pub trait TrailFormatter {
    /// Format the trail into a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn format(&self, trail: &RenderedTrail) -> Result<String>;
}

/// Available output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One line, `Home > Collection > Page`.
    #[default]
    Text,
    /// The rendered trail as pretty JSON.
    Json,
}

impl OutputFormat {
    /// Create a formatter for this output format.
    ///
    /// `verbose` makes the text format show each link's route.
    ///
    /// # Examples
    ///
    /// ```
    /// use crumbtrail::output::OutputFormat;
    /// use crumbtrail::LinkTrail;
    ///
    /// let formatter = OutputFormat::Text.create_formatter(false);
    /// let out = formatter.format(&LinkTrail::new().render()).unwrap();
    /// assert_eq!(out, "(no breadcrumb)");
    /// ```
    #[must_use]
    pub fn create_formatter(self, verbose: bool) -> Box<dyn TrailFormatter> {
        match self {
            Self::Text => Box::new(TextFormatter::new(verbose)),
            Self::Json => Box::new(JsonFormatter),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => write!(f, "text"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err(format!("invalid output format: {s}")),
        }
    }
}

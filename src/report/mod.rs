//! Formatting of rewrite outcomes for terminal and file output.

pub mod csv_output;
pub mod pretty;

pub use csv_output::CsvFormatter;
pub use pretty::PrettyFormatter;

use serde::Serialize;
use tabled::Tabled;

/// The result of one rewrite run, ready for display.
#[derive(Clone, Debug, Serialize, Tabled)]
pub struct Outcome {
    #[tabled(rename = "Original")]
    pub original: String,
    #[tabled(rename = "Rewritten")]
    pub rewritten: String,
    #[tabled(rename = "Matches")]
    pub matches: usize,
    #[tabled(rename = "Changed")]
    pub changed: bool,
}

/// A generic trait for formatting rewrite outcomes.
pub trait Formattable: Tabled {
    /// Convert the outcome to a row of strings for CSV output
    fn to_csv_row(&self) -> Vec<String>;

    /// Get CSV headers for this type
    fn csv_headers() -> Vec<&'static str>;
}

impl Formattable for Outcome {
    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.original.clone(),
            self.rewritten.clone(),
            self.matches.to_string(),
            self.changed.to_string(),
        ]
    }

    fn csv_headers() -> Vec<&'static str> {
        vec!["Original", "Rewritten", "Matches", "Changed"]
    }
}

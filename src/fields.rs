//! Enumerations shared by the library and the command line.
//!
//! This module defines the small closed sets of choices used when producing output:
//! how the metadata record is encoded and which of the generated values are printed.

use clap::ValueEnum;

/// Encoding style for the metadata record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MetaFormat {
    /// Single line JSON.
    #[default]
    Compact,
    /// Indented JSON.
    Pretty,
}

/// Which generated value to print.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputPart {
    /// The Markdown report.
    #[default]
    Report,
    /// The metadata record.
    Meta,
    /// The original issue key.
    Key,
    /// Everything, wrapped in one JSON object.
    All,
}

/// Format an output part for display.
pub fn format_part(p: OutputPart) -> &'static str {
    match p {
        OutputPart::Report => "report",
        OutputPart::Meta => "meta",
        OutputPart::Key => "key",
        OutputPart::All => "all",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_part_names_match_cli_values() {
        for part in OutputPart::value_variants() {
            let value = part.to_possible_value().unwrap();
            assert_eq!(value.get_name(), format_part(*part));
        }
    }
}

//! Command-line options.

use std::path::PathBuf;

use shape_match::{MatchError, MatchResult};

/// What to load and how to filter it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOptions {
    /// JSON document to load; the built-in cars when absent.
    pub input: Option<PathBuf>,
    /// Required `Make`.
    pub make: Option<String>,
    /// Required `Year`, checked by a nested match in the clause guard.
    pub year: Option<u32>,
    /// Keep items whose `Make` does NOT match.
    pub negate: bool,
    pub help: bool,
}

impl FilterOptions {
    /// Reject combinations with no useful meaning.
    ///
    /// Without a `Make` the pattern is `{ field: {} }`, which every item
    /// matches, so `--not` alone would drop everything.
    pub fn validate(&self) -> MatchResult<()> {
        if self.negate && self.make.is_none() {
            return Err(MatchError::new("--not requires --make"));
        }
        Ok(())
    }
}

/// Parse filter options from command-line arguments.
///
/// Unknown flags and malformed values are reported on stderr and ignored.
pub fn parse_filter_options(args: &[String]) -> FilterOptions {
    let mut options = FilterOptions::default();

    for arg in args {
        if let Some(make) = arg.strip_prefix("--make=") {
            options.make = Some(make.to_string());
        } else if let Some(year) = arg.strip_prefix("--year=") {
            match year.parse::<u32>() {
                Ok(year) => options.year = Some(year),
                Err(_) => eprintln!("warning: invalid year '{year}', ignoring"),
            }
        } else if arg == "--not" {
            options.negate = true;
        } else if arg == "--help" || arg == "-h" {
            options.help = true;
        } else if !arg.starts_with('-') && options.input.is_none() {
            options.input = Some(PathBuf::from(arg));
        } else {
            eprintln!("warning: unknown argument '{arg}'");
        }
    }

    options
}

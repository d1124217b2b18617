//! Shape Match - structural matching and ordered-clause evaluation.
//!
//! This crate provides:
//! - `matches`: the structural predicate deciding whether a `Value`
//!   conforms to a `Pattern`
//! - `Match<R>`: an immutable builder of ordered clauses bound to one
//!   subject value, evaluated first-winner-wins with a fallback
//! - `Matcher`: the seam through which evaluation tests patterns, so callers
//!   can observe or wrap the structural decision
//!
//! # Example
//!
//! ```
//! use shape_match::{match_on, Pattern, Value};
//!
//! let car = Value::object([("Make", Value::from("BMW")), ("Year", Value::from(2007))]);
//! let label = match_on::<&str>(car)
//!     .with(Pattern::fields([("Make", "Honda")]), |_| Ok("honda"))
//!     .with(Pattern::fields([("Make", "BMW")]), |_| Ok("bmw"))
//!     .run();
//! assert_eq!(label, Ok("bmw"));
//! ```

mod builder;
mod matcher;

use std::sync::Once;

pub use builder::{match_on, Clause, ClauseList, Fallback, Guard, Handler, Match, Mode};
pub use matcher::{matches, matches_in, Matcher, Structural};
pub use shape_value::{
    FieldSource, Kind, Literal, MatchError, MatchResult, PairPattern, Pattern, Value,
};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times. Nothing is
/// installed unless `RUST_LOG` is set. A bare level such as `RUST_LOG=trace`
/// applies to the engine crates only; anything else is read as a full
/// filter, e.g. `RUST_LOG=shape_match::builder=trace`. Events go to stderr so
/// they never mix with rendered output.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(raw) = std::env::var("RUST_LOG") else {
            return;
        };
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .with(EnvFilter::new(filter_directives(&raw)))
            .init();
    });
}

const ENGINE_TARGETS: [&str; 4] = ["shape_value", "shape_match", "shape_record", "shape_cli"];

fn filter_directives(raw: &str) -> String {
    match raw.trim().parse::<tracing::Level>() {
        Ok(level) => ENGINE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect::<Vec<_>>()
            .join(","),
        Err(_) => raw.to_string(),
    }
}

//! Immutable clause builder and first-winner evaluation.
//!
//! A `Match<R>` holds the subject value, an ordered list of clauses and a
//! fallback. Every builder operation returns a new `Match`; the receiver is
//! left untouched and the two share all clauses appended before the fork.
//!
//! Evaluation tests clauses in insertion order. For each clause the guard
//! runs first; a `false` guard skips the clause without testing its pattern.
//! The first clause whose pattern outcome satisfies its mode wins and its
//! handler produces the result. With no winner the fallback is called.

mod clause;

use std::fmt;
use std::sync::Arc;

use shape_value::{MatchResult, Pattern, Value};
use tracing::trace;

use crate::matcher::{Matcher, Structural};

pub use clause::{Clause, ClauseList, Fallback, Guard, Handler, Mode};

/// An ordered set of `(pattern, guard, handler, mode)` clauses bound to a
/// subject value.
pub struct Match<R> {
    value: Value,
    fallback: Fallback<R>,
    clauses: ClauseList<R>,
}

/// Start a builder for `value` with the default-result fallback.
pub fn match_on<R: Default + 'static>(value: impl Into<Value>) -> Match<R> {
    Match::on(value)
}

impl<R: Default + 'static> Match<R> {
    /// Start a builder whose fallback returns `R::default()`.
    pub fn on(value: impl Into<Value>) -> Self {
        Match::from_parts(value.into(), Arc::new(|| Ok(R::default())), ClauseList::new())
    }
}

impl<R> Match<R> {
    /// Start a builder with an explicit fallback.
    pub fn with_otherwise<F>(value: impl Into<Value>, fallback: F) -> Self
    where
        F: Fn() -> MatchResult<R> + Send + Sync + 'static,
    {
        Match::from_parts(value.into(), Arc::new(fallback), ClauseList::new())
    }

    /// Assemble a builder from its parts.
    pub fn from_parts(value: Value, fallback: Fallback<R>, clauses: ClauseList<R>) -> Self {
        Match {
            value,
            fallback,
            clauses,
        }
    }

    /// Append a fully specified clause.
    #[must_use]
    pub fn add_clause(
        &self,
        pattern: impl Into<Pattern>,
        guard: Guard,
        handler: Handler<R>,
        mode: Mode,
    ) -> Self {
        let clause = Clause::new(pattern.into(), guard, handler, mode);
        Match {
            value: self.value.clone(),
            fallback: Arc::clone(&self.fallback),
            clauses: self.clauses.push(clause),
        }
    }

    /// Append a clause that wins when `pattern` matches.
    #[must_use]
    pub fn with<H>(&self, pattern: impl Into<Pattern>, handler: H) -> Self
    where
        H: Fn(&Value) -> MatchResult<R> + Send + Sync + 'static,
    {
        self.add_clause(pattern, always(), Arc::new(handler), Mode::Default)
    }

    /// Append a clause that wins when `guard` holds and `pattern` matches.
    #[must_use]
    pub fn with_when<G, H>(&self, pattern: impl Into<Pattern>, guard: G, handler: H) -> Self
    where
        G: Fn(&Value) -> MatchResult<bool> + Send + Sync + 'static,
        H: Fn(&Value) -> MatchResult<R> + Send + Sync + 'static,
    {
        self.add_clause(pattern, Arc::new(guard), Arc::new(handler), Mode::Default)
    }

    /// Append a clause that wins when `pattern` does NOT match.
    #[must_use]
    pub fn with_not<H>(&self, pattern: impl Into<Pattern>, handler: H) -> Self
    where
        H: Fn(&Value) -> MatchResult<R> + Send + Sync + 'static,
    {
        self.add_clause(pattern, always(), Arc::new(handler), Mode::Negated)
    }

    /// Append a clause that wins when `guard` holds and `pattern` does NOT
    /// match.
    #[must_use]
    pub fn with_not_when<G, H>(&self, pattern: impl Into<Pattern>, guard: G, handler: H) -> Self
    where
        G: Fn(&Value) -> MatchResult<bool> + Send + Sync + 'static,
        H: Fn(&Value) -> MatchResult<R> + Send + Sync + 'static,
    {
        self.add_clause(pattern, Arc::new(guard), Arc::new(handler), Mode::Negated)
    }

    /// Replace the fallback. Clauses are kept.
    #[must_use]
    pub fn otherwise<F>(&self, fallback: F) -> Self
    where
        F: Fn() -> MatchResult<R> + Send + Sync + 'static,
    {
        Match {
            value: self.value.clone(),
            fallback: Arc::new(fallback),
            clauses: self.clauses.clone(),
        }
    }

    /// Evaluate with the structural matcher.
    pub fn run(&self) -> MatchResult<R> {
        self.run_with(&Structural)
    }

    /// Evaluate with a caller-supplied matcher.
    #[tracing::instrument(level = "trace", skip_all, fields(clauses = self.clauses.len()))]
    pub fn run_with(&self, matcher: &dyn Matcher) -> MatchResult<R> {
        for (index, clause) in self.clauses.iter().enumerate() {
            if !clause.admits(&self.value)? {
                trace!(index, "guard rejected clause");
                continue;
            }
            let matched = matcher.matches(&self.value, clause.pattern())?;
            if clause.mode().wins(matched) {
                trace!(index, mode = ?clause.mode(), "clause won");
                return clause.invoke(&self.value);
            }
        }
        trace!("no clause won, using fallback");
        (self.fallback)()
    }

    /// The subject value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The clauses in insertion order.
    pub fn clauses(&self) -> &ClauseList<R> {
        &self.clauses
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    /// Whether no clause has been added.
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

fn always() -> Guard {
    Arc::new(|_: &Value| Ok(true))
}

impl<R> Clone for Match<R> {
    fn clone(&self) -> Self {
        Match {
            value: self.value.clone(),
            fallback: Arc::clone(&self.fallback),
            clauses: self.clauses.clone(),
        }
    }
}

impl<R> fmt::Debug for Match<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Match")
            .field("value", &self.value)
            .field("clauses", &self.clauses)
            .finish_non_exhaustive()
    }
}

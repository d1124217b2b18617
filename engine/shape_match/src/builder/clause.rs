//! Clauses and the persistent clause list.

use std::fmt;
use std::sync::Arc;

use shape_value::{MatchResult, Pattern, Value};
use smallvec::SmallVec;

/// Predicate checked before a clause's pattern is tested.
pub type Guard = Arc<dyn Fn(&Value) -> MatchResult<bool> + Send + Sync>;

/// Produces the result of a winning clause.
pub type Handler<R> = Arc<dyn Fn(&Value) -> MatchResult<R> + Send + Sync>;

/// Produces the result when no clause wins.
pub type Fallback<R> = Arc<dyn Fn() -> MatchResult<R> + Send + Sync>;

/// Whether a clause wins on a structural match or on its absence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// Wins when the pattern matches.
    #[default]
    Default,
    /// Wins when the pattern does not match.
    Negated,
}

impl Mode {
    /// Whether a match outcome makes the clause a winner.
    #[inline]
    pub fn wins(self, matched: bool) -> bool {
        match self {
            Mode::Default => matched,
            Mode::Negated => !matched,
        }
    }
}

/// One `(pattern, guard, handler, mode)` unit.
pub struct Clause<R> {
    pattern: Pattern,
    guard: Guard,
    handler: Handler<R>,
    mode: Mode,
}

impl<R> Clause<R> {
    /// Create a clause.
    pub fn new(pattern: Pattern, guard: Guard, handler: Handler<R>, mode: Mode) -> Self {
        Clause {
            pattern,
            guard,
            handler,
            mode,
        }
    }

    /// The pattern tested against the subject.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Whether this clause wins on a match or on its absence.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Run the guard.
    #[inline]
    pub fn admits(&self, value: &Value) -> MatchResult<bool> {
        (self.guard)(value)
    }

    /// Run the handler.
    #[inline]
    pub fn invoke(&self, value: &Value) -> MatchResult<R> {
        (self.handler)(value)
    }
}

impl<R> Clone for Clause<R> {
    fn clone(&self) -> Self {
        Clause {
            pattern: self.pattern.clone(),
            guard: Arc::clone(&self.guard),
            handler: Arc::clone(&self.handler),
            mode: self.mode,
        }
    }
}

impl<R> fmt::Debug for Clause<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clause")
            .field("pattern", &self.pattern)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}

struct Node<R> {
    clause: Clause<R>,
    prev: Option<Arc<Node<R>>>,
}

/// Persistent, append-only sequence of clauses.
///
/// A list is a handle to its newest node; `push` allocates one node pointing
/// at the previous head, so every earlier list stays valid and shares all of
/// its nodes with the lists derived from it.
pub struct ClauseList<R> {
    head: Option<Arc<Node<R>>>,
    len: usize,
}

impl<R> ClauseList<R> {
    /// An empty list.
    pub fn new() -> Self {
        ClauseList { head: None, len: 0 }
    }

    /// A new list with `clause` appended; `self` is unchanged.
    #[must_use]
    pub fn push(&self, clause: Clause<R>) -> Self {
        let node = Node {
            clause,
            prev: self.head.clone(),
        };
        ClauseList {
            head: Some(Arc::new(node)),
            len: self.len.saturating_add(1),
        }
    }

    /// Number of clauses.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no clauses.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Clauses in append order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Clause<R>> + '_ {
        let mut newest_first: SmallVec<[&Clause<R>; 8]> = SmallVec::with_capacity(self.len);
        let mut cursor = self.head.as_deref();
        while let Some(node) = cursor {
            newest_first.push(&node.clause);
            cursor = node.prev.as_deref();
        }
        newest_first.into_iter().rev()
    }

    /// Whether both lists share the same newest node.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (&self.head, &other.head) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        }
    }
}

impl<R> Clone for ClauseList<R> {
    fn clone(&self) -> Self {
        ClauseList {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<R> Default for ClauseList<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for ClauseList<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<R> FromIterator<Clause<R>> for ClauseList<R> {
    fn from_iter<I: IntoIterator<Item = Clause<R>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ClauseList::new(), |list, clause| list.push(clause))
    }
}

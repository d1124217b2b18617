//! Structural patterns.
//!
//! A pattern is a tree shaped like the values it describes. Leaves are
//! literals or primitive-kind wildcards; inner nodes describe sequences,
//! field sets and pair records. Patterns are built once and only read by the
//! matcher.
//!
//! ```text
//! // any value whose "Make" is "BMW" and whose "Year" is a number
//! let p = Pattern::fields([("Make", Pattern::from("BMW")), ("Year", Pattern::NUMBER)]);
//!
//! // a list of strings
//! let p = Pattern::each(Pattern::STRING);
//!
//! // at least one { name: "Make", value: "BMW" } among a list of pairs
//! let p = Pattern::pairs([Pattern::pair("Make", "BMW")]);
//! ```

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

use crate::errors::MatchResult;
use crate::value::Value;

/// Primitive kind admitted by a wildcard.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Kind {
    /// Any string.
    Str,
    /// Any boolean.
    Bool,
    /// Any number except `NaN`.
    Number,
}

impl Kind {
    /// Whether `value` is a primitive of this kind.
    ///
    /// Only primitives qualify: an accessor is not a string even if it would
    /// produce one.
    pub fn admits(self, value: &Value) -> bool {
        match (self, value) {
            (Kind::Str, Value::Str(_)) | (Kind::Bool, Value::Bool(_)) => true,
            (Kind::Number, Value::Number(n)) => !n.is_nan(),
            _ => false,
        }
    }
}

/// A literal primitive, compared by strict equality.
#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

impl Literal {
    /// Strict equality against a value.
    ///
    /// No coercion between kinds; `NaN` equals nothing; only primitives can
    /// be equal to a literal.
    #[allow(clippy::float_cmp, reason = "strict equality is the contract")]
    pub fn strict_eq(&self, value: &Value) -> bool {
        match (self, value) {
            (Literal::Null, Value::Null) => true,
            (Literal::Bool(a), Value::Bool(b)) => a == b,
            (Literal::Number(a), Value::Number(b)) => a == b,
            (Literal::Str(a), Value::Str(b)) => a.as_str() == &**b,
            _ => false,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Null => write!(f, "null"),
            Literal::Bool(b) => write!(f, "{b}"),
            Literal::Number(n) => write!(f, "{n}"),
            Literal::Str(s) => write!(f, "\"{s}\""),
        }
    }
}

type PatternFn = dyn Fn() -> MatchResult<Pattern> + Send + Sync;

/// A zero-argument callable producing a pattern.
///
/// Lets a pattern describe the result of a computed field without the caller
/// invoking anything up front.
#[derive(Clone)]
pub struct PatternAccessor(Arc<PatternFn>);

impl PatternAccessor {
    /// Wrap a callable.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() -> MatchResult<Pattern> + Send + Sync + 'static,
    {
        PatternAccessor(Arc::new(f))
    }

    /// Invoke the accessor.
    #[inline]
    pub fn call(&self) -> MatchResult<Pattern> {
        (self.0)()
    }
}

impl fmt::Debug for PatternAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PatternAccessor")
    }
}

/// Structural description of a value.
#[derive(Clone, Debug)]
pub enum Pattern {
    /// Any primitive of the given kind.
    Kind(Kind),
    /// A literal primitive.
    Literal(Literal),
    /// A sequence pattern.
    ///
    /// When both this and the value are made only of pair records, matching
    /// is existential over the pairs. Otherwise the first element is the
    /// template every element of the value must match; further elements are
    /// ignored.
    Seq(Vec<Pattern>),
    /// A `{ name, value }` pair record.
    Pair(Box<PairPattern>),
    /// Required fields, in evaluation order.
    ///
    /// An entry of `None` is a key that is present but undefined; it never
    /// matches, so an unset sub-pattern cannot make a clause vacuously true.
    Fields(Vec<(String, Option<Pattern>)>),
    /// A pattern computed on demand.
    Accessor(PatternAccessor),
}

/// The two sides of a pair-record pattern.
#[derive(Clone, Debug)]
pub struct PairPattern {
    pub name: Pattern,
    pub value: Pattern,
}

impl Pattern {
    /// Any string.
    pub const STRING: Pattern = Pattern::Kind(Kind::Str);
    /// Any boolean.
    pub const BOOLEAN: Pattern = Pattern::Kind(Kind::Bool);
    /// Any number except `NaN`.
    pub const NUMBER: Pattern = Pattern::Kind(Kind::Number);
    /// The literal `null`.
    pub const NULL: Pattern = Pattern::Literal(Literal::Null);

    /// Required fields.
    pub fn fields<I, K, P>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, P)>,
        K: Into<String>,
        P: Into<Pattern>,
    {
        Pattern::Fields(
            entries
                .into_iter()
                .map(|(k, p)| (k.into(), Some(p.into())))
                .collect(),
        )
    }

    /// Required fields, some of which may be present but undefined.
    pub fn fields_opt<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<Pattern>)>,
        K: Into<String>,
    {
        Pattern::Fields(entries.into_iter().map(|(k, p)| (k.into(), p)).collect())
    }

    /// Every element of a sequence must match `template`.
    pub fn each(template: impl Into<Pattern>) -> Self {
        Pattern::Seq(vec![template.into()])
    }

    /// A raw sequence pattern.
    pub fn seq(elements: Vec<Pattern>) -> Self {
        Pattern::Seq(elements)
    }

    /// A `{ name, value }` pair-record pattern.
    pub fn pair(name: impl Into<Pattern>, value: impl Into<Pattern>) -> Self {
        Pattern::Pair(Box::new(PairPattern {
            name: name.into(),
            value: value.into(),
        }))
    }

    /// A sequence of pair-record patterns, matched existentially.
    pub fn pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = Pattern>,
    {
        Pattern::Seq(pairs.into_iter().collect())
    }

    /// A pattern computed on demand.
    pub fn accessor<F>(f: F) -> Self
    where
        F: Fn() -> MatchResult<Pattern> + Send + Sync + 'static,
    {
        Pattern::Accessor(PatternAccessor::new(f))
    }

    /// Split a pair-record pattern into its `(name, value)` sides.
    ///
    /// A field set with defined `name` and `value` entries counts as a pair
    /// record.
    pub fn pair_parts(&self) -> Option<(&Pattern, &Pattern)> {
        match self {
            Pattern::Pair(pair) => Some((&pair.name, &pair.value)),
            Pattern::Fields(entries) => {
                let lookup = |key: &str| {
                    entries
                        .iter()
                        .find(|(k, _)| k == key)
                        .and_then(|(_, p)| p.as_ref())
                };
                Some((lookup("name")?, lookup("value")?))
            }
            _ => None,
        }
    }

    /// Invoke a pattern accessor; any other pattern resolves to itself.
    pub fn resolve(&self) -> MatchResult<Cow<'_, Pattern>> {
        match self {
            Pattern::Accessor(accessor) => Ok(Cow::Owned(accessor.call()?)),
            _ => Ok(Cow::Borrowed(self)),
        }
    }
}

impl From<Kind> for Pattern {
    fn from(kind: Kind) -> Self {
        Pattern::Kind(kind)
    }
}

impl From<Literal> for Pattern {
    fn from(lit: Literal) -> Self {
        Pattern::Literal(lit)
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Literal::Bool(b))
    }
}

impl From<f64> for Pattern {
    fn from(n: f64) -> Self {
        Pattern::Literal(Literal::Number(n))
    }
}

impl From<i32> for Pattern {
    fn from(n: i32) -> Self {
        Pattern::Literal(Literal::Number(f64::from(n)))
    }
}

impl From<u32> for Pattern {
    fn from(n: u32) -> Self {
        Pattern::Literal(Literal::Number(f64::from(n)))
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Literal::Str(s.to_string()))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(Literal::Str(s))
    }
}

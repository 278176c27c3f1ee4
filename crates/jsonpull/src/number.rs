//! Exact-precision number values.
//!
//! JSON numbers are classified from their lexeme alone: a lexeme containing
//! `.`, `e`, or `E` becomes a [`Decimal`] holding the exact source text;
//! anything else becomes an [`Integer`]. Neither representation ever passes
//! through binary floating point, so `0.1` stays `0.1` and integers of any
//! magnitude survive unchanged.

use core::fmt;

/// A JSON number, either an integer or an exact textual decimal.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Number {
    /// An integer lexeme (no `.`, `e`, or `E`).
    Integer(Integer),
    /// A fractional or exponential lexeme, kept as exact text.
    Decimal(Decimal),
}

impl Number {
    /// Classifies a validated numeric lexeme.
    ///
    /// One scan of the lexeme decides the variant: `.`, `e`, or `E` means
    /// [`Number::Decimal`], otherwise [`Number::Integer`].
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Self {
        if lexeme.bytes().any(|b| matches!(b, b'.' | b'e' | b'E')) {
            Self::Decimal(Decimal::from_lexeme(lexeme))
        } else {
            Self::Integer(Integer::from_lexeme(lexeme))
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => n.fmt(f),
            Self::Decimal(d) => d.fmt(f),
        }
    }
}

impl From<i64> for Number {
    fn from(v: i64) -> Self {
        Self::Integer(Integer::from(v))
    }
}

/// An arbitrary-precision integer.
///
/// Lexemes that fit an `i64` are stored as one; anything larger keeps its
/// exact decimal digit string. JSON forbids leading zeros, so the stored
/// text is canonical and the out-of-range representation is only ever used
/// beyond the `i64` range. Equality is numeric-exact.
///
/// # Examples
///
/// ```
/// use jsonpull::Integer;
///
/// let small = Integer::from_lexeme("42");
/// assert_eq!(small.as_i64(), Some(42));
///
/// let huge = Integer::from_lexeme("123456789012345678901234567890");
/// assert_eq!(huge.as_i64(), None);
/// assert_eq!(huge.to_string(), "123456789012345678901234567890");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Integer {
    repr: IntRepr,
}

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum IntRepr {
    Small(i64),
    // Invariant: only used when the value is outside the i64 range, so the
    // derived equality never has to compare across representations.
    Big(Box<str>),
}

impl Integer {
    /// Builds an integer from a validated integer lexeme.
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Self {
        let repr = match lexeme.parse::<i64>() {
            Ok(v) => IntRepr::Small(v),
            Err(_) => IntRepr::Big(lexeme.into()),
        };
        Self { repr }
    }

    /// Returns the value as an `i64` if it fits, otherwise `None`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match &self.repr {
            IntRepr::Small(v) => Some(*v),
            IntRepr::Big(_) => None,
        }
    }

    /// Returns the closest `f64`, losing precision beyond 53 bits.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64_lossy(&self) -> f64 {
        match &self.repr {
            IntRepr::Small(v) => *v as f64,
            IntRepr::Big(digits) => digits.parse().unwrap_or(f64::NAN),
        }
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            IntRepr::Small(v) => v.fmt(f),
            IntRepr::Big(digits) => f.write_str(digits),
        }
    }
}

impl From<i64> for Integer {
    fn from(v: i64) -> Self {
        Self {
            repr: IntRepr::Small(v),
        }
    }
}

impl PartialEq<i64> for Integer {
    fn eq(&self, other: &i64) -> bool {
        self.as_i64() == Some(*other)
    }
}

/// An exact textual decimal.
///
/// The lexeme is stored verbatim; no base-2 round trip ever happens, so the
/// value is exactly what the document said. Equality compares the lexeme
/// text, which means `1.0` and `1.00` are distinct values.
///
/// # Examples
///
/// ```
/// use jsonpull::Decimal;
///
/// let d = Decimal::from_lexeme("0.1");
/// assert_eq!(d.as_str(), "0.1");
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
    lexeme: Box<str>,
}

impl Decimal {
    /// Builds a decimal from a validated numeric lexeme.
    #[must_use]
    pub fn from_lexeme(lexeme: &str) -> Self {
        Self {
            lexeme: lexeme.into(),
        }
    }

    /// The exact source text of the number.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.lexeme
    }

    /// Returns the closest `f64` approximation.
    #[must_use]
    pub fn as_f64_lossy(&self) -> f64 {
        self.lexeme.parse().unwrap_or(f64::NAN)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lexeme)
    }
}

//! Incremental matcher for the `null`, `true`, and `false` keywords.
//!
//! Literals can be split across feed chunks at any byte, so the matcher
//! remembers how far it got and resumes on the next chunk.

/// Which keyword is being matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Literal {
    Null,
    True,
    False,
}

/// What happened after feeding one more byte into the matcher.
pub(crate) enum Step {
    /// Byte matched, but the literal is not finished yet.
    NeedMore,
    /// Byte matched and it was the last byte of the literal.
    Done(Literal),
    /// Byte did not match the expected one.
    Reject,
}

/// `None` while no literal is in flight, otherwise the remaining expected
/// bytes and the keyword they complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct LiteralMatcher(Option<(&'static [u8], Literal)>);

impl LiteralMatcher {
    pub(crate) fn none() -> Self {
        Self(None)
    }

    /// Starts matching after the first byte (`n`, `t`, or `f`).
    pub(crate) fn new(first: u8) -> Self {
        match first {
            b'n' => Self(Some((b"ull", Literal::Null))),
            b't' => Self(Some((b"rue", Literal::True))),
            b'f' => Self(Some((b"alse", Literal::False))),
            _ => Self::none(),
        }
    }

    /// Feeds the next input byte and learns what to do next.
    pub(crate) fn step(&mut self, b: u8) -> Step {
        let Some((expected, literal)) = self.0.take() else {
            return Step::Reject;
        };

        match expected.split_first() {
            Some((&want, rest)) if want == b => {
                if rest.is_empty() {
                    Step::Done(literal)
                } else {
                    self.0 = Some((rest, literal));
                    Step::NeedMore
                }
            }
            _ => {
                self.0 = Some((expected, literal));
                Step::Reject
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Literal, LiteralMatcher, Step};

    #[test]
    fn matches_null_byte_by_byte() {
        let mut m = LiteralMatcher::new(b'n');
        assert!(matches!(m.step(b'u'), Step::NeedMore));
        assert!(matches!(m.step(b'l'), Step::NeedMore));
        assert!(matches!(m.step(b'l'), Step::Done(Literal::Null)));
    }

    #[test]
    fn rejects_misspelling() {
        let mut m = LiteralMatcher::new(b't');
        assert!(matches!(m.step(b'r'), Step::NeedMore));
        assert!(matches!(m.step(b'e'), Step::Reject));
        // Rejection does not lose position; the same byte keeps rejecting.
        assert!(matches!(m.step(b'e'), Step::Reject));
    }

    #[test]
    fn idle_matcher_rejects_everything() {
        let mut m = LiteralMatcher::none();
        assert!(matches!(m.step(b'n'), Step::Reject));
    }
}

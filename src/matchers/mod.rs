//! # Matchers
//!
//! A matcher pairs a boolean test with a lazily-built description. The
//! description is only rendered when a check fails, and may be asked for in
//! its negated form (`"isn't between 9 and 11"`) when the matcher sits under
//! [`not`].
//!
//! Matchers compose: [`all_of`], [`any_of`], [`not`], [`each`],
//! [`field`], [`property`] and [`unordered_elements_are`] all take other
//! matchers. [`MatcherExt`] chains two of them with `.and(..)` or `.or(..)`.
//!
//! ```
//! use casework::matchers::{between, divisible_by, each, not, Explanation, Matcher};
//!
//! let mut why = Explanation::default();
//! assert!(between(9, 11).matches(&10, &mut why));
//! assert!(not(between(9, 11)).matches(&100, &mut why));
//! assert!(each(divisible_by(4)).matches(&vec![4, 8, 12], &mut why));
//! ```

mod compare;
mod compose;
mod strings;

pub use compare::{between, divisible_by, eq, ge, gt, le, lt, ne, truly};
pub use compare::{Between, Compare, DivisibleBy, Equals, Truly};
pub use compose::{all_of, any_of, each, field, not, property, unordered_elements_are};
pub use compose::{AllOf, And, AnyOf, Each, Field, Not, Or, UnorderedElementsAre};
pub use strings::{contains_str, matches_regex, starts_with};
pub use strings::{ContainsStr, MatchesRegex, StartsWith};

use std::fmt;

/// Extra detail a matcher attaches to a mismatch ("where the remainder is 1").
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Explanation {
    text: String,
}

impl Explanation {
    pub fn push(&mut self, detail: impl fmt::Display) {
        if !self.text.is_empty() {
            self.text.push_str(", ");
        }
        self.text.push_str(&detail.to_string());
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn clear(&mut self) {
        self.text.clear();
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// A composable predicate with a human-readable description.
pub trait Matcher<T: ?Sized> {
    /// Tests `actual`, optionally writing extra detail to `listener`.
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool;

    /// Describes what a matching value looks like, or what a non-matching one
    /// looks like when `negated` is set.
    fn describe(&self, negated: bool) -> String;
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for &M {
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        (**self).matches(actual, listener)
    }

    fn describe(&self, negated: bool) -> String {
        (**self).describe(negated)
    }
}

impl<T: ?Sized, M: Matcher<T> + ?Sized> Matcher<T> for Box<M> {
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        (**self).matches(actual, listener)
    }

    fn describe(&self, negated: bool) -> String {
        (**self).describe(negated)
    }
}

/// Chaining sugar over [`Matcher`]: `gt(0).and(lt(100))`.
///
/// Matchers that are generic over their input (the string matchers) need the
/// input type spelled out, as in `MatcherExt::<str>::and(starts_with("a"), ..)`.
pub trait MatcherExt<T: ?Sized>: Matcher<T> + Sized {
    fn and<M: Matcher<T>>(self, other: M) -> And<Self, M> {
        compose::And(self, other)
    }

    fn or<M: Matcher<T>>(self, other: M) -> Or<Self, M> {
        compose::Or(self, other)
    }

    fn negate(self) -> Not<Self> {
        not(self)
    }
}

impl<T: ?Sized, M: Matcher<T>> MatcherExt<T> for M {}

/// Type-erased matcher, the element type of [`all_of`] and friends.
pub type BoxMatcher<T> = Box<dyn Matcher<T>>;

pub fn boxed<T: ?Sized, M: Matcher<T> + 'static>(matcher: M) -> BoxMatcher<T> {
    Box::new(matcher)
}

/// Boxes every argument and hands them to [`all_of`].
#[macro_export]
macro_rules! all_of {
    ($($m:expr),+ $(,)?) => {
        $crate::matchers::all_of(vec![$($crate::matchers::boxed($m)),+])
    };
}

/// Boxes every argument and hands them to [`any_of`].
#[macro_export]
macro_rules! any_of {
    ($($m:expr),+ $(,)?) => {
        $crate::matchers::any_of(vec![$($crate::matchers::boxed($m)),+])
    };
}

/// Runs one matcher against one value, returning the explanation on mismatch.
pub fn check<T: ?Sized, M: Matcher<T>>(actual: &T, matcher: &M) -> Result<(), Explanation> {
    let mut listener = Explanation::default();
    if matcher.matches(actual, &mut listener) {
        Ok(())
    } else {
        Err(listener)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explanation_joins_and_clears() {
        let mut why = Explanation::default();
        assert!(!divisible_by(4).matches(&10, &mut why));
        why.push("which is even");
        assert_eq!(why.to_string(), "where the remainder is 2, which is even");

        why.clear();
        assert!(why.is_empty());
        assert!(divisible_by(5).matches(&10, &mut why));
        assert_eq!(why.as_str(), "where the remainder is 0");
    }
}

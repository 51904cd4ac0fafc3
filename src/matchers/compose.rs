//! Logical combinators and container/member matchers.

use std::fmt::Debug;
use std::marker::PhantomData;

use super::{BoxMatcher, Explanation, Matcher};

/// Matches when every inner matcher matches.
pub struct AllOf<T: ?Sized> {
    matchers: Vec<BoxMatcher<T>>,
}

pub fn all_of<T: ?Sized>(matchers: Vec<BoxMatcher<T>>) -> AllOf<T> {
    AllOf { matchers }
}

impl<T: ?Sized> Matcher<T> for AllOf<T> {
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        for matcher in &self.matchers {
            if !matcher.matches(actual, listener) {
                listener.push(format_args!("which {}", matcher.describe(true)));
                return false;
            }
        }
        true
    }

    fn describe(&self, negated: bool) -> String {
        let joined = join(&self.matchers, " and ");
        if negated {
            format!("not ({joined})")
        } else {
            joined
        }
    }
}

/// Matches when at least one inner matcher matches.
pub struct AnyOf<T: ?Sized> {
    matchers: Vec<BoxMatcher<T>>,
}

pub fn any_of<T: ?Sized>(matchers: Vec<BoxMatcher<T>>) -> AnyOf<T> {
    AnyOf { matchers }
}

impl<T: ?Sized> Matcher<T> for AnyOf<T> {
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        let mut scratch = Explanation::default();
        self.matchers
            .iter()
            .any(|m| m.matches(actual, &mut scratch))
            || {
                listener.push("which matches none of the alternatives");
                false
            }
    }

    fn describe(&self, negated: bool) -> String {
        let joined = join(&self.matchers, " or ");
        if negated {
            format!("not ({joined})")
        } else {
            joined
        }
    }
}

/// Two matchers that must both match; built by [`MatcherExt::and`](super::MatcherExt::and).
#[derive(Debug, Clone)]
pub struct And<A, B>(pub(super) A, pub(super) B);

impl<T: ?Sized, A: Matcher<T>, B: Matcher<T>> Matcher<T> for And<A, B> {
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        if !self.0.matches(actual, listener) {
            listener.push(format_args!("which {}", self.0.describe(true)));
            return false;
        }
        if !self.1.matches(actual, listener) {
            listener.push(format_args!("which {}", self.1.describe(true)));
            return false;
        }
        true
    }

    fn describe(&self, negated: bool) -> String {
        let both = format!("({}) and ({})", self.0.describe(false), self.1.describe(false));
        if negated {
            format!("not ({both})")
        } else {
            both
        }
    }
}

/// Two alternatives; built by [`MatcherExt::or`](super::MatcherExt::or).
#[derive(Debug, Clone)]
pub struct Or<A, B>(pub(super) A, pub(super) B);

impl<T: ?Sized, A: Matcher<T>, B: Matcher<T>> Matcher<T> for Or<A, B> {
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        let mut scratch = Explanation::default();
        if self.0.matches(actual, &mut scratch) || self.1.matches(actual, &mut scratch) {
            return true;
        }
        listener.push("which matches neither alternative");
        false
    }

    fn describe(&self, negated: bool) -> String {
        let either = format!("({}) or ({})", self.0.describe(false), self.1.describe(false));
        if negated {
            format!("not ({either})")
        } else {
            either
        }
    }
}

fn join<T: ?Sized>(matchers: &[BoxMatcher<T>], sep: &str) -> String {
    matchers
        .iter()
        .map(|m| format!("({})", m.describe(false)))
        .collect::<Vec<_>>()
        .join(sep)
}

/// Inverts a matcher, and its description.
#[derive(Debug, Clone)]
pub struct Not<M>(pub(super) M);

pub fn not<M>(matcher: M) -> Not<M> {
    Not(matcher)
}

impl<T: ?Sized, M: Matcher<T>> Matcher<T> for Not<M> {
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        let mut inner = Explanation::default();
        let matched = self.0.matches(actual, &mut inner);
        if matched && !inner.is_empty() {
            listener.push(inner);
        }
        !matched
    }

    fn describe(&self, negated: bool) -> String {
        self.0.describe(!negated)
    }
}

/// Matches a container whose every element matches.
#[derive(Debug, Clone)]
pub struct Each<M>(M);

pub fn each<M>(matcher: M) -> Each<M> {
    Each(matcher)
}

impl<T, M: Matcher<T>> Matcher<[T]> for Each<M> {
    fn matches(&self, actual: &[T], listener: &mut Explanation) -> bool {
        for (index, element) in actual.iter().enumerate() {
            let mut inner = Explanation::default();
            if !self.0.matches(element, &mut inner) {
                listener.push(format_args!("whose element #{index} doesn't match"));
                if !inner.is_empty() {
                    listener.push(inner);
                }
                return false;
            }
        }
        true
    }

    fn describe(&self, negated: bool) -> String {
        if negated {
            format!("contains some element that {}", self.0.describe(true))
        } else {
            format!("only contains elements that {}", self.0.describe(false))
        }
    }
}

impl<T, M: Matcher<T>> Matcher<Vec<T>> for Each<M> {
    fn matches(&self, actual: &Vec<T>, listener: &mut Explanation) -> bool {
        Matcher::<[T]>::matches(self, actual.as_slice(), listener)
    }

    fn describe(&self, negated: bool) -> String {
        Matcher::<[T]>::describe(self, negated)
    }
}

/// Applies a matcher to a projection of the value: a public field or a
/// getter method.
pub struct Field<T: ?Sized, U, F, M> {
    kind: &'static str,
    name: String,
    projection: F,
    matcher: M,
    _marker: PhantomData<fn(&T) -> U>,
}

impl<T: ?Sized, U, F, M: Debug> Debug for Field<T, U, F, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("kind", &self.kind)
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Matches an object whose field `name`, read by `projection`, matches.
pub fn field<T, U, F, M>(name: impl Into<String>, projection: F, matcher: M) -> Field<T, U, F, M>
where
    T: ?Sized,
    F: Fn(&T) -> U,
    M: Matcher<U>,
{
    Field {
        kind: "field",
        name: name.into(),
        projection,
        matcher,
        _marker: PhantomData,
    }
}

/// Like [`field`], for a `&self` getter such as `MyType::get_m`.
pub fn property<T, U, F, M>(name: impl Into<String>, getter: F, matcher: M) -> Field<T, U, F, M>
where
    T: ?Sized,
    F: Fn(&T) -> U,
    M: Matcher<U>,
{
    Field {
        kind: "property",
        ..field(name, getter, matcher)
    }
}

impl<T, U, F, M> Matcher<T> for Field<T, U, F, M>
where
    T: ?Sized,
    U: Debug,
    F: Fn(&T) -> U,
    M: Matcher<U>,
{
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        let projected = (self.projection)(actual);
        let mut inner = Explanation::default();
        let matched = self.matcher.matches(&projected, &mut inner);
        if !matched {
            listener.push(format_args!(
                "whose {} `{}` is {:?}",
                self.kind, self.name, projected
            ));
            if !inner.is_empty() {
                listener.push(inner);
            }
        }
        matched
    }

    fn describe(&self, negated: bool) -> String {
        format!(
            "is an object whose {} `{}` {}",
            self.kind,
            self.name,
            self.matcher.describe(negated)
        )
    }
}

/// Matches a container that can be permuted so that element `i` matches
/// matcher `i`, for every `i`.
pub struct UnorderedElementsAre<T> {
    matchers: Vec<BoxMatcher<T>>,
}

pub fn unordered_elements_are<T>(matchers: Vec<BoxMatcher<T>>) -> UnorderedElementsAre<T> {
    UnorderedElementsAre { matchers }
}

impl<T> UnorderedElementsAre<T> {
    /// Kuhn's augmenting-path search over the element/matcher compatibility graph.
    fn augment(
        element: usize,
        edges: &[Vec<usize>],
        visited: &mut [bool],
        owner: &mut [Option<usize>],
    ) -> bool {
        for &m in &edges[element] {
            if visited[m] {
                continue;
            }
            visited[m] = true;
            let free = match owner[m] {
                None => true,
                Some(other) => Self::augment(other, edges, visited, owner),
            };
            if free {
                owner[m] = Some(element);
                return true;
            }
        }
        false
    }
}

impl<T> Matcher<[T]> for UnorderedElementsAre<T> {
    fn matches(&self, actual: &[T], listener: &mut Explanation) -> bool {
        if actual.len() != self.matchers.len() {
            listener.push(format_args!(
                "which has {} elements, expected {}",
                actual.len(),
                self.matchers.len()
            ));
            return false;
        }
        let mut scratch = Explanation::default();
        let edges: Vec<Vec<usize>> = actual
            .iter()
            .map(|element| {
                (0..self.matchers.len())
                    .filter(|&m| self.matchers[m].matches(element, &mut scratch))
                    .collect()
            })
            .collect();

        let mut owner = vec![None; self.matchers.len()];
        for element in 0..actual.len() {
            let mut visited = vec![false; self.matchers.len()];
            if !Self::augment(element, &edges, &mut visited, &mut owner) {
                listener.push(format_args!(
                    "where element #{element} has no matcher left to pair with"
                ));
                return false;
            }
        }
        true
    }

    fn describe(&self, negated: bool) -> String {
        let parts = join(&self.matchers, ", ");
        if negated {
            format!("isn't a permutation of elements matching {parts}")
        } else {
            format!("has elements that can be permuted to match {parts}")
        }
    }
}

impl<T> Matcher<Vec<T>> for UnorderedElementsAre<T> {
    fn matches(&self, actual: &Vec<T>, listener: &mut Explanation) -> bool {
        Matcher::<[T]>::matches(self, actual.as_slice(), listener)
    }

    fn describe(&self, negated: bool) -> String {
        Matcher::<[T]>::describe(self, negated)
    }
}

//! Value comparisons and free-form predicates.

use std::fmt::Debug;
use std::ops::Rem;

use super::{Explanation, Matcher};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Ge,
    Gt,
    Le,
    Lt,
}

impl Op {
    fn symbol(self) -> &'static str {
        match self {
            Op::Eq => "==",
            Op::Ne => "!=",
            Op::Ge => ">=",
            Op::Gt => ">",
            Op::Le => "<=",
            Op::Lt => "<",
        }
    }

    fn inverse(self) -> Op {
        match self {
            Op::Eq => Op::Ne,
            Op::Ne => Op::Eq,
            Op::Ge => Op::Lt,
            Op::Gt => Op::Le,
            Op::Le => Op::Gt,
            Op::Lt => Op::Ge,
        }
    }
}

/// Compares the actual value against a fixed operand.
#[derive(Debug, Clone)]
pub struct Compare<T> {
    op: Op,
    operand: T,
}

impl<T: PartialOrd + Debug> Matcher<T> for Compare<T> {
    fn matches(&self, actual: &T, _listener: &mut Explanation) -> bool {
        match self.op {
            Op::Eq => *actual == self.operand,
            Op::Ne => *actual != self.operand,
            Op::Ge => *actual >= self.operand,
            Op::Gt => *actual > self.operand,
            Op::Le => *actual <= self.operand,
            Op::Lt => *actual < self.operand,
        }
    }

    fn describe(&self, negated: bool) -> String {
        let op = if negated { self.op.inverse() } else { self.op };
        format!("is {} {:?}", op.symbol(), self.operand)
    }
}

/// Equality check; only needs `PartialEq`, unlike the ordering matchers.
#[derive(Debug, Clone)]
pub struct Equals<T> {
    expected: T,
    equal: bool,
}

impl<T: PartialEq + Debug> Matcher<T> for Equals<T> {
    fn matches(&self, actual: &T, _listener: &mut Explanation) -> bool {
        (*actual == self.expected) == self.equal
    }

    fn describe(&self, negated: bool) -> String {
        let op = if self.equal != negated { Op::Eq } else { Op::Ne };
        format!("is {} {:?}", op.symbol(), self.expected)
    }
}

pub fn eq<T>(expected: T) -> Equals<T> {
    Equals {
        expected,
        equal: true,
    }
}

pub fn ne<T>(expected: T) -> Equals<T> {
    Equals {
        expected,
        equal: false,
    }
}

pub fn ge<T>(operand: T) -> Compare<T> {
    Compare { op: Op::Ge, operand }
}

pub fn gt<T>(operand: T) -> Compare<T> {
    Compare { op: Op::Gt, operand }
}

pub fn le<T>(operand: T) -> Compare<T> {
    Compare { op: Op::Le, operand }
}

pub fn lt<T>(operand: T) -> Compare<T> {
    Compare { op: Op::Lt, operand }
}

/// Inclusive range check.
#[derive(Debug, Clone)]
pub struct Between<T> {
    low: T,
    high: T,
}

pub fn between<T>(low: T, high: T) -> Between<T> {
    Between { low, high }
}

impl<T: PartialOrd + Debug> Matcher<T> for Between<T> {
    fn matches(&self, actual: &T, _listener: &mut Explanation) -> bool {
        self.low <= *actual && *actual <= self.high
    }

    fn describe(&self, negated: bool) -> String {
        format!(
            "{} between {:?} and {:?}",
            if negated { "isn't" } else { "is" },
            self.low,
            self.high
        )
    }
}

/// Divisibility check that explains the remainder on mismatch.
#[derive(Debug, Clone)]
pub struct DivisibleBy<T> {
    divisor: T,
}

pub fn divisible_by<T>(divisor: T) -> DivisibleBy<T> {
    DivisibleBy { divisor }
}

impl<T> Matcher<T> for DivisibleBy<T>
where
    T: Copy + Rem<Output = T> + PartialEq + Default + Debug,
{
    fn matches(&self, actual: &T, listener: &mut Explanation) -> bool {
        if self.divisor == T::default() {
            listener.push("where the divisor is zero");
            return false;
        }
        let remainder = *actual % self.divisor;
        listener.push(format_args!("where the remainder is {remainder:?}"));
        remainder == T::default()
    }

    fn describe(&self, negated: bool) -> String {
        format!(
            "{} divisible by {:?}",
            if negated { "isn't" } else { "is" },
            self.divisor
        )
    }
}

/// Wraps a plain predicate function as a matcher.
#[derive(Clone)]
pub struct Truly<F> {
    name: String,
    predicate: F,
}

impl<F> Debug for Truly<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Truly").field("name", &self.name).finish()
    }
}

pub fn truly<F>(name: impl Into<String>, predicate: F) -> Truly<F> {
    Truly {
        name: name.into(),
        predicate,
    }
}

impl<T: ?Sized, F: Fn(&T) -> bool> Matcher<T> for Truly<F> {
    fn matches(&self, actual: &T, _listener: &mut Explanation) -> bool {
        (self.predicate)(actual)
    }

    fn describe(&self, negated: bool) -> String {
        format!(
            "{} {}",
            if negated { "doesn't satisfy" } else { "satisfies" },
            self.name
        )
    }
}

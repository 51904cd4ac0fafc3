//! Assertions inside a case body.
//!
//! A [`Checker`] collects [`Failure`]s for one case. The `expect_*` methods
//! record and let the body continue; the `assert_*` methods record and return
//! [`CaseError::AssertionAbort`] so the body can stop with `?`.

use std::fmt::{self, Debug};
use std::panic::Location as PanicLocation;

use serde::Serialize;

use crate::matchers::{Explanation, Matcher};

/// Source position of the assertion that produced a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub file: String,
    pub line: u32,
}

impl Location {
    #[track_caller]
    pub fn caller() -> Self {
        let loc = PanicLocation::caller();
        Self {
            file: loc.file().to_string(),
            line: loc.line(),
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// One structured assertion failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub message: String,
    pub expected: Option<String>,
    pub actual: Option<String>,
    pub location: Option<Location>,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(loc) = &self.location {
            write!(f, "{loc}: ")?;
        }
        write!(f, "{}", self.message)?;
        if let (Some(expected), Some(actual)) = (&self.expected, &self.actual) {
            write!(f, "\n  Expected: {expected}\n    Actual: {actual}")?;
        }
        Ok(())
    }
}

/// Why a case body stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseError {
    /// A fatal assertion failed; the failure is already recorded.
    AssertionAbort,
    /// An unexpected fault, distinct from a declared assertion.
    Execution(String),
}

impl CaseError {
    pub fn execution(message: impl fmt::Display) -> Self {
        CaseError::Execution(message.to_string())
    }
}

impl fmt::Display for CaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseError::AssertionAbort => write!(f, "fatal assertion failed"),
            CaseError::Execution(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for CaseError {}

/// Result type of a case body.
pub type CaseOutcome = Result<(), CaseError>;

/// Collects assertion failures for one case.
#[derive(Debug, Default)]
pub struct Checker {
    failures: Vec<Failure>,
}

impl Checker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> &[Failure] {
        &self.failures
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn into_failures(self) -> Vec<Failure> {
        self.failures
    }

    pub fn record(&mut self, failure: Failure) {
        self.failures.push(failure);
    }

    /// Records a free-form failure.
    #[track_caller]
    pub fn fail(&mut self, message: impl Into<String>) {
        self.failures.push(Failure {
            message: message.into(),
            expected: None,
            actual: None,
            location: Some(Location::caller()),
        });
    }

    #[track_caller]
    pub fn expect_eq<T: PartialEq + Debug + ?Sized>(&mut self, expected: &T, actual: &T) -> bool {
        if expected == actual {
            return true;
        }
        self.failures.push(Failure {
            message: "values differ".to_string(),
            expected: Some(format!("{expected:?}")),
            actual: Some(format!("{actual:?}")),
            location: Some(Location::caller()),
        });
        false
    }

    #[track_caller]
    pub fn expect_ne<T: PartialEq + Debug + ?Sized>(&mut self, unexpected: &T, actual: &T) -> bool {
        if unexpected != actual {
            return true;
        }
        self.failures.push(Failure {
            message: "values are equal".to_string(),
            expected: Some(format!("!= {unexpected:?}")),
            actual: Some(format!("{actual:?}")),
            location: Some(Location::caller()),
        });
        false
    }

    #[track_caller]
    pub fn expect_true(&mut self, condition: bool, what: &str) -> bool {
        if condition {
            return true;
        }
        self.failures.push(Failure {
            message: format!("`{what}` is false"),
            expected: Some("true".to_string()),
            actual: Some("false".to_string()),
            location: Some(Location::caller()),
        });
        false
    }

    #[track_caller]
    pub fn expect_false(&mut self, condition: bool, what: &str) -> bool {
        if !condition {
            return true;
        }
        self.failures.push(Failure {
            message: format!("`{what}` is true"),
            expected: Some("false".to_string()),
            actual: Some("true".to_string()),
            location: Some(Location::caller()),
        });
        false
    }

    /// Checks `actual` against a matcher. The description is only built on
    /// mismatch.
    #[track_caller]
    pub fn expect_that<T, M>(&mut self, actual: &T, matcher: M) -> bool
    where
        T: Debug + ?Sized,
        M: Matcher<T>,
    {
        let mut listener = Explanation::default();
        if matcher.matches(actual, &mut listener) {
            return true;
        }
        let actual_text = if listener.is_empty() {
            format!("{actual:?}")
        } else {
            format!("{actual:?}, {listener}")
        };
        self.failures.push(Failure {
            message: "value doesn't match".to_string(),
            expected: Some(matcher.describe(false)),
            actual: Some(actual_text),
            location: Some(Location::caller()),
        });
        false
    }

    #[track_caller]
    pub fn assert_eq<T: PartialEq + Debug + ?Sized>(&mut self, expected: &T, actual: &T) -> CaseOutcome {
        fatal(self.expect_eq(expected, actual))
    }

    #[track_caller]
    pub fn assert_true(&mut self, condition: bool, what: &str) -> CaseOutcome {
        fatal(self.expect_true(condition, what))
    }

    #[track_caller]
    pub fn assert_that<T, M>(&mut self, actual: &T, matcher: M) -> CaseOutcome
    where
        T: Debug + ?Sized,
        M: Matcher<T>,
    {
        fatal(self.expect_that(actual, matcher))
    }
}

fn fatal(passed: bool) -> CaseOutcome {
    if passed {
        Ok(())
    } else {
        Err(CaseError::AssertionAbort)
    }
}

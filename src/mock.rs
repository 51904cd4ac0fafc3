//! Recording test doubles.
//!
//! A [`MockRecorder`] sits inside a hand-written mock that implements the
//! capability trait under test. Every trait method records a [`Call`]
//! (`method`, rendered arguments, ordinal) and asks the recorder for its
//! return value. Expectations declared up front are checked by
//! [`MockRecorder::verify`] once the code under test has run.
//!
//! ```
//! use casework::mock::{MockRecorder, Times};
//!
//! let mock = MockRecorder::new("turtle");
//! mock.expect_call("pen_down").times(Times::AtLeast(1));
//! mock.record("pen_down", &[]);
//! assert!(mock.verify().is_ok());
//! ```

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::{self, Debug};

use tracing::trace;

use crate::diagnostics::{CaseworkError, ErrorContext};
use crate::verdict::{Checker, Failure, Location};

/// One recorded invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub method: &'static str,
    pub args: Vec<String>,
    pub ordinal: usize,
}

/// Allowed call count for an expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Times {
    Exactly(usize),
    AtLeast(usize),
    AtMost(usize),
    /// Inclusive bounds.
    Between(usize, usize),
}

impl Times {
    pub fn never() -> Self {
        Times::Exactly(0)
    }

    pub fn admits(&self, count: usize) -> bool {
        match *self {
            Times::Exactly(n) => count == n,
            Times::AtLeast(n) => count >= n,
            Times::AtMost(n) => count <= n,
            Times::Between(lo, hi) => lo <= count && count <= hi,
        }
    }
}

fn times_word(n: usize) -> String {
    match n {
        0 => "never".to_string(),
        1 => "once".to_string(),
        2 => "twice".to_string(),
        n => format!("{n} times"),
    }
}

impl fmt::Display for Times {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Times::Exactly(n) => write!(f, "{}", times_word(n)),
            Times::AtLeast(n) => write!(f, "at least {}", times_word(n)),
            Times::AtMost(n) => write!(f, "at most {}", times_word(n)),
            Times::Between(lo, hi) => write!(f, "between {lo} and {hi} times"),
        }
    }
}

#[derive(Debug, Clone)]
struct Expectation {
    method: &'static str,
    args: Option<Vec<String>>,
    times: Times,
    declared_at: Location,
}

impl Expectation {
    fn accepts(&self, call: &Call) -> bool {
        call.method == self.method && self.args.as_ref().map_or(true, |a| *a == call.args)
    }

    fn signature(&self) -> String {
        match &self.args {
            Some(args) => format!("{}({})", self.method, args.join(", ")),
            None => format!("{}(..)", self.method),
        }
    }
}

/// Call log, expectations and default return values for one mock object.
pub struct MockRecorder {
    name: String,
    calls: RefCell<Vec<Call>>,
    expectations: RefCell<Vec<Expectation>>,
    defaults: RefCell<HashMap<&'static str, Box<dyn Any>>>,
}

impl Debug for MockRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockRecorder")
            .field("name", &self.name)
            .field("calls", &self.calls.borrow())
            .field("expectations", &self.expectations.borrow())
            .finish()
    }
}

impl MockRecorder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            calls: RefCell::new(Vec::new()),
            expectations: RefCell::new(Vec::new()),
            defaults: RefCell::new(HashMap::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Appends a call to the log. Arguments are rendered with `Debug`.
    pub fn record(&self, method: &'static str, args: &[&dyn Debug]) {
        let mut calls = self.calls.borrow_mut();
        let call = Call {
            method,
            args: args.iter().map(|a| format!("{a:?}")).collect(),
            ordinal: calls.len(),
        };
        trace!(mock = %self.name, method, args = ?call.args, "mock call");
        calls.push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self, method: &str) -> usize {
        self.calls.borrow().iter().filter(|c| c.method == method).count()
    }

    /// Method names in call order.
    pub fn call_sequence(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|c| c.method).collect()
    }

    /// Declares that `method` must be called; once, unless `.times(..)` says
    /// otherwise.
    #[track_caller]
    pub fn expect_call(&self, method: &'static str) -> ExpectCall<'_> {
        let mut expectations = self.expectations.borrow_mut();
        expectations.push(Expectation {
            method,
            args: None,
            times: Times::Exactly(1),
            declared_at: Location::caller(),
        });
        ExpectCall {
            recorder: self,
            index: expectations.len() - 1,
        }
    }

    /// Configures what `method` returns when no test-specific value is given.
    pub fn on_call(&self, method: &'static str) -> OnCall<'_> {
        OnCall {
            recorder: self,
            method,
        }
    }

    pub fn default_return<R: Clone + 'static>(&self, method: &str) -> Option<R> {
        self.defaults
            .borrow()
            .get(method)
            .and_then(|v| v.downcast_ref::<R>())
            .cloned()
    }

    /// The configured default for `method`, else `fallback`.
    pub fn returns_or<R: Clone + 'static>(&self, method: &str, fallback: R) -> R {
        self.default_return(method).unwrap_or(fallback)
    }

    fn unmet(&self) -> Vec<(String, Location)> {
        let calls = self.calls.borrow();
        self.expectations
            .borrow()
            .iter()
            .filter_map(|e| {
                let count = calls.iter().filter(|c| e.accepts(c)).count();
                if e.times.admits(count) {
                    return None;
                }
                let message = format!(
                    "{}.{} expected to be called {}, actually called {}",
                    self.name,
                    e.signature(),
                    e.times,
                    times_word(count)
                );
                Some((message, e.declared_at.clone()))
            })
            .collect()
    }

    /// Checks every declared expectation against the call log.
    pub fn verify(&self) -> Result<(), CaseworkError> {
        let unmet: Vec<String> = self
            .unmet()
            .into_iter()
            .map(|(msg, loc)| format!("{msg} (declared at {loc})"))
            .collect();
        if unmet.is_empty() {
            return Ok(());
        }
        Err(CaseworkError::MockExpectation {
            unmet,
            ctx: ErrorContext::with_help("check the code under test calls the collaborator as declared"),
        })
    }

    /// Records every unmet expectation as a failure on `checker`.
    pub fn verify_into(&self, checker: &mut Checker) -> bool {
        let unmet = self.unmet();
        let ok = unmet.is_empty();
        for (message, location) in unmet {
            checker.record(Failure {
                message,
                expected: None,
                actual: None,
                location: Some(location),
            });
        }
        ok
    }
}

/// Builder returned by [`MockRecorder::expect_call`].
pub struct ExpectCall<'a> {
    recorder: &'a MockRecorder,
    index: usize,
}

impl ExpectCall<'_> {
    pub fn times(self, times: Times) -> Self {
        self.recorder.expectations.borrow_mut()[self.index].times = times;
        self
    }

    /// Restricts the expectation to calls with exactly these arguments.
    pub fn with_args(self, args: &[&dyn Debug]) -> Self {
        self.recorder.expectations.borrow_mut()[self.index].args =
            Some(args.iter().map(|a| format!("{a:?}")).collect());
        self
    }
}

/// Builder returned by [`MockRecorder::on_call`].
pub struct OnCall<'a> {
    recorder: &'a MockRecorder,
    method: &'static str,
}

impl OnCall<'_> {
    pub fn will_by_default<R: 'static>(self, value: R) {
        self.recorder
            .defaults
            .borrow_mut()
            .insert(self.method, Box::new(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn times_admits() {
        assert!(Times::AtLeast(1).admits(3));
        assert!(!Times::AtLeast(1).admits(0));
        assert!(Times::AtMost(2).admits(0));
        assert!(Times::Between(1, 2).admits(2));
        assert!(!Times::never().admits(1));
        assert_eq!(Times::AtLeast(1).to_string(), "at least once");
    }

    #[test]
    fn records_calls_with_ordinals() {
        let mock = MockRecorder::new("m");
        mock.record("go_to", &[&1, &2]);
        mock.record("pen_up", &[]);
        let calls = mock.calls();
        assert_eq!(calls[0].args, vec!["1", "2"]);
        assert_eq!(calls[1].ordinal, 1);
        assert_eq!(mock.call_sequence(), vec!["go_to", "pen_up"]);
    }

    #[test]
    fn unmet_expectation_reports_signature_and_counts() {
        let mock = MockRecorder::new("turtle");
        mock.expect_call("forward").with_args(&[&10]).times(Times::Exactly(2));
        mock.record("forward", &[&10]);
        mock.record("forward", &[&5]);
        let err = mock.verify().unwrap_err();
        let text = err.to_string();
        assert!(text.contains("turtle.forward(10) expected to be called twice, actually called once"));

        let mut checker = Checker::new();
        assert!(!mock.verify_into(&mut checker));
        assert_eq!(checker.failures().len(), 1);
    }

    #[test]
    fn defaults_are_typed() {
        let mock = MockRecorder::new("bank");
        mock.on_call("get_balance").will_by_default(1000_i64);
        assert_eq!(mock.default_return::<i64>("get_balance"), Some(1000));
        assert_eq!(mock.default_return::<i32>("get_balance"), None);
        assert!(!mock.returns_or("double_transaction", false));
    }
}

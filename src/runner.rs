//! Parametrized case runner.
//!
//! One body, many cases. Cases run one at a time in table order; every case
//! gets its own [`Checker`] (and fixture, when one is used). Assertion
//! failures, execution errors and panics inside a body are confined to that
//! case's [`CaseResult`]. Only an invalid table aborts the run, and it does so
//! before any case executes.

use std::any::Any;
use std::fmt::Debug;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::case::CaseTable;
use crate::config::RunnerConfig;
use crate::diagnostics::CaseworkError;
use crate::fixture::Fixture;
use crate::report::{CaseResult, Outcome, RunReport};
use crate::verdict::{CaseError, CaseOutcome, Checker};

/// Runs a body over a case table.
#[derive(Debug, Clone)]
pub struct CaseRunner {
    suite: String,
    config: RunnerConfig,
}

impl CaseRunner {
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            config: RunnerConfig::default(),
        }
    }

    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn suite(&self) -> &str {
        &self.suite
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Runs `body` once per case and returns one result per case, in order.
    pub fn run<V, F>(&self, table: &CaseTable<V>, body: F) -> Result<RunReport, CaseworkError>
    where
        V: Debug,
        F: Fn(&V, &mut Checker) -> CaseOutcome,
    {
        table.validate(self.config.duplicate_names)?;

        let only_mode = self.config.honor_only && table.has_only();
        let mut report = RunReport::new(self.suite.clone());

        for (ordinal, case) in table.iter().enumerate() {
            let name = table
                .effective_name(ordinal)
                .unwrap_or_else(|| crate::case::ordinal_name(ordinal));
            let value = format!("{:?}", case.value);

            let skip_reason = if case.skip {
                Some("marked skip".to_string())
            } else if only_mode && !case.only {
                Some("not marked only in only mode".to_string())
            } else {
                match &self.config.filter {
                    Some(f) if !name.contains(f.as_str()) => {
                        Some(format!("filtered out by substring: {f}"))
                    }
                    _ => None,
                }
            };
            if let Some(reason) = skip_reason {
                debug!(suite = %self.suite, case = %name, %reason, "skipping case");
                report.results.push(CaseResult {
                    ordinal,
                    name,
                    value,
                    outcome: Outcome::Skipped,
                    failures: vec![],
                    error: None,
                    skip_reason: Some(reason),
                    elapsed: Default::default(),
                });
                continue;
            }

            debug!(suite = %self.suite, case = %name, ordinal, "running case");
            let started = Instant::now();
            let mut checker = Checker::new();
            let returned =
                panic::catch_unwind(AssertUnwindSafe(|| body(&case.value, &mut checker)));
            let elapsed = started.elapsed();

            let (outcome, error) = match returned {
                Err(payload) => (Outcome::Errored, Some(panic_message(payload.as_ref()))),
                Ok(Err(CaseError::Execution(msg))) => (Outcome::Errored, Some(msg)),
                Ok(Err(CaseError::AssertionAbort)) => (Outcome::Failed, None),
                Ok(Ok(())) if checker.has_failures() => (Outcome::Failed, None),
                Ok(Ok(())) => (Outcome::Passed, None),
            };
            match outcome {
                Outcome::Errored => warn!(
                    suite = %self.suite,
                    case = %name,
                    error = error.as_deref().unwrap_or_default(),
                    "case errored"
                ),
                _ => debug!(suite = %self.suite, case = %name, ?outcome, "case finished"),
            }

            report.results.push(CaseResult {
                ordinal,
                name,
                value,
                outcome,
                failures: checker.into_failures(),
                error,
                skip_reason: None,
                elapsed,
            });
        }

        let summary = report.summary();
        info!(
            suite = %self.suite,
            total = summary.total(),
            passed = summary.passed,
            failed = summary.failed,
            errored = summary.errored,
            skipped = summary.skipped,
            "suite finished"
        );
        Ok(report)
    }

    /// Like [`run`](Self::run), with a fixture built fresh from each case.
    pub fn run_with_fixture<V, X, F>(
        &self,
        table: &CaseTable<V>,
        body: F,
    ) -> Result<RunReport, CaseworkError>
    where
        V: Debug,
        X: Fixture<V>,
        F: Fn(&mut X, &V, &mut Checker) -> CaseOutcome,
    {
        self.run(table, |value, checker| {
            let mut fixture = X::set_up(value);
            let outcome = body(&mut fixture, value, checker);
            fixture.tear_down();
            outcome
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panicked: {s}")
    } else {
        "panicked with a non-string payload".to_string()
    }
}

//! Per-case results and the ordered run report.

use std::time::Duration;

use serde::Serialize;

use crate::verdict::Failure;

/// Verdict of one case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    /// At least one assertion failed.
    Failed,
    /// The body panicked or returned an execution error.
    Errored,
    Skipped,
}

impl Outcome {
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Passed => "PASS",
            Outcome::Failed => "FAIL",
            Outcome::Errored => "ERROR",
            Outcome::Skipped => "SKIP",
        }
    }
}

/// Outcome of running the body against one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseResult {
    pub ordinal: usize,
    pub name: String,
    /// `Debug` rendering of the case value.
    pub value: String,
    pub outcome: Outcome,
    pub failures: Vec<Failure>,
    /// Panic payload or execution error, for errored cases.
    pub error: Option<String>,
    /// Why the case did not run, for skipped cases.
    pub skip_reason: Option<String>,
    #[serde(serialize_with = "serialize_millis")]
    pub elapsed: Duration,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(d.as_secs_f64() * 1000.0)
}

impl CaseResult {
    pub fn passed(&self) -> bool {
        self.outcome == Outcome::Passed
    }

    /// `suite/name`, or `suite/name#ordinal` when names alone are ambiguous.
    pub fn qualified_name(&self, suite: &str, disambiguate: bool) -> String {
        if disambiguate {
            format!("{suite}/{}#{}", self.name, self.ordinal)
        } else {
            format!("{suite}/{}", self.name)
        }
    }
}

/// Ordered results, one per case, in input order.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub suite: String,
    pub results: Vec<CaseResult>,
}

/// Aggregate counts over a report.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn has_failures(&self) -> bool {
        self.failed > 0 || self.errored > 0
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errored + self.skipped
    }

    /// Share of executed (non-skipped) cases that passed, in percent.
    pub fn success_rate(&self) -> f64 {
        let executed = self.total() - self.skipped;
        if executed == 0 {
            return 0.0;
        }
        (self.passed as f64 / executed as f64) * 100.0
    }

    pub fn merge(&mut self, other: Summary) {
        self.passed += other.passed;
        self.failed += other.failed;
        self.errored += other.errored;
        self.skipped += other.skipped;
    }
}

impl RunReport {
    pub fn new(suite: impl Into<String>) -> Self {
        Self {
            suite: suite.into(),
            results: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CaseResult> {
        self.results.iter()
    }

    pub fn summary(&self) -> Summary {
        let mut summary = Summary::default();
        for r in &self.results {
            match r.outcome {
                Outcome::Passed => summary.passed += 1,
                Outcome::Failed => summary.failed += 1,
                Outcome::Errored => summary.errored += 1,
                Outcome::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn all_passed(&self) -> bool {
        !self.summary().has_failures()
    }

    /// Failed and errored results, in order.
    pub fn failures(&self) -> impl Iterator<Item = &CaseResult> {
        self.results
            .iter()
            .filter(|r| matches!(r.outcome, Outcome::Failed | Outcome::Errored))
    }

    /// First result with this name; use the ordinal when names repeat.
    pub fn result_named(&self, name: &str) -> Option<&CaseResult> {
        self.results.iter().find(|r| r.name == name)
    }

    pub fn outcomes(&self) -> Vec<Outcome> {
        self.results.iter().map(|r| r.outcome).collect()
    }

    /// True when two results share a name.
    pub fn has_ambiguous_names(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.results.iter().any(|r| !seen.insert(r.name.as_str()))
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl<'a> IntoIterator for &'a RunReport {
    type Item = &'a CaseResult;
    type IntoIter = std::slice::Iter<'a, CaseResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

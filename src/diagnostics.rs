//! Unified, `miette`-based diagnostics for casework.
//!
//! Everything that can go wrong *outside* a single case body is a
//! [`CaseworkError`]: an invalid case table, an unreadable table file, an
//! unmet mock expectation. Problems *inside* a case body never become a
//! `CaseworkError`; the runner turns them into a failed or errored
//! [`CaseResult`](crate::report::CaseResult) instead.
//!
//! # Error Construction Macros
//!
//! - `err_msg!(Configuration, "duplicate case name '{}'", name)`
//! - `err_help!(Configuration, "invalid case name", "use [A-Za-z0-9_]")`
//!
//! Both build the variant with an empty [`ErrorContext`] unless help text is
//! given.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Type-safe error classification that corresponds to `CaseworkError` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorType {
    /// The case table itself is invalid (names, duplicates, empty patterns).
    Configuration,
    /// A case-table file could not be parsed.
    Table,
    /// Declared mock expectations were not met.
    Mock,
    /// Filesystem access failed.
    Io,
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::Configuration => "Configuration",
            ErrorType::Table => "Table",
            ErrorType::Mock => "Mock",
            ErrorType::Io => "Io",
        }
    }
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimal error context: an optional help message.
#[derive(Debug, Default, Clone)]
pub struct ErrorContext {
    pub help: Option<String>,
}

impl ErrorContext {
    pub fn none() -> Self {
        Self { help: None }
    }

    pub fn with_help(help: impl Into<String>) -> Self {
        Self {
            help: Some(help.into()),
        }
    }
}

/// Unified error type for everything that aborts a run or a verification.
#[derive(Debug, Error)]
pub enum CaseworkError {
    #[error("Configuration error: {message}")]
    Configuration { message: String, ctx: ErrorContext },
    #[error("Case table error in {}: {message}", path.display())]
    Table {
        message: String,
        path: PathBuf,
        ctx: ErrorContext,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
    },
    #[error("Mock expectations not met:\n{}", unmet.join("\n"))]
    MockExpectation { unmet: Vec<String>, ctx: ErrorContext },
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CaseworkError {
    pub fn error_type(&self) -> ErrorType {
        match self {
            CaseworkError::Configuration { .. } => ErrorType::Configuration,
            CaseworkError::Table { .. } => ErrorType::Table,
            CaseworkError::MockExpectation { .. } => ErrorType::Mock,
            CaseworkError::Io { .. } => ErrorType::Io,
        }
    }

    fn ctx(&self) -> Option<&ErrorContext> {
        match self {
            CaseworkError::Configuration { ctx, .. } => Some(ctx),
            CaseworkError::Table { ctx, .. } => Some(ctx),
            CaseworkError::MockExpectation { ctx, .. } => Some(ctx),
            CaseworkError::Io { .. } => None,
        }
    }

    /// Builds a table error that wraps the underlying parse failure.
    pub fn table(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        CaseworkError::Table {
            message: message.into(),
            path: path.into(),
            ctx: ErrorContext::with_help(
                "each row needs the case fields plus optional `name`, `skip` and `only` keys",
            ),
            source: Some(Box::new(source)),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CaseworkError::Io {
            path: path.into(),
            source,
        }
    }
}

impl Diagnostic for CaseworkError {
    fn code<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        let code = match self.error_type() {
            ErrorType::Configuration => "casework::config",
            ErrorType::Table => "casework::table",
            ErrorType::Mock => "casework::mock",
            ErrorType::Io => "casework::io",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn std::fmt::Display + 'a>> {
        self.ctx()
            .and_then(|ctx| ctx.help.as_ref())
            .map(|h| Box::new(h) as Box<dyn std::fmt::Display + 'a>)
    }
}

/// Constructs a `CaseworkError` variant with a formatted message and no help.
#[macro_export]
macro_rules! err_msg {
    ($variant:ident, $msg:expr, $($arg:expr),+ $(,)?) => {
        $crate::CaseworkError::$variant {
            message: format!($msg, $($arg),+),
            ctx: $crate::ErrorContext::none(),
        }
    };
    ($variant:ident, $msg:expr) => {
        $crate::CaseworkError::$variant {
            message: format!("{}", $msg),
            ctx: $crate::ErrorContext::none(),
        }
    };
}

/// Constructs a `CaseworkError` variant with a message and a help line.
#[macro_export]
macro_rules! err_help {
    ($variant:ident, $msg:expr, $help:expr) => {
        $crate::CaseworkError::$variant {
            message: $msg.to_string(),
            ctx: $crate::ErrorContext::with_help($help),
        }
    };
}

#[cfg(test)]
mod diagnostics_tests {
    use miette::Report;

    use super::*;

    #[test]
    fn test_help_is_rendered() {
        let err = err_help!(
            Configuration,
            "invalid case name 'a b'",
            "case names may only contain [A-Za-z0-9_]"
        );
        assert_eq!(err.error_type(), ErrorType::Configuration);
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("invalid case name"));
        assert!(output.contains("[A-Za-z0-9_]"));
    }

    #[test]
    fn test_error_chaining() {
        let cause = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad row");
        let err = CaseworkError::table("tests/cases/bank.yaml", "could not parse rows", cause);
        let output = format!("{:?}", Report::new(err));
        assert!(output.contains("bank.yaml"));
        assert!(output.contains("bad row"));
    }

    #[test]
    fn test_mock_lists_every_unmet_expectation() {
        let err = CaseworkError::MockExpectation {
            unmet: vec!["pen_down".into(), "forward".into()],
            ctx: ErrorContext::none(),
        };
        let text = err.to_string();
        assert!(text.contains("pen_down"));
        assert!(text.contains("forward"));
        assert_eq!(err.error_type().to_string(), "Mock");
    }
}

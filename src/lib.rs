//! Table-driven test cases with isolated execution.
//!
//! A [`CaseRunner`] runs one body over every case of a [`CaseTable`] and
//! returns a [`RunReport`] with one [`CaseResult`] per case, in table order.
//! Around that core sit composable [`matchers`], recording [`mock`] objects,
//! per-case [`Fixture`]s and [`typed_cases!`] for running one body against
//! several implementations of a trait.
//!
//! ```
//! use casework::{CaseRunner, CaseTable};
//! use casework::toys::bank::{standard_cases, withdraw_body, AccountFixture};
//!
//! let table = CaseTable::named(standard_cases());
//! let report = CaseRunner::new("bank_account")
//!     .run_with_fixture::<_, AccountFixture, _>(&table, withdraw_body)
//!     .unwrap();
//! assert_eq!(report.len(), 3);
//! assert!(report.all_passed());
//! ```

pub use crate::case::{Case, CaseInfo, CaseTable};
pub use crate::config::{DuplicateNames, RenderConfig, RunnerConfig};
pub use crate::diagnostics::{CaseworkError, ErrorContext, ErrorType};
pub use crate::fixture::{Fixture, Fresh};
pub use crate::report::{CaseResult, Outcome, RunReport, Summary};
pub use crate::runner::CaseRunner;
pub use crate::verdict::{CaseError, CaseOutcome, Checker, Failure, Location};

pub mod case;
pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod fixture;
pub mod matchers;
pub mod mock;
pub mod render;
pub mod report;
pub mod runner;
pub mod table;
pub mod toys;
pub mod typed;
pub mod verdict;

//! Deliberately small domain code for the runner, matchers and mocks to work on.

pub mod answer;
pub mod atm;
pub mod bank;
pub mod turtle;

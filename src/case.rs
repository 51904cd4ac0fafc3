//! Cases, case tables and case naming.
//!
//! A [`CaseTable`] is the ordered input of one parametrized run. Each entry
//! keeps its insertion position (its *ordinal*), which is the stable fallback
//! identity when a case has no explicit name.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DuplicateNames;
use crate::diagnostics::CaseworkError;
use crate::{err_help, err_msg};

static VALID_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid regex"));

/// One input/expected-output data point driving a single execution of a body.
#[derive(Debug, Clone, PartialEq)]
pub struct Case<V> {
    pub name: Option<String>,
    pub value: V,
    pub skip: bool,
    pub only: bool,
}

impl<V> Case<V> {
    pub fn new(value: V) -> Self {
        Self {
            name: None,
            value,
            skip: false,
            only: false,
        }
    }

    pub fn named(name: impl Into<String>, value: V) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::new(value)
        }
    }

    pub fn skipped(mut self) -> Self {
        self.skip = true;
        self
    }

    pub fn only(mut self) -> Self {
        self.only = true;
        self
    }
}

/// Information handed to a name generator.
#[derive(Debug)]
pub struct CaseInfo<'a, V> {
    pub index: usize,
    pub value: &'a V,
}

/// Derived name used when a case has no explicit label.
pub fn ordinal_name(index: usize) -> String {
    format!("case_{index}")
}

type NameGenerator<V> = Box<dyn Fn(&CaseInfo<'_, V>) -> String>;

/// Ordered collection of cases, plus an optional name generator for unnamed ones.
pub struct CaseTable<V> {
    cases: Vec<Case<V>>,
    name_generator: Option<NameGenerator<V>>,
}

impl<V> Default for CaseTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for CaseTable<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaseTable")
            .field("cases", &self.cases)
            .field("name_generator", &self.name_generator.is_some())
            .finish()
    }
}

impl<V> CaseTable<V> {
    pub fn new() -> Self {
        Self {
            cases: Vec::new(),
            name_generator: None,
        }
    }

    /// Builds a table of unnamed cases, in iteration order.
    pub fn values<I: IntoIterator<Item = V>>(values: I) -> Self {
        values.into_iter().map(Case::new).collect()
    }

    /// Builds a table of named cases, in iteration order.
    pub fn named<S, I>(pairs: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, V)>,
    {
        pairs
            .into_iter()
            .map(|(name, value)| Case::named(name, value))
            .collect()
    }

    pub fn push(&mut self, case: Case<V>) -> &mut Self {
        self.cases.push(case);
        self
    }

    pub fn with(mut self, case: Case<V>) -> Self {
        self.cases.push(case);
        self
    }

    /// Replaces the ordinal derivation for cases without an explicit name.
    pub fn name_with<F>(mut self, generator: F) -> Self
    where
        F: Fn(&CaseInfo<'_, V>) -> String + 'static,
    {
        self.name_generator = Some(Box::new(generator));
        self
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Case<V>> {
        self.cases.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Case<V>> {
        self.cases.get(index)
    }

    pub fn has_only(&self) -> bool {
        self.cases.iter().any(|c| c.only)
    }

    /// Effective name of the case at `index`: explicit, generated, or ordinal.
    pub fn effective_name(&self, index: usize) -> Option<String> {
        let case = self.cases.get(index)?;
        if let Some(name) = &case.name {
            return Some(name.clone());
        }
        let info = CaseInfo {
            index,
            value: &case.value,
        };
        Some(match &self.name_generator {
            Some(generate) => generate(&info),
            None => ordinal_name(index),
        })
    }

    pub fn effective_names(&self) -> Vec<String> {
        (0..self.cases.len())
            .filter_map(|i| self.effective_name(i))
            .collect()
    }

    /// Checks the table before any case runs.
    ///
    /// Explicit and generated names must be non-empty identifiers. Duplicate
    /// names are rejected only under [`DuplicateNames::Reject`].
    pub fn validate(&self, policy: DuplicateNames) -> Result<(), CaseworkError> {
        let names = self.effective_names();
        for (index, name) in names.iter().enumerate() {
            if !VALID_NAME.is_match(name) {
                return Err(err_help!(
                    Configuration,
                    format!("invalid name {name:?} for case #{index}"),
                    "case names may only contain ASCII letters, digits and '_'"
                ));
            }
        }

        if policy == DuplicateNames::Reject {
            let mut seen: HashMap<&str, usize> = HashMap::new();
            for (index, name) in names.iter().enumerate() {
                if let Some(first) = seen.insert(name.as_str(), index) {
                    return Err(err_msg!(
                        Configuration,
                        "duplicate case name '{}' (cases #{} and #{})",
                        name,
                        first,
                        index
                    ));
                }
            }
        }
        Ok(())
    }
}

impl<V> FromIterator<Case<V>> for CaseTable<V> {
    fn from_iter<I: IntoIterator<Item = Case<V>>>(iter: I) -> Self {
        Self {
            cases: iter.into_iter().collect(),
            name_generator: None,
        }
    }
}

impl<'a, V> IntoIterator for &'a CaseTable<V> {
    type Item = &'a Case<V>;
    type IntoIter = std::slice::Iter<'a, Case<V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cases.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_names_depend_only_on_ordinal() {
        let a = CaseTable::values([10, 20, 30]);
        let b = CaseTable::values([99, 98, 97]);
        assert_eq!(a.effective_names(), vec!["case_0", "case_1", "case_2"]);
        assert_eq!(a.effective_names(), b.effective_names());
        assert_eq!(a.effective_names(), a.effective_names());
    }

    #[test]
    fn explicit_names_win_over_generator() {
        let table = CaseTable::new()
            .with(Case::named("Explicit", 1))
            .with(Case::new(2))
            .name_with(|info| format!("value_{}", info.value));
        assert_eq!(table.effective_names(), vec!["Explicit", "value_2"]);
    }

    #[test]
    fn duplicates_allowed_by_default() {
        let table = CaseTable::named([("same", 1), ("same", 2)]);
        assert!(table.validate(DuplicateNames::Allow).is_ok());
        let err = table.validate(DuplicateNames::Reject).unwrap_err();
        assert!(err.to_string().contains("duplicate case name 'same'"));
    }

    #[test]
    fn invalid_names_are_configuration_errors() {
        for bad in ["", "has space", "dash-ed"] {
            let table = CaseTable::named([(bad, 0)]);
            let err = table.validate(DuplicateNames::Allow).unwrap_err();
            assert_eq!(err.error_type(), crate::ErrorType::Configuration);
        }
    }

    #[test]
    fn only_flag_is_detected() {
        let table = CaseTable::new().with(Case::new(1)).with(Case::new(2).only());
        assert!(table.has_only());
        assert!(!CaseTable::values([1]).has_only());
    }
}

//! String matchers.

use regex::Regex;

use super::{Explanation, Matcher};
use crate::diagnostics::CaseworkError;
use crate::err_help;

#[derive(Debug, Clone)]
pub struct StartsWith(String);

pub fn starts_with(prefix: impl Into<String>) -> StartsWith {
    StartsWith(prefix.into())
}

impl<S: AsRef<str> + ?Sized> Matcher<S> for StartsWith {
    fn matches(&self, actual: &S, _listener: &mut Explanation) -> bool {
        actual.as_ref().starts_with(&self.0)
    }

    fn describe(&self, negated: bool) -> String {
        format!(
            "{} with {:?}",
            if negated { "doesn't start" } else { "starts" },
            self.0
        )
    }
}

#[derive(Debug, Clone)]
pub struct ContainsStr(String);

pub fn contains_str(needle: impl Into<String>) -> ContainsStr {
    ContainsStr(needle.into())
}

impl<S: AsRef<str> + ?Sized> Matcher<S> for ContainsStr {
    fn matches(&self, actual: &S, _listener: &mut Explanation) -> bool {
        actual.as_ref().contains(&self.0)
    }

    fn describe(&self, negated: bool) -> String {
        format!(
            "{} {:?}",
            if negated { "doesn't contain" } else { "contains" },
            self.0
        )
    }
}

/// Matches when the whole string matches the pattern.
#[derive(Debug, Clone)]
pub struct MatchesRegex {
    pattern: String,
    anchored: Regex,
}

/// Builds a full-match regex matcher. An invalid pattern is a configuration
/// error, reported before any value is checked.
pub fn matches_regex(pattern: &str) -> Result<MatchesRegex, CaseworkError> {
    let anchored = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
        err_help!(
            Configuration,
            format!("invalid regex {pattern:?}: {e}"),
            "patterns use the `regex` crate syntax"
        )
    })?;
    Ok(MatchesRegex {
        pattern: pattern.to_string(),
        anchored,
    })
}

impl<S: AsRef<str> + ?Sized> Matcher<S> for MatchesRegex {
    fn matches(&self, actual: &S, _listener: &mut Explanation) -> bool {
        self.anchored.is_match(actual.as_ref())
    }

    fn describe(&self, negated: bool) -> String {
        format!(
            "{} regular expression {:?}",
            if negated { "doesn't match" } else { "matches" },
            self.pattern
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matchers::check;

    const TEXT: &str = "Hello, this as a test string. We are here to help!";

    #[test]
    fn prefix_and_regex() {
        assert!(check(TEXT, &starts_with("Hello")).is_ok());
        assert!(check(&TEXT.to_string(), &starts_with("Hello")).is_ok());
        let re = matches_regex(".*is.*help.*").unwrap();
        assert!(check(TEXT, &re).is_ok());
    }

    #[test]
    fn regex_must_match_whole_string() {
        let re = matches_regex("is").unwrap();
        assert!(check(TEXT, &re).is_err());
        assert!(check("is", &re).is_ok());
    }

    #[test]
    fn invalid_regex_is_configuration_error() {
        let err = matches_regex("(unclosed").unwrap_err();
        assert_eq!(err.error_type(), crate::ErrorType::Configuration);
    }

    #[test]
    fn contains_description() {
        assert_eq!(
            Matcher::<str>::describe(&contains_str("abc"), false),
            "contains \"abc\""
        );
        assert!(check("xxabcxx", &contains_str("abc")).is_ok());
    }
}

//! Runner and rendering configuration.

/// What to do when two cases in one table share an effective name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateNames {
    /// Keep both; the ordinal disambiguates in the report.
    #[default]
    Allow,
    /// Abort the run with a configuration error before any case executes.
    Reject,
}

/// Configuration for case selection and registration checks.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Only cases whose effective name contains this substring run.
    pub filter: Option<String>,
    pub duplicate_names: DuplicateNames,
    /// When any case is marked `only`, every other case is skipped.
    pub honor_only: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            filter: None,
            duplicate_names: DuplicateNames::Allow,
            honor_only: true,
        }
    }
}

impl RunnerConfig {
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn rejecting_duplicates(mut self) -> Self {
        self.duplicate_names = DuplicateNames::Reject;
        self
    }
}

/// Configuration for terminal output.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub use_colors: bool,
    /// Print passing cases too, not only the summary and failures.
    pub verbose: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            use_colors: atty::is(atty::Stream::Stdout),
            verbose: true,
        }
    }
}

//! Expander configuration.

/// Default bound on processed edges per expansion.
pub const DEFAULT_MAX_ITERATIONS: usize = 1_000_000;

/// Configuration for an [`Expander`](crate::Expander).
///
/// # Example
///
/// ```
/// use ottr_expander::ExpanderConfig;
///
/// let config = ExpanderConfig::new()
///     .with_check_arguments(false)
///     .with_max_iterations(10_000);
/// assert!(!config.check_arguments());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpanderConfig {
    max_iterations: usize,
    check_arguments: bool,
    fetch_missing: bool,
}

impl ExpanderConfig {
    pub fn new() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            check_arguments: true,
            fetch_missing: false,
        }
    }

    /// Bound the number of edges one expansion processes. Zero is treated
    /// as one.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max.max(1);
        self
    }

    /// Check argument types and non-blank flags of top-level instances.
    pub fn with_check_arguments(mut self, check: bool) -> Self {
        self.check_arguments = check;
        self
    }

    /// Fetch missing dependencies before expanding; see
    /// [`Expander::fetching`](crate::Expander::fetching).
    pub fn with_fetch_missing(mut self, fetch: bool) -> Self {
        self.fetch_missing = fetch;
        self
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    pub fn check_arguments(&self) -> bool {
        self.check_arguments
    }

    pub fn fetch_missing(&self) -> bool {
        self.fetch_missing
    }
}

impl Default for ExpanderConfig {
    fn default() -> Self {
        Self::new()
    }
}

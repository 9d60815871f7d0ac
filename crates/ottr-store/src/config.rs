//! Store configuration.

/// Default cap on rounds of [`fetch_missing_dependencies`].
///
/// [`fetch_missing_dependencies`]: crate::TemplateStore::fetch_missing_dependencies
pub const DEFAULT_MAX_FETCH_ROUNDS: usize = 64;

/// Configuration for a [`TemplateStore`](crate::TemplateStore).
///
/// # Example
///
/// ```
/// use ottr_store::{StoreConfig, TemplateStore};
///
/// let config = StoreConfig::new().with_max_fetch_rounds(4);
/// let store = TemplateStore::with_config(config);
/// assert_eq!(store.config().max_fetch_rounds(), 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    max_fetch_rounds: usize,
    fetch_from_standard_library: bool,
}

impl StoreConfig {
    pub fn new() -> Self {
        Self {
            max_fetch_rounds: DEFAULT_MAX_FETCH_ROUNDS,
            fetch_from_standard_library: true,
        }
    }

    /// Bound the fetch fixpoint loop. Zero is treated as one round.
    pub fn with_max_fetch_rounds(mut self, rounds: usize) -> Self {
        self.max_fetch_rounds = rounds.max(1);
        self
    }

    /// Whether a registered standard library is consulted before the reader.
    pub fn with_standard_library(mut self, enabled: bool) -> Self {
        self.fetch_from_standard_library = enabled;
        self
    }

    pub fn max_fetch_rounds(&self) -> usize {
        self.max_fetch_rounds
    }

    pub fn fetch_from_standard_library(&self) -> bool {
        self.fetch_from_standard_library
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new()
    }
}

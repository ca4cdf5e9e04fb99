//! Options for [`pack_with`](crate::pack_with).

use cbf_core::Colors;

/// Packing options. None of them change the bytes written.
#[derive(Clone, Debug)]
pub struct Config {
    /// Log the full layout dump at `info` level
    pub(crate) verbose: bool,
    /// Color configuration for the dump
    pub(crate) colors: Colors,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            colors: Colors::OFF,
        }
    }
}

impl Config {
    /// Create a new Config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether to log the layout dump.
    pub fn verbose(mut self, value: bool) -> Self {
        self.verbose = value;
        self
    }

    /// Set whether to use colored output.
    pub fn colored(mut self, enabled: bool) -> Self {
        self.colors = Colors::new(enabled);
        self
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    pub fn colors(&self) -> Colors {
        self.colors
    }
}

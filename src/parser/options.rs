//! Parsing options and configuration.

/// Options for parsing Word documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Error handling mode
    pub error_mode: ErrorMode,

    /// Repeat merged cell content into every grid position it covers.
    ///
    /// Rendering pairs headers and values by column index, which only
    /// stays aligned when merged cells are duplicated.
    pub duplicate_merged_cells: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set error mode.
    pub fn with_error_mode(mut self, mode: ErrorMode) -> Self {
        self.error_mode = mode;
        self
    }

    /// Enable lenient mode (keep content read before an XML error).
    pub fn lenient(mut self) -> Self {
        self.error_mode = ErrorMode::Lenient;
        self
    }

    /// Enable or disable merged cell duplication.
    pub fn with_duplicate_merged_cells(mut self, duplicate: bool) -> Self {
        self.duplicate_merged_cells = duplicate;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            error_mode: ErrorMode::Strict,
            duplicate_merged_cells: true,
        }
    }
}

/// Error handling mode during parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorMode {
    /// Fail on any error
    #[default]
    Strict,
    /// Stop at the first XML error and keep what was read
    Lenient,
}

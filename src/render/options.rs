//! Rendering options and configuration.

use super::{CleanupOptions, CleanupPreset};

/// Border line drawn above and below every table record.
pub const DEFAULT_TABLE_BORDER: &str = "--------------------";

/// Marker joining the lines of a multi-paragraph cell.
pub const DEFAULT_LINE_BREAK: &str = "<br>";

/// Separator between stacked header rows in a combined header.
pub const DEFAULT_HEADER_SEPARATOR: &str = " _ ";

/// Options for rendering document content.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Line placed before and after each record's `header: value` lines
    pub table_border: String,

    /// Joins the paragraphs of one cell into a single value
    pub line_break: String,

    /// Joins a header with the cell below it when headers are combined
    pub header_separator: String,

    /// Placed between output paragraphs in text output
    pub paragraph_separator: String,

    /// What to do with a table whose headers never become unique
    pub on_malformed_table: MalformedTable,

    /// Text cleanup options (None = emit text verbatim)
    pub cleanup: Option<CleanupOptions>,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record border line.
    pub fn with_table_border(mut self, border: impl Into<String>) -> Self {
        self.table_border = border.into();
        self
    }

    /// Set the cell line-break marker.
    pub fn with_line_break(mut self, marker: impl Into<String>) -> Self {
        self.line_break = marker.into();
        self
    }

    /// Set the combined-header separator.
    pub fn with_header_separator(mut self, separator: impl Into<String>) -> Self {
        self.header_separator = separator.into();
        self
    }

    /// Set the separator placed between output paragraphs.
    pub fn with_paragraph_separator(mut self, separator: impl Into<String>) -> Self {
        self.paragraph_separator = separator.into();
        self
    }

    /// Set malformed table handling.
    pub fn with_malformed_tables(mut self, mode: MalformedTable) -> Self {
        self.on_malformed_table = mode;
        self
    }

    /// Skip tables whose headers cannot be made unique.
    pub fn skip_malformed_tables(mut self) -> Self {
        self.on_malformed_table = MalformedTable::Skip;
        self
    }

    /// Set cleanup options.
    pub fn with_cleanup(mut self, cleanup: CleanupOptions) -> Self {
        self.cleanup = Some(cleanup);
        self
    }

    /// Set cleanup preset.
    pub fn with_cleanup_preset(mut self, preset: CleanupPreset) -> Self {
        self.cleanup = Some(CleanupOptions::from_preset(preset));
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            table_border: DEFAULT_TABLE_BORDER.to_string(),
            line_break: DEFAULT_LINE_BREAK.to_string(),
            header_separator: DEFAULT_HEADER_SEPARATOR.to_string(),
            paragraph_separator: "\n\n".to_string(),
            on_malformed_table: MalformedTable::Fail,
            cleanup: None,
        }
    }
}

/// Handling of tables whose header rows never become unique per column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedTable {
    /// Fail the whole extraction
    #[default]
    Fail,
    /// Log a warning, drop the table, and continue
    Skip,
}

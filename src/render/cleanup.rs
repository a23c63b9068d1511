//! Optional text cleanup applied to rendered lines.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Minimal cleanup: Unicode NFC normalization and trailing whitespace
    Minimal,
    /// Standard cleanup: minimal + symbol removal + space collapsing
    #[default]
    Standard,
}

/// Options for text cleanup.
#[derive(Debug, Clone)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Remove Private Use Area (PUA) characters (symbol-font glyphs)
    pub remove_pua: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Collapse runs of spaces into one
    pub collapse_spaces: bool,

    /// Trim trailing whitespace from every line
    pub trim_line_ends: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            remove_pua: false,
            remove_replacement_char: false,
            collapse_spaces: false,
            trim_line_ends: true,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            normalize_unicode: true,
            remove_pua: true,
            remove_replacement_char: true,
            collapse_spaces: true,
            trim_line_ends: true,
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Text cleanup pipeline.
pub struct CleanupPipeline {
    options: CleanupOptions,
    spaces_regex: Regex,
    line_end_regex: Regex,
}

impl CleanupPipeline {
    /// Create a new cleanup pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            spaces_regex: Regex::new(r" {2,}").expect("static pattern"),
            line_end_regex: Regex::new(r"(?m)[ \t]+$").expect("static pattern"),
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Process text through the cleanup pipeline.
    pub fn process(&self, text: &str) -> String {
        let mut result = if self.options.normalize_unicode {
            text.nfc().collect()
        } else {
            text.to_string()
        };

        if self.options.remove_pua {
            result = result.chars().filter(|c| !is_private_use(*c)).collect();
        }

        if self.options.remove_replacement_char {
            result = result.replace('\u{FFFD}', "");
        }

        if self.options.collapse_spaces {
            result = self.spaces_regex.replace_all(&result, " ").into_owned();
        }

        if self.options.trim_line_ends {
            result = self.line_end_regex.replace_all(&result, "").into_owned();
        }

        result
    }
}

impl Default for CleanupPipeline {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unicode_normalization() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        let decomposed = "cafe\u{301}";
        assert_eq!(pipeline.process(decomposed), "caf\u{e9}");
    }

    #[test]
    fn test_minimal_keeps_symbols_and_spaces() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Minimal);
        assert_eq!(pipeline.process("a  \u{F0B7} b   "), "a  \u{F0B7} b");
    }

    #[test]
    fn test_standard_removes_pua_and_replacement() {
        let pipeline = CleanupPipeline::from_preset(CleanupPreset::Standard);
        assert_eq!(pipeline.process("\u{F0B7}Item\u{FFFD}"), "Item");
    }

    #[test]
    fn test_collapse_spaces_and_trim_lines() {
        let pipeline = CleanupPipeline::default();
        let text = "A:   1  \nB:\t2\t\n";
        assert_eq!(pipeline.process(text), "A: 1\nB:\t2\n");
    }
}

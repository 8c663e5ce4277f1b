//! Unparser configuration

/// Layout options for generated model text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnparseOptions {
    /// Number of spaces per indentation level (ignored when using tabs)
    pub indent_width: usize,
    /// Use spaces for indentation (false = use tabs)
    pub insert_spaces: bool,
    /// Separate definitions and sections with blank lines
    pub blank_lines: bool,
}

impl Default for UnparseOptions {
    fn default() -> Self {
        Self {
            indent_width: 2,
            insert_spaces: true,
            blank_lines: true,
        }
    }
}

impl UnparseOptions {
    /// Generate indentation string for the given level
    pub fn indent(&self, level: usize) -> String {
        if self.insert_spaces {
            " ".repeat(self.indent_width * level)
        } else {
            "\t".repeat(level)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_indent() {
        let options = UnparseOptions::default();
        assert_eq!(options.indent(0), "");
        assert_eq!(options.indent(2), "    ");
    }

    #[test]
    fn test_tab_indent() {
        let options = UnparseOptions {
            insert_spaces: false,
            ..UnparseOptions::default()
        };
        assert_eq!(options.indent(3), "\t\t\t");
    }
}

use vbs_scanner::ScanMode;

/// How markup outside `<% %>` is emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// Markup is copied verbatim between `%>` and `<%`.
    #[default]
    Normal,
    /// Markup is rewritten into print statements inside one code block.
    Rewrite,
}

/// Formatter configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatOptions {
    pub output: OutputMode,
    /// Mode the scanner starts in: `Markup` for pages, `Code` for bare script.
    pub initial_mode: ScanMode,
    /// Statement markup is rewritten into (rewrite mode).
    pub print_statement: String,
    /// Expression joining rewritten markup lines (rewrite mode).
    pub line_join: String,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            output: OutputMode::Normal,
            initial_mode: ScanMode::Markup,
            print_statement: "Response.Write".into(),
            line_join: "vbCrLf".into(),
        }
    }
}

impl FormatOptions {
    pub fn rewrite() -> Self {
        Self {
            output: OutputMode::Rewrite,
            ..Self::default()
        }
    }

    pub fn is_rewrite(&self) -> bool {
        self.output == OutputMode::Rewrite
    }
}

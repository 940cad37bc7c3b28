//! VBScript Formatter
//!
//! Re-emits classic ASP source with canonical casing, canonical spacing and
//! one tab per block level. In rewrite mode every markup chunk becomes a
//! print statement, so the whole page turns into a single code block.
//!
//! ```text
//! source → Lexer → Formatter → formatted text
//! ```

pub mod formatter;
pub mod options;
pub mod state;

pub use formatter::Formatter;
pub use options::{FormatOptions, OutputMode};
pub use state::{FormatterState, Lookback};

use vbs_lexer::LexError;

/// Format one source file.
pub fn format(source: &str, options: &FormatOptions) -> Result<String, LexError> {
    Formatter::new(source, options).run()
}

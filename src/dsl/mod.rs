//! Desktopfile language front end.
//!
//! A Desktopfile declares one or more named variants:
//!
//! ```text
//! configuration :default do
//!   env 'EDITOR', 'vim'
//!   alias_cmd 'gs', 'git status'
//!   echo 'ready'
//!   cmd 'source .venv/bin/activate'
//!   os :linux do
//!     env 'BROWSER', 'firefox'
//!   end
//! end
//! ```
//!
//! Source text is tokenized and parsed into an [`ast::Document`]. Nothing is
//! executed here; interpretation happens in [`crate::environment`].

pub mod ast;
mod lexer;
mod parser;

use std::fmt;

/// 1-based source position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A positioned error before the source file is known
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub span: Span,
    pub message: String,
}

impl SyntaxError {
    pub fn new(span: Span, message: impl Into<String>) -> Self {
        Self {
            span,
            message: message.into(),
        }
    }

    pub fn with_origin(self, origin: &str) -> DslError {
        DslError {
            origin: origin.to_string(),
            line: self.span.line,
            column: self.span.column,
            message: self.message,
        }
    }
}

/// A Desktopfile could not be parsed or evaluated
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{origin}:{line}:{column}: {message}")]
pub struct DslError {
    /// Where the source came from, usually the Desktopfile path
    pub origin: String,
    pub line: usize,
    pub column: usize,
    pub message: String,
}

/// Parse Desktopfile source text. `origin` names the source in errors.
pub fn parse(source: &str, origin: &str) -> Result<ast::Document, DslError> {
    let tokens = lexer::tokenize(source).map_err(|e| e.with_origin(origin))?;
    parser::Parser::new(tokens)
        .parse_document()
        .map_err(|e| e.with_origin(origin))
}

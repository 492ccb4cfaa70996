use crate::logging::codes;
use std::fmt;
use thiserror::Error;

/// Recoverable lexical errors. The scanner records them and keeps going.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexerError {
    #[error("Unexpected character.")]
    UnexpectedCharacter { character: char },

    #[error("Unterminated string.")]
    UnterminatedString,
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::UnexpectedCharacter { .. } => codes::lexical::UNEXPECTED_CHARACTER,
            LexerError::UnterminatedString => codes::lexical::UNTERMINATED_STRING,
        }
    }
}

/// A lexical error paired with the line it was detected on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub line: usize,
    pub error: LexerError,
}

impl Diagnostic {
    pub fn new(line: usize, error: LexerError) -> Self {
        Self { line, error }
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn error_code(&self) -> crate::logging::Code {
        self.error.error_code()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[line {}] Error: {}", self.line, self.error)
    }
}

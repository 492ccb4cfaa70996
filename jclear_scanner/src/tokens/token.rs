//! Token record emitted by the scanner

use super::token_type::TokenType;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Decoded value carried by STRING and NUMBER tokens
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    String(String),
}

impl Literal {
    /// True when the rendered value is empty, i.e. the empty string literal
    pub fn is_empty(&self) -> bool {
        matches!(self, Literal::String(s) if s.is_empty())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Integral values keep a trailing `.0`
            Literal::Number(n) => write!(f, "{:?}", n),
            Literal::String(s) => f.write_str(s),
        }
    }
}

/// Immutable token. Fields are private so a token cannot change after the
/// scanner builds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    #[serde(rename = "type")]
    token_type: TokenType,
    lexeme: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    literal: Option<Literal>,
    line: usize,
}

impl Token {
    pub fn new(
        token_type: TokenType,
        lexeme: impl Into<String>,
        literal: Option<Literal>,
        line: usize,
    ) -> Self {
        Self {
            token_type,
            lexeme: lexeme.into(),
            literal,
            line,
        }
    }

    pub fn eof(line: usize) -> Self {
        Self::new(TokenType::Eof, "", None, line)
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn lexeme(&self) -> &str {
        &self.lexeme
    }

    pub fn literal(&self) -> Option<&Literal> {
        self.literal.as_ref()
    }

    pub fn line(&self) -> usize {
        self.line
    }

    pub fn is_eof(&self) -> bool {
        self.token_type == TokenType::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[TYPE: {}] '{}'", self.token_type, self.lexeme)?;

        match &self.literal {
            Some(literal) if !literal.is_empty() => write!(f, " :: [LITERAL: '{}']", literal),
            _ => Ok(()),
        }
    }
}

//! Token system for JClear lexical analysis
//!
//! - [`TokenType`] is the closed set of lexical categories, grouped by [`TokenClass`].
//! - [`Token`] is the immutable record the scanner emits: type, lexeme, optional
//!   [`Literal`] and the 1-based source line.
//!
//! Tokens render in the console form `[TYPE: NAME] 'lexeme'`, with a
//! ` :: [LITERAL: 'value']` suffix when a non-empty literal is present. They
//! serialize to JSON objects with `type`, `lexeme`, `literal` and `line` keys.

mod token;
mod token_type;

pub use token::{Literal, Token};
pub use token_type::{TokenClass, TokenType};

//! Lexical analysis for JClear source text
//!
//! Turns a complete source string into tokens plus recoverable diagnostics.
//! The scanner never aborts: unexpected characters and unterminated strings
//! are recorded and scanning resumes.

pub mod error;
pub mod keywords;
pub mod metrics;
pub mod scanner;

use crate::config::runtime::LexicalPreferences;
use crate::tokens::{Token, TokenType};
use std::collections::HashMap;

pub use error::{Diagnostic, LexerError};
pub use metrics::LexicalMetrics;
pub use scanner::{ScanResult, Scanner};

/// Scan with preferences taken from the environment
pub fn scan(source: &str) -> ScanResult {
    Scanner::new(source).scan_tokens()
}

pub fn scan_with_preferences(source: &str, preferences: LexicalPreferences) -> ScanResult {
    Scanner::with_preferences(source, preferences).scan_tokens()
}

pub fn create_scanner(source: &str) -> Scanner<'_> {
    Scanner::new(source)
}

pub fn create_scanner_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> Scanner<'_> {
    Scanner::with_preferences(source, preferences)
}

/// Occurrences of each token type
pub fn get_token_counts(tokens: &[Token]) -> HashMap<TokenType, usize> {
    let mut counts = HashMap::new();
    for token in tokens {
        *counts.entry(token.token_type()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_entry_points_agree() {
        let source = "print 1 + 2;";
        let preferences = LexicalPreferences {
            collect_detailed_metrics: true,
            log_diagnostics: false,
        };

        let from_fn = scan_with_preferences(source, preferences.clone());
        let from_scanner = create_scanner_with_preferences(source, preferences).scan_tokens();

        assert_eq!(from_fn, from_scanner);
        assert_eq!(scan(source).tokens, from_fn.tokens);
        assert_eq!(create_scanner(source).scan_tokens().tokens, from_fn.tokens);
    }

    #[test]
    fn test_get_token_counts() {
        let result = scan("a = a + 1; b = 2;");
        let counts = get_token_counts(&result.tokens);

        assert_eq!(counts.get(&TokenType::Identifier), Some(&3));
        assert_eq!(counts.get(&TokenType::Equal), Some(&2));
        assert_eq!(counts.get(&TokenType::Number), Some(&2));
        assert_eq!(counts.get(&TokenType::Semicolon), Some(&2));
        assert_eq!(counts.get(&TokenType::Plus), Some(&1));
        assert_eq!(counts.get(&TokenType::Eof), Some(&1));
        assert!(counts.get(&TokenType::Var).is_none());
    }
}

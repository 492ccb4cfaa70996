//! Single-pass scanner over a complete source string

use super::error::{Diagnostic, LexerError};
use super::keywords::keyword_type;
use super::metrics::LexicalMetrics;
use crate::config::compile_time::lexical::MAX_DIAGNOSTICS_LOGGED;
use crate::config::runtime::LexicalPreferences;
use crate::logging::codes;
use crate::tokens::{Literal, Token, TokenType};
use crate::{log_debug, log_error, log_success};

/// Everything one scan produced. `tokens` always ends with EOF.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: LexicalMetrics,
}

impl ScanResult {
    pub fn had_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn token_types(&self) -> Vec<TokenType> {
        self.tokens.iter().map(Token::token_type).collect()
    }
}

/// Scanner state. `start <= current <= source.len()` always holds and both
/// sit on char boundaries.
pub struct Scanner<'a> {
    source: &'a str,
    start: usize,
    current: usize,
    line: usize,
    start_line: usize,
    tokens: Vec<Token>,
    diagnostics: Vec<Diagnostic>,
    metrics: LexicalMetrics,
    preferences: LexicalPreferences,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self::with_preferences(source, LexicalPreferences::default())
    }

    pub fn with_preferences(source: &'a str, preferences: LexicalPreferences) -> Self {
        Self {
            source,
            start: 0,
            current: 0,
            line: 1,
            start_line: 1,
            tokens: Vec::new(),
            diagnostics: Vec::new(),
            metrics: LexicalMetrics::default(),
            preferences,
        }
    }

    pub fn preferences(&self) -> &LexicalPreferences {
        &self.preferences
    }

    /// Scan the whole source. Never fails; problems come back as diagnostics.
    pub fn scan_tokens(mut self) -> ScanResult {
        log_debug!("Starting lexical analysis",
            "source_bytes" => self.source.len()
        );

        while !self.is_at_end() {
            self.start = self.current;
            self.start_line = self.line;
            self.scan_token();
        }

        let eof = Token::eof(self.line);
        self.metrics.record_token(&eof, &self.preferences);
        self.tokens.push(eof);

        log_success!(codes::success::TOKENIZATION_COMPLETE,
            "Lexical analysis completed",
            "token_count" => self.tokens.len(),
            "diagnostics" => self.metrics.diagnostic_count,
            "keywords" => self.metrics.keyword_tokens,
            "identifiers" => self.metrics.identifier_tokens,
            "operators" => self.metrics.operator_tokens,
            "literals" => self.metrics.literal_tokens,
            "comments" => self.metrics.comment_count,
            "max_string_length" => self.metrics.max_string_length,
            "lines" => self.line
        );

        ScanResult {
            tokens: self.tokens,
            diagnostics: self.diagnostics,
            metrics: self.metrics,
        }
    }

    fn scan_token(&mut self) {
        let ch = self.advance();

        match ch {
            '(' => self.add_token(TokenType::LeftParen),
            ')' => self.add_token(TokenType::RightParen),
            '{' => self.add_token(TokenType::LeftBrace),
            '}' => self.add_token(TokenType::RightBrace),
            ',' => self.add_token(TokenType::Comma),
            '.' => self.add_token(TokenType::Dot),
            '-' => self.add_token(TokenType::Minus),
            '+' => self.add_token(TokenType::Plus),
            ';' => self.add_token(TokenType::Semicolon),
            '*' => self.add_token(TokenType::Star),

            '!' => self.add_with_equal(TokenType::BangEqual, TokenType::Bang),
            '=' => self.add_with_equal(TokenType::EqualEqual, TokenType::Equal),
            '<' => self.add_with_equal(TokenType::LessEqual, TokenType::Less),
            '>' => self.add_with_equal(TokenType::GreaterEqual, TokenType::Greater),

            '/' => {
                if self.match_char('/') {
                    self.skip_comment();
                } else {
                    self.add_token(TokenType::Slash);
                }
            }

            ' ' | '\r' | '\t' => {}
            '\n' => self.line += 1,

            '"' => self.string(),
            c if c.is_ascii_digit() => self.number(),
            c if is_alpha(c) => self.identifier(),

            other => self.report(LexerError::UnexpectedCharacter { character: other }),
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    /// Consume one whole char, multi-byte ones included
    fn advance(&mut self) -> char {
        match self.source[self.current..].chars().next() {
            Some(ch) => {
                self.current += ch.len_utf8();
                ch
            }
            None => '\0',
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() != Some(expected) {
            return false;
        }
        self.current += expected.len_utf8();
        true
    }

    fn peek(&self) -> Option<char> {
        self.source[self.current..].chars().next()
    }

    fn peek_next(&self) -> Option<char> {
        self.source[self.current..].chars().nth(1)
    }

    fn lexeme(&self) -> &'a str {
        &self.source[self.start..self.current]
    }

    fn add_token(&mut self, token_type: TokenType) {
        self.push_token(token_type, self.lexeme(), None);
    }

    fn add_with_equal(&mut self, two_char: TokenType, one_char: TokenType) {
        let token_type = if self.match_char('=') {
            two_char
        } else {
            one_char
        };
        self.add_token(token_type);
    }

    fn push_token(&mut self, token_type: TokenType, lexeme: &str, literal: Option<Literal>) {
        let token = Token::new(token_type, lexeme, literal, self.start_line);
        self.metrics.record_token(&token, &self.preferences);
        self.tokens.push(token);
    }

    fn report(&mut self, error: LexerError) {
        let diagnostic = Diagnostic::new(self.line, error);
        self.metrics.record_diagnostic();

        if self.preferences.log_diagnostics && self.diagnostics.len() < MAX_DIAGNOSTICS_LOGGED {
            let message = diagnostic.message();
            match &diagnostic.error {
                LexerError::UnexpectedCharacter { character } => {
                    log_error!(diagnostic.error_code(), &message,
                        line = diagnostic.line,
                        "character" => character.escape_default()
                    );
                }
                LexerError::UnterminatedString => {
                    log_error!(diagnostic.error_code(), &message,
                        line = diagnostic.line,
                        "start_line" => self.start_line
                    );
                }
            }
        }

        self.diagnostics.push(diagnostic);
    }

    fn skip_comment(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '\n' {
                break;
            }
            self.advance();
        }
        self.metrics.record_comment(&self.preferences);
    }

    fn string(&mut self) {
        while let Some(ch) = self.peek() {
            if ch == '"' {
                break;
            }
            if ch == '\n' {
                self.line += 1;
            }
            self.advance();
        }

        if self.is_at_end() {
            self.report(LexerError::UnterminatedString);
            return;
        }

        // Closing quote
        self.advance();

        let source = self.source;
        let value = &source[self.start + 1..self.current - 1];
        self.metrics
            .record_string_length(value.len(), &self.preferences);
        self.push_token(
            TokenType::String,
            value,
            Some(Literal::String(value.to_string())),
        );
    }

    fn number(&mut self) {
        self.consume_digits();

        if self.peek() == Some('.') && self.peek_next().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.consume_digits();
        }

        let lexeme = self.lexeme();
        // Digits with an optional fraction always parse as f64
        let value: f64 = lexeme.parse().unwrap_or_default();
        self.push_token(TokenType::Number, lexeme, Some(Literal::Number(value)));
    }

    fn consume_digits(&mut self) {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn identifier(&mut self) {
        while self.peek().is_some_and(is_alpha_numeric) {
            self.advance();
        }

        let token_type = keyword_type(self.lexeme()).unwrap_or(TokenType::Identifier);
        self.add_token(token_type);
    }
}

fn is_alpha(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_alpha_numeric(ch: char) -> bool {
    is_alpha(ch) || ch.is_ascii_digit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn scan(source: &str) -> ScanResult {
        Scanner::with_preferences(
            source,
            LexicalPreferences {
                collect_detailed_metrics: true,
                log_diagnostics: true,
            },
        )
        .scan_tokens()
    }

    fn types(source: &str) -> Vec<TokenType> {
        scan(source).token_types()
    }

    #[test]
    fn test_empty_source_yields_only_eof() {
        let result = scan("");
        assert_eq!(result.tokens.len(), 1);
        assert!(result.tokens[0].is_eof());
        assert_eq!(result.tokens[0].lexeme(), "");
        assert_eq!(result.tokens[0].line(), 1);
        assert!(!result.had_errors());
    }

    #[test]
    fn test_single_character_punctuation() {
        assert_eq!(
            types("(){},.-+;*/"),
            vec![
                TokenType::LeftParen,
                TokenType::RightParen,
                TokenType::LeftBrace,
                TokenType::RightBrace,
                TokenType::Comma,
                TokenType::Dot,
                TokenType::Minus,
                TokenType::Plus,
                TokenType::Semicolon,
                TokenType::Star,
                TokenType::Slash,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_one_or_two_character_operators() {
        assert_eq!(
            types("! != = == < <= > >="),
            vec![
                TokenType::Bang,
                TokenType::BangEqual,
                TokenType::Equal,
                TokenType::EqualEqual,
                TokenType::Less,
                TokenType::LessEqual,
                TokenType::Greater,
                TokenType::GreaterEqual,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_greater_equal_is_one_token() {
        let result = scan(">=");
        assert_eq!(result.token_types(), vec![TokenType::GreaterEqual, TokenType::Eof]);
        assert_eq!(result.tokens[0].lexeme(), ">=");

        assert_eq!(
            types(">a"),
            vec![TokenType::Greater, TokenType::Identifier, TokenType::Eof]
        );
        assert_eq!(
            types("=>"),
            vec![TokenType::Equal, TokenType::Greater, TokenType::Eof]
        );
    }

    #[test]
    fn test_identifier_containing_keyword_prefix() {
        let result = scan("forest");
        assert_eq!(result.token_types(), vec![TokenType::Identifier, TokenType::Eof]);
        assert_eq!(result.tokens[0].lexeme(), "forest");
        assert!(result.tokens[0].literal().is_none());
    }

    #[test]
    fn test_keywords_and_identifiers() {
        assert_eq!(
            types("and class else false for fun if nil or print return super this true var while"),
            vec![
                TokenType::And,
                TokenType::Class,
                TokenType::Else,
                TokenType::False,
                TokenType::For,
                TokenType::Fun,
                TokenType::If,
                TokenType::Nil,
                TokenType::Or,
                TokenType::Print,
                TokenType::Return,
                TokenType::Super,
                TokenType::This,
                TokenType::True,
                TokenType::Var,
                TokenType::While,
                TokenType::Eof,
            ]
        );

        let result = scan("_private Var x1_y2");
        assert_eq!(
            result.token_types(),
            vec![
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
        assert_eq!(result.tokens[2].lexeme(), "x1_y2");
    }

    #[test]
    fn test_string_then_number() {
        let result = scan("\"hi\"+1.5");
        assert_eq!(
            result.token_types(),
            vec![
                TokenType::String,
                TokenType::Plus,
                TokenType::Number,
                TokenType::Eof,
            ]
        );

        assert_eq!(result.tokens[0].lexeme(), "hi");
        assert_eq!(
            result.tokens[0].literal(),
            Some(&Literal::String("hi".to_string()))
        );
        assert_eq!(result.tokens[2].lexeme(), "1.5");
        assert_eq!(result.tokens[2].literal(), Some(&Literal::Number(1.5)));
    }

    #[test]
    fn test_comment_then_declaration_on_line_two() {
        let result = scan("// comment\nvar x = 3;");
        assert_eq!(
            result.token_types(),
            vec![
                TokenType::Var,
                TokenType::Identifier,
                TokenType::Equal,
                TokenType::Number,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
        assert!(result.tokens.iter().all(|t| t.line() == 2));
        assert_eq!(result.tokens[3].literal(), Some(&Literal::Number(3.0)));
        assert_eq!(result.metrics.comment_count, 1);
    }

    #[test]
    fn test_comment_at_end_of_input() {
        let result = scan("x // trailing");
        assert_eq!(result.token_types(), vec![TokenType::Identifier, TokenType::Eof]);
        assert_eq!(result.tokens[1].line(), 1);
    }

    #[test]
    fn test_unterminated_string() {
        let result = scan("\"unterminated");
        assert_eq!(result.token_types(), vec![TokenType::Eof]);
        assert_eq!(result.diagnostics.len(), 1);
        assert_matches!(result.diagnostics[0].error, LexerError::UnterminatedString);
        assert_eq!(
            result.diagnostics[0].to_string(),
            "[line 1] Error: Unterminated string."
        );
    }

    #[test]
    fn test_unterminated_string_reports_line_where_input_ended() {
        let result = scan("\"one\ntwo\nthree");
        assert_eq!(result.diagnostics.len(), 1);
        assert_eq!(result.diagnostics[0].line, 3);
        assert_eq!(result.tokens[0].line(), 3);
    }

    #[test]
    fn test_unexpected_character() {
        let result = scan("@");
        assert_eq!(result.token_types(), vec![TokenType::Eof]);
        assert_eq!(result.diagnostics.len(), 1);
        assert_matches!(
            result.diagnostics[0].error,
            LexerError::UnexpectedCharacter { character: '@' }
        );
        assert_eq!(
            result.diagnostics[0].to_string(),
            "[line 1] Error: Unexpected character."
        );
    }

    #[test]
    fn test_scanning_continues_after_unexpected_characters() {
        let result = scan("a # b\n$ c");
        assert_eq!(
            result.token_types(),
            vec![
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Identifier,
                TokenType::Eof,
            ]
        );
        let lines: Vec<usize> = result.diagnostics.iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(result.metrics.diagnostic_count, 2);
    }

    #[test]
    fn test_non_ascii_character_is_consumed_whole() {
        let result = scan("é+ü");
        assert_eq!(result.token_types(), vec![TokenType::Plus, TokenType::Eof]);
        assert_eq!(result.diagnostics.len(), 2);
        assert_matches!(
            result.diagnostics[0].error,
            LexerError::UnexpectedCharacter { character: 'é' }
        );
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        let result = scan("1.");
        assert_eq!(
            result.token_types(),
            vec![TokenType::Number, TokenType::Dot, TokenType::Eof]
        );
        assert_eq!(result.tokens[0].lexeme(), "1");
        assert_eq!(result.tokens[0].literal(), Some(&Literal::Number(1.0)));
    }

    #[test]
    fn test_leading_dot_is_not_part_of_number() {
        assert_eq!(
            types(".5"),
            vec![TokenType::Dot, TokenType::Number, TokenType::Eof]
        );
        assert_eq!(
            types("1.2.3"),
            vec![
                TokenType::Number,
                TokenType::Dot,
                TokenType::Number,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_multiline_string_reports_opening_line() {
        let result = scan("\"a\nb\" x");
        assert_eq!(result.tokens[0].token_type(), TokenType::String);
        assert_eq!(result.tokens[0].lexeme(), "a\nb");
        assert_eq!(result.tokens[0].line(), 1);
        assert_eq!(result.tokens[1].lexeme(), "x");
        assert_eq!(result.tokens[1].line(), 2);
        assert_eq!(result.tokens[2].line(), 2);
    }

    #[test]
    fn test_empty_string_literal() {
        let result = scan("\"\"");
        assert_eq!(result.token_types(), vec![TokenType::String, TokenType::Eof]);
        assert_eq!(result.tokens[0].lexeme(), "");
        assert_eq!(
            result.tokens[0].literal(),
            Some(&Literal::String(String::new()))
        );
        assert_eq!(result.tokens[0].to_string(), "[TYPE: STRING] ''");
    }

    #[test]
    fn test_line_tracking() {
        let source = "a\n\nb\r\n\tc";
        let result = scan(source);
        let lines: Vec<usize> = result.tokens.iter().map(Token::line).collect();
        assert_eq!(lines, vec![1, 3, 4, 4]);
    }

    #[test]
    fn test_scanning_is_idempotent() {
        let source = "fun add(a, b) { return a + b; } // sum\nprint add(1, 2.5) >= \"x\";";
        assert_eq!(scan(source), scan(source));
    }

    #[test]
    fn test_lexemes_reconstruct_meaningful_source() {
        let source = "var greeting = \"hello\"; // set\nif (greeting != nil) print greeting;";
        let result = scan(source);

        let rebuilt: String = result
            .tokens
            .iter()
            .map(|t| match t.token_type() {
                TokenType::String => format!("\"{}\"", t.lexeme()),
                _ => t.lexeme().to_string(),
            })
            .collect();

        assert_eq!(
            rebuilt,
            "vargreeting=\"hello\";if(greeting!=nil)printgreeting;"
        );
    }

    #[test]
    fn test_metrics_are_collected() {
        let result = scan("var s = \"four\"; // c\nprint s;");
        let metrics = &result.metrics;

        assert_eq!(metrics.total_tokens, result.tokens.len());
        assert_eq!(metrics.keyword_tokens, 2);
        assert_eq!(metrics.identifier_tokens, 2);
        assert_eq!(metrics.operator_tokens, 1);
        assert_eq!(metrics.literal_tokens, 1);
        assert_eq!(metrics.punctuation_tokens, 2);
        assert_eq!(metrics.eof_tokens, 1);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.max_string_length, 4);
        assert_eq!(metrics.diagnostic_count, 0);
    }
}

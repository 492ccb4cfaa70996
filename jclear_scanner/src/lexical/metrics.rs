use crate::config::runtime::LexicalPreferences;
use crate::tokens::{Token, TokenClass};
use serde::Serialize;

/// Counters gathered while scanning one source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub punctuation_tokens: usize,
    pub operator_tokens: usize,
    pub literal_tokens: usize,
    pub identifier_tokens: usize,
    pub keyword_tokens: usize,
    pub eof_tokens: usize,
    pub comment_count: usize,
    pub max_string_length: usize,
    pub diagnostic_count: usize,
}

impl LexicalMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, preferences: &LexicalPreferences) {
        self.total_tokens += 1;

        if !preferences.collect_detailed_metrics {
            return;
        }

        match token.token_type().token_class() {
            TokenClass::Punctuation => self.punctuation_tokens += 1,
            TokenClass::Operator => self.operator_tokens += 1,
            TokenClass::Literal => self.literal_tokens += 1,
            TokenClass::Identifier => self.identifier_tokens += 1,
            TokenClass::Keyword => self.keyword_tokens += 1,
            TokenClass::EndOfInput => self.eof_tokens += 1,
        }
    }

    pub(crate) fn record_comment(&mut self, preferences: &LexicalPreferences) {
        if preferences.collect_detailed_metrics {
            self.comment_count += 1;
        }
    }

    pub(crate) fn record_string_length(&mut self, length: usize, preferences: &LexicalPreferences) {
        if preferences.collect_detailed_metrics {
            self.max_string_length = self.max_string_length.max(length);
        }
    }

    pub(crate) fn record_diagnostic(&mut self) {
        self.diagnostic_count += 1;
    }
}

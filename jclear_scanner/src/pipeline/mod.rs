//! Scan pipeline: file -> source -> tokens
//!
//! File runs happen inside a logging file context so every event emitted
//! along the way carries the script path.

mod error;
mod result;

pub use error::PipelineError;
pub use result::PipelineResult;

use crate::config::runtime::{LexicalPreferences, RuntimeConfig};
use crate::file_processor::FileProcessor;
use crate::lexical;
use crate::logging;
use std::path::Path;
use std::time::Instant;

/// Scan a script using the runtime configuration from the environment
pub fn scan_file(file_path: impl AsRef<Path>) -> Result<PipelineResult, PipelineError> {
    let config = RuntimeConfig::from_env()?;
    scan_file_with_config(file_path, &config)
}

pub fn scan_file_with_config(
    file_path: impl AsRef<Path>,
    config: &RuntimeConfig,
) -> Result<PipelineResult, PipelineError> {
    let started = Instant::now();
    let file_path = file_path.as_ref();

    logging::with_file_context(file_path.to_path_buf(), || {
        crate::log_info!("Starting scan pipeline", "file" => file_path.display());

        let processor = FileProcessor::from_preferences(&config.file_processor);
        let file_result = processor.process_file(file_path)?;

        let scan = lexical::scan_with_preferences(&file_result.source, config.lexical.clone());

        let result = PipelineResult::new(scan, Some(file_result.metadata), started.elapsed());
        result.log_success();

        Ok(result)
    })
}

/// Scan in-memory source, e.g. one REPL line
pub fn scan_source(source: &str) -> PipelineResult {
    scan_source_with_preferences(source, LexicalPreferences::default())
}

pub fn scan_source_with_preferences(
    source: &str,
    preferences: LexicalPreferences,
) -> PipelineResult {
    let started = Instant::now();
    let scan = lexical::scan_with_preferences(source, preferences);
    PipelineResult::new(scan, None, started.elapsed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenType;
    use assert_matches::assert_matches;
    use std::fs;
    use tempfile::tempdir;

    fn quiet_config() -> RuntimeConfig {
        let mut config = RuntimeConfig::default();
        config.file_processor.require_script_extension = false;
        config.lexical.log_diagnostics = false;
        config
    }

    #[test]
    fn test_scan_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("decl.jc");
        fs::write(&file_path, "// comment\nvar x = 3;\n").unwrap();

        let result = scan_file_with_config(&file_path, &quiet_config()).unwrap();

        let types: Vec<TokenType> = result.tokens.iter().map(|t| t.token_type()).collect();
        assert_eq!(
            types,
            vec![
                TokenType::Var,
                TokenType::Identifier,
                TokenType::Equal,
                TokenType::Number,
                TokenType::Semicolon,
                TokenType::Eof,
            ]
        );
        assert!(!result.had_errors());
        assert_eq!(result.tokens.last().unwrap().line(), 3);

        let metadata = result.file_metadata.as_ref().unwrap();
        assert_eq!(metadata.line_count, 2);
        assert!(result.summary().contains("6 tokens"));
    }

    #[test]
    fn test_scan_file_reports_diagnostics_without_failing() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("bad.jc");
        fs::write(&file_path, "var s = \"open").unwrap();

        let result = scan_file_with_config(&file_path, &quiet_config()).unwrap();
        assert!(result.had_errors());
        assert_eq!(result.diagnostics.len(), 1);
    }

    #[test]
    fn test_missing_file_is_a_pipeline_error() {
        let result = scan_file_with_config("no/such/script.jc", &quiet_config());
        assert_matches!(result, Err(PipelineError::FileProcessing(_)));
        assert!(logging::get_current_file_context().is_none());
    }

    #[test]
    fn test_extension_preference_is_honoured() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("script.lox");
        fs::write(&file_path, "print 1;").unwrap();

        let mut config = quiet_config();
        config.file_processor.require_script_extension = true;

        let result = scan_file_with_config(&file_path, &config);
        assert_matches!(result, Err(PipelineError::FileProcessing(_)));
    }

    #[test]
    fn test_scan_source() {
        let result = scan_source("\"hi\"+1.5");
        assert_eq!(result.token_count(), 4);
        assert!(result.file_metadata.is_none());
        assert!(!result.had_errors());
    }
}

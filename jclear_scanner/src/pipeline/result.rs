use crate::file_processor::FileMetadata;
use crate::lexical::{Diagnostic, LexicalMetrics, ScanResult};
use crate::logging::codes;
use crate::tokens::Token;
use std::time::Duration;

/// Output of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<Diagnostic>,
    pub metrics: LexicalMetrics,
    /// Present when the source came from a file
    pub file_metadata: Option<FileMetadata>,
    pub processing_duration: Duration,
}

impl PipelineResult {
    pub fn new(
        scan: ScanResult,
        file_metadata: Option<FileMetadata>,
        processing_duration: Duration,
    ) -> Self {
        Self {
            tokens: scan.tokens,
            diagnostics: scan.diagnostics,
            metrics: scan.metrics,
            file_metadata,
            processing_duration,
        }
    }

    pub fn had_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        let source = match &self.file_metadata {
            Some(metadata) => format!(
                "{} ({}, {} lines)",
                metadata.path.display(),
                metadata.human_readable_size(),
                metadata.line_count
            ),
            None => "<input>".to_string(),
        };

        format!(
            "{}: {} tokens, {} diagnostics in {:.3} ms",
            source,
            self.token_count(),
            self.diagnostics.len(),
            self.processing_duration.as_secs_f64() * 1000.0
        )
    }

    pub fn log_success(&self) {
        if !crate::logging::config::log_performance_events() {
            return;
        }

        let file = self
            .file_metadata
            .as_ref()
            .map(|metadata| metadata.path.display().to_string())
            .unwrap_or_else(|| "<input>".to_string());

        crate::log_performance!(codes::success::SCAN_PIPELINE_COMPLETE,
            "Scan pipeline completed",
            duration = self.processing_duration,
            "file" => file,
            "tokens" => self.token_count(),
            "diagnostics" => self.diagnostics.len()
        );
    }
}

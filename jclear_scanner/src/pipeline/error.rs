use crate::config::ConfigError;
use crate::file_processor::FileProcessorError;

/// Failures that stop a pipeline run. Lexical problems are not here: they
/// are diagnostics on the result.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("File processing failed: {0}")]
    FileProcessing(#[from] FileProcessorError),

    #[error("Configuration failed: {0}")]
    Configuration(#[from] ConfigError),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            PipelineError::FileProcessing(error) => error.error_code(),
            PipelineError::Configuration(error) => error.error_code(),
        }
    }
}

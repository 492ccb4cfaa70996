//! Reads a script from disk into memory, enforcing the compile-time limits

use crate::config::compile_time::file_processing::{
    LARGE_FILE_THRESHOLD, MAX_FILE_SIZE, MAX_LINE_COUNT,
};
use crate::config::runtime::FileProcessorPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use chrono::{DateTime, Utc};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Extension expected on JClear scripts
pub const SCRIPT_EXTENSION: &str = "jc";

#[derive(Debug, Clone, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid file extension: expected .jc, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },
}

impl FileProcessorError {
    pub fn error_code(&self) -> crate::logging::Code {
        use codes::file_processing::*;

        match self {
            FileProcessorError::FileNotFound { .. } => FILE_NOT_FOUND,
            FileProcessorError::InvalidExtension { .. } => INVALID_EXTENSION,
            FileProcessorError::FileTooLarge { .. } => FILE_TOO_LARGE,
            FileProcessorError::TooManyLines { .. } => TOO_MANY_LINES,
            FileProcessorError::PermissionDenied { .. } => PERMISSION_DENIED,
            FileProcessorError::InvalidEncoding { .. } => INVALID_ENCODING,
            FileProcessorError::IoError { .. } => IO_ERROR,
            FileProcessorError::InvalidPath { .. } => INVALID_PATH,
        }
    }

    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }

    /// Classify an I/O failure on `path`
    fn from_io(error: &io::Error, path: &Path, action: &str) -> Self {
        match error.kind() {
            io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
                path: path.display().to_string(),
            },
            io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
                path: path.display().to_string(),
            },
            io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                path: path.display().to_string(),
            },
            _ => FileProcessorError::IoError {
                message: format!("{} '{}': {}", action, path.display(), error),
            },
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical path
    pub path: PathBuf,
    pub size: u64,
    /// Lowercased extension, if any
    pub extension: Option<String>,
    /// Filled in once the content has been read
    pub line_count: usize,
    pub is_script_file: bool,
    pub modified: Option<DateTime<Utc>>,
}

impl FileMetadata {
    pub fn human_readable_size(&self) -> String {
        format_size(self.size)
    }

    pub fn is_large_file(&self) -> bool {
        self.size > LARGE_FILE_THRESHOLD
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes < 1024 {
        return format!("{} B", bytes);
    }

    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

/// Source text plus what was learned while reading it
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: Duration,
}

impl FileProcessingResult {
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }

    /// Characters per millisecond
    pub fn processing_rate(&self) -> f64 {
        let millis = self.processing_duration.as_secs_f64() * 1000.0;
        if millis > 0.0 {
            self.char_count() as f64 / millis
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct FileProcessor {
    pub require_script_extension: bool,
    pub enable_performance_logging: bool,
}

impl FileProcessor {
    pub fn new() -> Self {
        Self {
            require_script_extension: false,
            enable_performance_logging: true,
        }
    }

    pub fn from_preferences(prefs: &FileProcessorPreferences) -> Self {
        Self {
            require_script_extension: prefs.require_script_extension,
            enable_performance_logging: prefs.enable_performance_logging,
        }
    }

    pub fn with_script_extension_required(mut self, required: bool) -> Self {
        self.require_script_extension = required;
        self
    }


    /// Validate, read and measure a script. Empty files are accepted.
    ///
    /// Every rejection is logged once here, with the offending path attached.
    pub fn process_file(
        &self,
        file_path: impl AsRef<Path>,
    ) -> Result<FileProcessingResult, FileProcessorError> {
        let file_path = file_path.as_ref();
        log_debug!("Starting file processing", "file" => file_path.display());

        self.load(file_path).inspect_err(|error| {
            log_error!(error.error_code(), "File rejected",
                "file" => file_path.display(),
                "reason" => error,
                "category" => error.category()
            );
        })
    }

    fn load(&self, file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let started = Instant::now();

        let path = resolve_path(file_path)?;
        let mut metadata = collect_metadata(&path)?;
        self.check_limits(&metadata)?;

        let bytes = fs::read(&path).map_err(|e| FileProcessorError::from_io(&e, &path, "read"))?;
        let source = String::from_utf8(bytes).map_err(|_| FileProcessorError::InvalidEncoding {
            path: path.display().to_string(),
        })?;

        metadata.line_count = source.lines().count();
        if metadata.line_count > MAX_LINE_COUNT {
            return Err(FileProcessorError::TooManyLines {
                lines: metadata.line_count,
                max_lines: MAX_LINE_COUNT,
            });
        }

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: started.elapsed(),
        };
        self.log_processing_success(&result);
        Ok(result)
    }

    fn check_limits(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            return Err(FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            });
        }

        if self.require_script_extension && !metadata.is_script_file {
            return Err(FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            });
        }

        Ok(())
    }

    fn log_processing_success(&self, result: &FileProcessingResult) {
        let meta = &result.metadata;
        let duration_ms = format!("{:.3}", result.processing_duration.as_secs_f64() * 1000.0);

        if self.enable_performance_logging {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Script loaded",
                "file" => meta.path.display(),
                "size" => meta.human_readable_size(),
                "lines" => meta.line_count,
                "chars" => result.char_count(),
                "duration_ms" => &duration_ms,
                "chars_per_ms" => format!("{:.2}", result.processing_rate()),
                "is_large_file" => meta.is_large_file()
            );
        } else {
            log_success!(codes::success::FILE_PROCESSING_SUCCESS, "Script loaded",
                "file" => meta.path.display(),
                "lines" => meta.line_count
            );
        }
    }
}

/// Canonical path of an existing regular file
fn resolve_path(file_path: &Path) -> Result<PathBuf, FileProcessorError> {
    let invalid = || FileProcessorError::InvalidPath {
        path: file_path.display().to_string(),
    };

    if file_path.as_os_str().is_empty() {
        return Err(invalid());
    }

    let path = file_path
        .canonicalize()
        .map_err(|e| FileProcessorError::from_io(&e, file_path, "resolve"))?;
    if path.is_file() {
        Ok(path)
    } else {
        Err(invalid())
    }
}

fn collect_metadata(path: &Path) -> Result<FileMetadata, FileProcessorError> {
    let fs_metadata =
        fs::metadata(path).map_err(|e| FileProcessorError::from_io(&e, path, "stat"))?;

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let metadata = FileMetadata {
        path: path.to_path_buf(),
        size: fs_metadata.len(),
        is_script_file: extension.as_deref() == Some(SCRIPT_EXTENSION),
        extension,
        line_count: 0,
        modified: fs_metadata.modified().ok().map(DateTime::<Utc>::from),
    };

    log_debug!("File metadata collected",
        "size" => metadata.human_readable_size(),
        "extension" => metadata.extension.as_deref().unwrap_or("none"),
        "is_large_file" => metadata.is_large_file()
    );

    Ok(metadata)
}

impl Default for FileProcessor {
    fn default() -> Self {
        Self::new()
    }
}

pub fn process_file(file_path: impl AsRef<Path>) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

pub fn create_processor() -> FileProcessor {
    FileProcessor::new()
}

pub fn create_processor_from_preferences(prefs: &FileProcessorPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

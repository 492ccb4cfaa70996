//! Log codes and their registry metadata
//!
//! Errors use `E0xx`, informational successes `I0xx`, and internal faults `ERRxxx`.

/// Static code attached to every log event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl serde::Serialize for Code {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.0)
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// How the caller should react to a code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Disposition {
    /// Keep going; nothing to report beyond the event
    Continue,
    /// Record and keep going
    Recover,
    /// Stop the current run
    Halt,
    /// Stop the current run, but a retry with fixed input can succeed
    RecoverableHalt,
}

#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

const fn entry(
    code: Code,
    category: &'static str,
    severity: Severity,
    disposition: Disposition,
    description: &'static str,
    recommended_action: &'static str,
) -> ErrorMetadata {
    let (recoverable, requires_halt) = match disposition {
        Disposition::Continue | Disposition::Recover => (true, false),
        Disposition::Halt => (false, true),
        Disposition::RecoverableHalt => (true, true),
    };
    ErrorMetadata {
        code: code.0,
        category,
        severity,
        recoverable,
        requires_halt,
        description,
        recommended_action,
    }
}

pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const TOO_MANY_LINES: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
}

pub mod lexical {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
}

/// Command-line driver codes
pub mod driver {
    use super::Code;

    pub const INPUT_READ_FAILURE: Code = Code::new("E060");
    pub const USAGE_ERROR: Code = Code::new("E061");
}

pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const SCAN_PIPELINE_COMPLETE: Code = Code::new("I030");
}

use Disposition::*;
use Severity::*;

#[rustfmt::skip]
const REGISTRY: &[ErrorMetadata] = &[
    entry(system::INTERNAL_ERROR, "System", Critical, Halt,
        "Critical internal system error",
        "File a bug report with the failing input"),
    entry(system::INITIALIZATION_FAILURE, "System", Critical, Halt,
        "System initialization failure",
        "Check JCLEAR_* environment variables and the runtime config file"),
    entry(file_processing::FILE_NOT_FOUND, "FileProcessing", Medium, Halt,
        "File not found at specified path",
        "Check file path and ensure file exists"),
    entry(file_processing::INVALID_EXTENSION, "FileProcessing", Low, Recover,
        "File does not have .jc extension",
        "Rename the script with a .jc extension or disable the extension check"),
    entry(file_processing::FILE_TOO_LARGE, "FileProcessing", Medium, Halt,
        "File exceeds maximum size limit",
        "Reduce file size or build with a larger profile limit"),
    entry(file_processing::TOO_MANY_LINES, "FileProcessing", Medium, Halt,
        "File exceeds maximum line count",
        "Split the script or build with a larger profile limit"),
    entry(file_processing::PERMISSION_DENIED, "FileProcessing", Medium, Halt,
        "Permission denied accessing file",
        "Check file permissions and user access rights"),
    entry(file_processing::INVALID_ENCODING, "FileProcessing", Medium, Halt,
        "File is not valid UTF-8",
        "Re-encode the script as UTF-8"),
    entry(file_processing::IO_ERROR, "FileProcessing", High, Halt,
        "I/O error while reading file",
        "Retry the operation and check the underlying storage"),
    entry(file_processing::INVALID_PATH, "FileProcessing", Medium, Halt,
        "Path is empty or does not name a regular file",
        "Pass the path of a script file"),
    entry(lexical::UNEXPECTED_CHARACTER, "Lexical", Medium, Recover,
        "Character does not start any token",
        "Remove the character or place it inside a string literal"),
    entry(lexical::UNTERMINATED_STRING, "Lexical", Medium, Recover,
        "String literal reaches end of input without a closing quote",
        "Add the missing closing double quote"),
    entry(driver::INPUT_READ_FAILURE, "Driver", High, Halt,
        "Failed to read from interactive input",
        "Check that stdin is readable"),
    entry(driver::USAGE_ERROR, "Driver", Low, RecoverableHalt,
        "Invalid command-line usage",
        "Run with --help for usage"),
    entry(success::SYSTEM_INITIALIZATION_COMPLETED, "System", Low, Continue,
        "Logging system initialized",
        "No action required"),
    entry(success::FILE_PROCESSING_SUCCESS, "FileProcessing", Low, Continue,
        "File read successfully",
        "Continue to lexical analysis"),
    entry(success::TOKENIZATION_COMPLETE, "Lexical", Low, Continue,
        "Tokenization completed",
        "Inspect diagnostics before using the token stream"),
    entry(success::SCAN_PIPELINE_COMPLETE, "Pipeline", Low, Continue,
        "Scan pipeline completed",
        "No action required"),
];

pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    REGISTRY.iter().find(|metadata| metadata.code == code)
}

/// Unknown codes read as medium severity
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code).map_or(Medium, |m| m.severity)
}

/// Unknown codes are assumed recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code).map_or(true, |m| m.recoverable)
}

pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code).is_some_and(|m| m.requires_halt)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown error", |m| m.description)
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code).map_or("No specific action available", |m| m.recommended_action)
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown", |m| m.category)
}

//! File processor: turns a script path into validated UTF-8 source
//!
//! Size and line limits are compile-time constants from the build profile.
//! Whether the `.jc` extension is required is a runtime preference.

mod processor;

pub use processor::{
    create_processor, create_processor_from_preferences, process_file, FileMetadata,
    FileProcessingResult, FileProcessor, FileProcessorError, SCRIPT_EXTENSION,
};

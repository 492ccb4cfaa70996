//! Reads `config/<profile>.toml` at the workspace root and generates the
//! `compile_time` constants module included by `src/config/mod.rs`.

use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CompileTimeConfig {
    file_processing: FileProcessingLimits,
    lexical: LexicalLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct FileProcessingLimits {
    max_file_size: u64,
    large_file_threshold: u64,
    max_line_count: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct LexicalLimits {
    max_diagnostics_logged: usize,
}

#[derive(serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
    max_log_events_per_file: usize,
}

const HARD_MAX_FILE_SIZE: u64 = 1_000_000_000;
const HARD_MAX_LOG_BUFFER: usize = 100_000;
const PRODUCTION_MAX_FILE_SIZE: u64 = 50_000_000;

fn main() {
    if let Err(message) = run() {
        panic!("jclear build configuration: {}", message);
    }
}

fn run() -> Result<(), String> {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=JCLEAR_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=JCLEAR_CONFIG_DIR");

    let profile = env::var("JCLEAR_BUILD_PROFILE").unwrap_or_else(|_| "development".into());
    let config_dir = env::var("JCLEAR_CONFIG_DIR").unwrap_or_else(|_| "config".into());

    // Surface the resolved values to `config::build_info`
    println!("cargo:rustc-env=JCLEAR_BUILD_PROFILE={}", profile);
    println!("cargo:rustc-env=JCLEAR_CONFIG_DIR={}", config_dir);

    let config_path = profile_path(&config_dir, &profile)?;
    println!("cargo:rerun-if-changed={}", config_path.display());

    let content = fs::read_to_string(&config_path)
        .map_err(|e| format!("cannot read {}: {}", config_path.display(), e))?;
    let config: CompileTimeConfig = toml::from_str(&content)
        .map_err(|e| format!("invalid TOML in {}: {}", config_path.display(), e))?;

    check_limits(&config, &profile)?;

    let out_dir = env::var("OUT_DIR").map_err(|e| format!("OUT_DIR: {}", e))?;
    let out_path = Path::new(&out_dir).join("constants.rs");
    fs::write(&out_path, render(&config, &profile))
        .map_err(|e| format!("cannot write {}: {}", out_path.display(), e))
}

/// Profiles live at the workspace root, one level above this crate
fn profile_path(config_dir: &str, profile: &str) -> Result<PathBuf, String> {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").map_err(|e| e.to_string())?;
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .ok_or("crate has no parent directory")?;

    let path = workspace_root
        .join(config_dir)
        .join(format!("{}.toml", profile));
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("profile '{}' not found at {}", profile, path.display()))
    }
}

fn check_limits(config: &CompileTimeConfig, profile: &str) -> Result<(), String> {
    let files = &config.file_processing;
    let logging = &config.logging;

    let rules = [
        (files.max_file_size <= HARD_MAX_FILE_SIZE, "max_file_size exceeds hard maximum"),
        (files.large_file_threshold <= files.max_file_size, "large_file_threshold exceeds max_file_size"),
        (files.max_line_count > 0, "max_line_count must be at least 1"),
        (config.lexical.max_diagnostics_logged > 0, "max_diagnostics_logged must be at least 1"),
        (logging.log_buffer_size <= HARD_MAX_LOG_BUFFER, "log_buffer_size exceeds hard maximum"),
        (logging.max_log_events_per_file <= logging.log_buffer_size, "max_log_events_per_file exceeds log_buffer_size"),
        (
            profile != "production" || files.max_file_size <= PRODUCTION_MAX_FILE_SIZE,
            "max_file_size too high for the production profile",
        ),
    ];

    match rules.iter().find(|(ok, _)| !ok) {
        Some((_, message)) => Err(message.to_string()),
        None => Ok(()),
    }
}

fn render(config: &CompileTimeConfig, profile: &str) -> String {
    let files = &config.file_processing;
    let logging = &config.logging;

    let sections: [(&str, Vec<(&str, &str, String)>); 3] = [
        (
            "file_processing",
            vec![
                ("MAX_FILE_SIZE", "u64", files.max_file_size.to_string()),
                ("LARGE_FILE_THRESHOLD", "u64", files.large_file_threshold.to_string()),
                ("MAX_LINE_COUNT", "usize", files.max_line_count.to_string()),
            ],
        ),
        (
            "lexical",
            vec![(
                "MAX_DIAGNOSTICS_LOGGED",
                "usize",
                config.lexical.max_diagnostics_logged.to_string(),
            )],
        ),
        (
            "logging",
            vec![
                ("LOG_BUFFER_SIZE", "usize", logging.log_buffer_size.to_string()),
                ("MAX_LOG_MESSAGE_LENGTH", "usize", logging.max_log_message_length.to_string()),
                ("MAX_LOG_EVENTS_PER_FILE", "usize", logging.max_log_events_per_file.to_string()),
            ],
        ),
    ];

    let mut out = format!("// Generated by build.rs from the '{}' profile. Do not edit.\n\n", profile);
    out.push_str("pub mod compile_time {\n");
    for (module, constants) in sections {
        let _ = writeln!(out, "    pub mod {} {{", module);
        for (name, ty, value) in constants {
            let _ = writeln!(out, "        pub const {}: {} = {};", name, ty, value);
        }
        out.push_str("    }\n");
    }
    out.push_str("}\n");
    out
}

//! Command-line driver for the `jclear` binary
//!
//! `jclear` with no arguments starts a prompt that scans one line at a time.
//! `jclear <script>` scans a file. Tokens go to stdout and diagnostics to
//! stderr. Exit codes follow the BSD `sysexits` convention.

use crate::config::runtime::{OutputFormat, RuntimeConfig};
use crate::lexical::Diagnostic;
use crate::logging::codes;
use crate::pipeline::{self, PipelineError, PipelineResult};
use crate::tokens::Token;
use crate::{log_error, log_info};
use std::io::{self, BufRead, Write};

pub const EX_OK: i32 = 0;
/// Wrong number of arguments
pub const EX_USAGE: i32 = 64;
/// The script had lexical errors
pub const EX_DATAERR: i32 = 65;
/// The script could not be opened or read
pub const EX_NOINPUT: i32 = 66;
/// Reading stdin or writing output failed
pub const EX_IOERR: i32 = 74;
/// Runtime configuration could not be loaded
pub const EX_CONFIG: i32 = 78;

pub const PROMPT: &str = ">> ";
pub const USAGE: &str = "Usage: jclear [script].jc";

pub struct Driver {
    config: RuntimeConfig,
}

impl Driver {
    pub fn new(config: RuntimeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Dispatch on the arguments (program name excluded) and return the exit code
    pub fn run<R, W, E>(&self, args: &[String], input: R, stdout: &mut W, stderr: &mut E) -> i32
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        let outcome = match args {
            [] => self.run_prompt(input, stdout, stderr),
            [flag] if flag == "-h" || flag == "--help" => print_help(stdout).map(|_| EX_OK),
            [path] => self.run_file(path, stdout, stderr),
            _ => {
                log_error!(codes::driver::USAGE_ERROR, "Too many arguments",
                    "count" => args.len()
                );
                writeln!(stdout, "{}", USAGE).map(|_| EX_USAGE)
            }
        };

        let outcome = outcome.and_then(|code| stdout.flush().map(|_| code));

        match outcome {
            Ok(code) => code,
            Err(e) => {
                let _ = writeln!(stderr, "Error: {}", e);
                EX_IOERR
            }
        }
    }

    /// Scan one script. Tokens are printed even when diagnostics exist.
    pub fn run_file<W, E>(&self, path: &str, stdout: &mut W, stderr: &mut E) -> io::Result<i32>
    where
        W: Write,
        E: Write,
    {
        let result = match pipeline::scan_file_with_config(path, &self.config) {
            Ok(result) => result,
            Err(error) => {
                writeln!(stderr, "Error: {}", error)?;
                return Ok(match error {
                    PipelineError::FileProcessing(_) => EX_NOINPUT,
                    PipelineError::Configuration(_) => EX_CONFIG,
                });
            }
        };

        self.write_result(&result, stdout, stderr)?;

        if self.config.output.show_summary {
            writeln!(stderr, "{}", result.summary())?;
        }

        Ok(if result.had_errors() {
            EX_DATAERR
        } else {
            EX_OK
        })
    }

    /// Read-scan-print loop until end of input. Each line is scanned on its
    /// own, so errors on one line never affect the next.
    pub fn run_prompt<R, W, E>(&self, mut input: R, stdout: &mut W, stderr: &mut E) -> io::Result<i32>
    where
        R: BufRead,
        W: Write,
        E: Write,
    {
        log_info!("Starting interactive prompt");

        // Raw bytes: a line that is not UTF-8 is decoded lossily instead of
        // ending the session
        let mut line = Vec::new();
        loop {
            write!(stdout, "{}", PROMPT)?;
            stdout.flush()?;

            line.clear();
            let read = input.read_until(b'\n', &mut line).map_err(|e| {
                log_error!(codes::driver::INPUT_READ_FAILURE, "Failed to read prompt input",
                    "io_error" => &e
                );
                e
            })?;
            if read == 0 {
                break;
            }

            let decoded = String::from_utf8_lossy(&line);
            let source = decoded.trim_end_matches(&['\n', '\r'][..]);
            let result = pipeline::scan_source_with_preferences(source, self.config.lexical.clone());
            self.write_result(&result, stdout, stderr)?;
        }

        Ok(EX_OK)
    }

    fn write_result<W, E>(&self, result: &PipelineResult, stdout: &mut W, stderr: &mut E) -> io::Result<()>
    where
        W: Write,
        E: Write,
    {
        for token in &result.tokens {
            self.write_token(token, stdout)?;
        }
        for diagnostic in &result.diagnostics {
            self.write_diagnostic(diagnostic, stderr)?;
        }
        Ok(())
    }

    fn write_token<W: Write>(&self, token: &Token, out: &mut W) -> io::Result<()> {
        match self.config.output.format {
            OutputFormat::Text => writeln!(out, "{}", token),
            OutputFormat::Json => {
                let json = serde_json::to_string(token).map_err(io::Error::other)?;
                writeln!(out, "{}", json)
            }
        }
    }

    fn write_diagnostic<E: Write>(&self, diagnostic: &Diagnostic, out: &mut E) -> io::Result<()> {
        match self.config.output.format {
            OutputFormat::Text => writeln!(out, "{}", diagnostic),
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "line": diagnostic.line,
                    "code": diagnostic.error_code().as_str(),
                    "message": diagnostic.message(),
                });
                writeln!(out, "{}", json)
            }
        }
    }
}

pub fn print_help<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "JClear scanner v{}", env!("CARGO_PKG_VERSION"))?;
    writeln!(out)?;
    writeln!(out, "USAGE:")?;
    writeln!(out, "    jclear                 Start an interactive prompt")?;
    writeln!(out, "    jclear <script>.jc     Scan a script and print its tokens")?;
    writeln!(out)?;
    writeln!(out, "EXIT CODES:")?;
    writeln!(out, "    {}    success", EX_OK)?;
    writeln!(out, "    {}   wrong number of arguments", EX_USAGE)?;
    writeln!(out, "    {}   the script has lexical errors", EX_DATAERR)?;
    writeln!(out, "    {}   the script could not be read", EX_NOINPUT)?;
    writeln!(out)?;
    writeln!(out, "ENVIRONMENT:")?;
    writeln!(out, "    JCLEAR_OUTPUT_FORMAT=text|json     Token output format")?;
    writeln!(out, "    JCLEAR_OUTPUT_SHOW_SUMMARY=true    Print a summary after a file scan")?;
    writeln!(out, "    JCLEAR_LOGGING_ENABLE_CONSOLE=true Emit log events on stderr")?;
    writeln!(out, "    JCLEAR_RUNTIME_CONFIG=<path>       Load preferences from a TOML file")?;
    Ok(())
}

//! JClear scanner
//!
//! Lexical front end for JClear, a small Lox-like scripting language. Source
//! text goes in; an ordered token stream terminated by EOF comes out, along
//! with recoverable diagnostics.
//!
//! ```no_run
//! let result = jclear_scanner::lexical::scan("var x = 3;");
//! for token in &result.tokens {
//!     println!("{}", token);
//! }
//! ```

pub mod config;
pub mod driver;
pub mod file_processor;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod pipeline;
pub mod tokens;

pub use lexical::{scan, Diagnostic, LexerError, ScanResult, Scanner};
pub use pipeline::{PipelineError, PipelineResult};
pub use tokens::{Literal, Token, TokenType};

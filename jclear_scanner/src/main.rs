use jclear_scanner::config::RuntimeConfig;
use jclear_scanner::driver::{self, Driver};
use jclear_scanner::logging;
use std::env;
use std::io;
use std::process;

fn main() {
    let config = match RuntimeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(driver::EX_CONFIG);
        }
    };

    if let Err(e) = logging::config::init_runtime_preferences(config.logging.clone()) {
        eprintln!("Warning: {}", e);
    }

    // Stdout carries tokens; log events only appear when asked for
    if config.logging.enable_console_logging {
        if let Err(e) = logging::init_global_logging() {
            eprintln!("Warning: logging unavailable: {}", e);
        }
    }

    let args: Vec<String> = env::args().skip(1).collect();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();

    let code = Driver::new(config).run(
        &args,
        stdin.lock(),
        &mut stdout.lock(),
        &mut stderr.lock(),
    );

    process::exit(code);
}

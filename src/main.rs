use std::process;

use tracing_subscriber::EnvFilter;

use vmc::cli;
use vmc::config::Config;
use vmc::storage::Storage;

/// Log filter variable.
const LOG_VAR: &str = "VMC_LOG";

/// Warnings only. Resolution warnings are printed by the CLI itself.
const DEFAULT_FILTER: &str = "warn,vmc::resolve=error";

fn main() {
    // Logs go to stderr so table output on stdout stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(LOG_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = Storage::default_root().unwrap_or_else(|| {
        eprintln!("Could not determine home directory.");
        process::exit(1);
    });

    let storage = match Storage::new(root) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Failed to initialize storage: {e}");
            process::exit(1);
        }
    };

    let config = match Config::load(storage.root()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    if let Err(e) = cli::run(&config, &storage) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

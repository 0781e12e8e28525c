use anyhow::Result;
use clap::Parser;
use std::io::{self, Write};
use std::path::Path;
use tracing::error;

use radiocarbon::analyzer::print_analysis_results;
use radiocarbon::patterns::PROVIDERS_FILE;
use radiocarbon::utils::{print_welcome, setup_logging, validate_args};
use radiocarbon::{analyze_leak_files, init_default_providers, Args};

// Fatal errors are returned from main so anyhow prints them to stderr even
// when logging is filtered out; the log line only carries the error kind.
fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    validate_args(&args)?;

    if args.init {
        if let Err(e) = init_default_providers(Path::new(PROVIDERS_FILE)) {
            error!(kind = e.kind(), "Provider initialization failed");
            return Err(e.into());
        }
        println!("Created {} with default providers", PROVIDERS_FILE);
        return Ok(());
    }

    if !args.json {
        print_welcome();
    }

    match analyze_leak_files(&args) {
        Ok(report) => {
            let stdout = io::stdout();
            let mut out = stdout.lock();
            print_analysis_results(&report, &args, &mut out)?;
            out.flush()?;
            Ok(())
        }
        Err(e) => {
            error!(kind = e.kind(), "Analysis failed");
            Err(e.into())
        }
    }
}

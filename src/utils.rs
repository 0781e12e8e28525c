use time::macros::format_description;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr so the report on stdout stays clean. `RUST_LOG` wins
/// over `verbose` when set.
pub fn setup_logging(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(LocalTime::new(format_description!(
            "[hour]:[minute]:[second].[subsecond digits:3]"
        )))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn format_number(num: u64) -> String {
    let digits = num.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn validate_args(args: &crate::args::Args) -> anyhow::Result<()> {
    if let Some(top) = args.top_years {
        if top == 0 {
            anyhow::bail!("--top-years must be greater than 0");
        }
    }

    if let Some(top) = args.top_tlds {
        if top == 0 {
            anyhow::bail!("--top-tlds must be greater than 0");
        }
    }

    if let Some(top) = args.top_words {
        if top == 0 {
            anyhow::bail!("--top-words must be greater than 0");
        }
    }

    Ok(())
}

pub fn print_welcome() {
    println!();
    println!(
        "  RadioCarbon v{} - Credential Leak Analyzer",
        env!("CARGO_PKG_VERSION")
    );
    println!("  Estimates age, region and origin of leaked credentials");
    println!();
}

use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use vulnsummary::cli::{self, Commands};

fn main() {
    let cli = cli::Cli::parse();

    // Initialize logging
    let log_level = match (cli.quiet, cli.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_ansi(!cli.no_color)
        .init();

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    debug!(
        version = env!("CARGO_PKG_VERSION"),
        built = env!("BUILD_TIMESTAMP"),
        git = option_env!("GIT_HASH").unwrap_or("unknown"),
        "Starting"
    );

    let result = match cli.command {
        Some(Commands::Summarize(args)) => cli::summarize::handle_summarize(args, cli.quiet),
        Some(Commands::Validate(args)) => cli::validate::handle_validate(args),
        None => cli::summarize::handle_summarize(Default::default(), cli.quiet),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use framespin::cli::{
    commands::{Cli, Commands},
    completions::generate_completions,
    run::run_check,
};
use framespin::tui;

fn setup_logging(verbosity: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbosity {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Stderr, so log lines never land inside the alternate screen.
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::View { source_args, demo } => {
            let (sources, manifest_demo) = source_args.resolve()?;
            tui::run(sources, demo || manifest_demo, source_args.max_retries)?;
        }

        Commands::Check {
            source_args,
            parallel,
        } => {
            run_check(source_args, parallel).await?;
        }

        Commands::Completions { shell } => {
            generate_completions(shell);
        }
    }

    Ok(())
}

#![allow(clippy::print_stderr)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::IsTerminal;

use gendump::cli::args::CliArgs;
use gendump::cli::config::ResolvedOptions;
use gendump::cli::{driver, reporter::Reporter};

fn main() -> Result<()> {
    // Initialize tracing if GENDUMP_LOG or RUST_LOG is set.
    // Supports GENDUMP_LOG_FORMAT=tree|json|text (see src/tracing_config.rs).
    gendump::tracing_config::init_tracing();

    let args = CliArgs::parse();
    let cwd = std::env::current_dir().context("failed to resolve current directory")?;
    let options = driver::load_options(&args, &cwd)?;

    if args.show_config {
        return handle_show_config(&options);
    }

    let summary = driver::run(&options)?;

    let pretty = args
        .pretty
        .unwrap_or_else(|| std::io::stderr().is_terminal());
    let reporter = Reporter::new(pretty);
    // render() already ends every line with a newline
    eprint!("{}", reporter.render(&summary.diagnostics));
    eprintln!("{}", reporter.render_summary(&summary));

    if let Some(path) = &args.summary {
        driver::write_summary(path, &summary)?;
    }

    println!("Done!");
    Ok(())
}

fn handle_show_config(options: &ResolvedOptions) -> Result<()> {
    let json = serde_json::to_string_pretty(options).context("failed to serialize config")?;
    println!("{json}");
    Ok(())
}

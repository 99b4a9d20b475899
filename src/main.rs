use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;
use strqueue::cli::{load_script, Cli, Commands, RunArgs, ScriptRunner};
use strqueue::config::Config;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments first to get debug flag
    let cli = Cli::parse();

    // Registry trace events are emitted at DEBUG by default, so they only show with --debug
    let level = if cli.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    match cli.command {
        Commands::Run(args) => run_script_command(&config, &args).await?,
        Commands::Show => handle_show_command(&config, cli.config.as_deref())?,
    }

    Ok(())
}

/// Execute a script against a fresh registry and print one line per step
async fn run_script_command(config: &Config, args: &RunArgs) -> Result<()> {
    let steps = load_script(&args.script).await?;
    let format = args.format.unwrap_or(config.output.format);

    let mut runner = ScriptRunner::new(config.trace.observer()?);
    for result in runner.run(&steps) {
        println!("{}", result.render(format)?);
    }

    let remaining = runner.finish();
    info!("Script finished with {} live queues", remaining);
    Ok(())
}

/// Handle show command
fn handle_show_command(config: &Config, path: Option<&Path>) -> Result<()> {
    match path {
        Some(path) => println!("Config file: {}", path.display()),
        None => println!("Config file: {} (if present)", strqueue::config::DEFAULT_CONFIG_PATH),
    }
    println!("\nTrace config:");
    println!("  enabled: {}", config.trace.enabled);
    println!("  level: {}", config.trace.level()?);
    println!("\nOutput config:");
    println!("  format: {:?}", config.output.format);

    Ok(())
}

//! logcon - Entry Point

use clap::Parser;
use logcon::config::{self, ResolvedConfig};
use logcon::source::StdinSource;
use logcon::view::{install_panic_hook, Console, CrosstermDriver};
use logcon::ConsoleError;
use std::path::PathBuf;
use tracing::{info, warn};

/// Interactive terminal log console
#[derive(Parser, Debug)]
#[command(name = "logcon")]
#[command(version)]
#[command(about = "Scrollable terminal log console with details view and command line")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Maximum number of retained log entries (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub capacity: Option<u64>,

    /// Sleep between poll-loop iterations, in milliseconds
    #[arg(long)]
    pub poll_interval_ms: Option<u64>,
}

/// Defaults → Config File → Env Vars → CLI Args
fn resolve_config(args: &Args) -> Result<ResolvedConfig, config::ConfigError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file);
    let with_env = config::apply_env_overrides(merged);

    let capacity = args
        .capacity
        .map(|c| usize::try_from(c).unwrap_or(usize::MAX));
    let resolved = config::apply_cli_overrides(with_env, capacity, args.poll_interval_ms);
    resolved.validate()?;
    Ok(resolved)
}

fn main() -> Result<(), ConsoleError> {
    let args = Args::parse();
    let config = resolve_config(&args)?;

    logcon::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    install_panic_hook();

    let driver = CrosstermDriver::new()?;
    let mut console = Console::new(driver, config.console_options())?.with_command_handler(
        |command: &str| {
            info!(command, "Command submitted");
        },
    );

    console.log(
        "logcon started",
        Some(format!(
            "Buffer capacity: {}\nPoll interval: {}ms\nTrace log: {}",
            config.buffer_capacity,
            config.poll_interval_ms,
            config.log_file_path.display()
        )),
    );

    console.run()?;

    if let Some(source) = StdinSource::piped() {
        if let Err(e) = source.spawn_forwarder(console.handle()) {
            warn!(error = %e, "Could not start stdin forwarder");
        }
    }

    console.wait()?;
    info!("Console closed");
    Ok(())
}

use anyhow::Context;
use clap::{Parser, Subcommand};
use skycast_core::{Config, Permission, pipeline};

use crate::board::Board;
use crate::ui;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Terminal forecast board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key.
    Configure,

    /// Show the forecast board for this machine's location (the default).
    Show,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command.unwrap_or(Command::Show) {
            Command::Configure => configure(),
            Command::Show => show().await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeatherMap API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    config.set_api_key(api_key);
    config.save()?;

    println!("Saved to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show() -> anyhow::Result<()> {
    let config = Config::load()?;
    let services = pipeline::Services::from_config(&config)?;

    let permission = request_permission()?;

    let (tx, rx) = std::sync::mpsc::channel();
    let mut board = Board::new(permission);

    tokio::spawn(async move {
        pipeline::run(permission, &services, &tx).await;
    });

    ui::run(&mut board, rx)
}

/// The consent gate: one prompt per launch, default yes. A denial is
/// final for the run; there is no re-prompt.
fn request_permission() -> anyhow::Result<Permission> {
    let granted = inquire::Confirm::new("Allow skycast to use your approximate location?")
        .with_default(true)
        .prompt()
        .context("Failed to read the consent prompt answer")?;

    if granted {
        Ok(Permission::Granted)
    } else {
        tracing::info!("location permission denied; skipping the fetch pipeline");
        Ok(Permission::Denied)
    }
}

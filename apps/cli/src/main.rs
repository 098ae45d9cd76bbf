#![allow(clippy::print_stdout)]

pub mod args;
pub mod handlers;

use crate::args::{Cli, Commands, SettingsAction};
use crate::handlers::{scrub, settings};

use anyhow::{Context, Result};
use clap::Parser;
use demoji::Engine;
use demoji::domain::config::AppConfig;
use demoji::kernel::config::load_config;
use demoji_logger::Logger;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let cfg: AppConfig =
        load_config(cli.config.as_deref()).context("Critical: Configuration is malformed")?;
    let _log = Logger::from_config(env!("CARGO_PKG_NAME"), &cfg.logging)?;

    let engine = Engine::open(cfg).await.context("Failed to open the filter engine")?;

    match cli.command {
        Commands::Scrub { file, format, notify } => {
            scrub::scrub_file(&engine, &file, format, &notify).await?;
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show {} => settings::show(&engine).await?,
            SettingsAction::Init {} => settings::init(&engine).await?,
            SettingsAction::Set { enabled, allow, block } => {
                settings::set(&engine, enabled, allow, block).await?;
            },
        },
    }

    Ok(())
}

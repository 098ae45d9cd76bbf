use anyhow::{Context, Result, bail};
use demoji::Engine;
use demoji::domain::StateUpdate;
use tracing::info;

pub async fn show(engine: &Engine) -> Result<()> {
    let view = engine.editor().load().await.context("Failed to read settings")?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

pub async fn init(engine: &Engine) -> Result<()> {
    let written = engine.editor().install().await.context("Failed to install defaults")?;
    info!(written, path = %engine.store().path().display(), "Default settings checked");
    Ok(())
}

pub async fn set(
    engine: &Engine,
    enabled: Option<bool>,
    allow: Option<String>,
    block: Option<String>,
) -> Result<()> {
    let update = StateUpdate { enabled, allow_list: allow, block_list: block };
    if update.is_empty() {
        bail!("Nothing to change: pass --enabled, --allow or --block");
    }
    engine.editor().apply(update).await.context("Failed to save settings")?;
    show(engine).await
}

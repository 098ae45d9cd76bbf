use crate::args::OutputFormat;
use anyhow::{Context, Result, bail};
use demoji::Engine;
use demoji::coordinator::{Mode, SharedDocument};
use demoji::dom::Document;
use std::path::Path;
use tracing::{info, warn};

/// Loads `file`, runs one filter session over it and prints the outcome.
///
/// Each entry of `notify` is relayed to the session as a raw configuration-change
/// notification once the first pass is done; unrecognised ones are skipped.
pub async fn scrub_file(
    engine: &Engine,
    file: &Path,
    format: OutputFormat,
    notify: &[String],
) -> Result<()> {
    let source = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))?;

    let doc = SharedDocument::new(Document::parse_html(&source));
    let (mut session, inbox) = engine.attach(&file.display().to_string());
    let relay = engine.relay();

    let notifications = async {
        let mut applied = 0usize;
        for raw in notify {
            match relay.forward_raw(raw).await {
                Some(_) => applied += 1,
                None => warn!(%raw, "Not a configuration change; skipped"),
            }
        }
        let _ = relay.shutdown();
        applied
    };
    let (mode, applied) = tokio::join!(session.run(&doc, inbox), notifications);

    if !notify.is_empty() && applied == 0 {
        bail!("No configuration change among the notifications");
    }
    if mode == Mode::Idle {
        info!(file = %file.display(), "Filtering is disabled; document left unchanged");
    }

    let output = doc.read(|doc| match format {
        OutputFormat::Html => doc.to_html(),
        OutputFormat::Text => {
            doc.document_element().map(|root| doc.text_content(root)).unwrap_or_default()
        },
    });
    println!("{output}");
    Ok(())
}

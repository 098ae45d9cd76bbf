use std::path::Path;
use std::time::{Duration, SystemTime};
use tokio::fs;
use tracing::{info, warn};

/// Marker embedded in temp file names; `<file>.demojitmp.<n>`.
pub(crate) const TMP_MARKER: &str = ".demojitmp.";

const STALE_AFTER: Duration = Duration::from_secs(300);

/// Removes temp files left next to `target` by writes that never reached the rename.
///
/// Non-critical: failures are logged and otherwise ignored.
pub(crate) async fn purge_tmp(target: &Path) {
    let file_name = target.file_name().and_then(|n| n.to_str());
    let (Some(dir), Some(file_name)) = (target.parent(), file_name) else {
        return;
    };
    let dir = if dir.as_os_str().is_empty() { Path::new(".") } else { dir };
    let prefix = format!("{file_name}{TMP_MARKER}");

    let Ok(mut entries) = fs::read_dir(dir).await else {
        return;
    };

    let now = SystemTime::now();
    let mut removed = 0usize;
    let mut failed = 0usize;

    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_ours = entry.file_name().to_str().is_some_and(|name| name.starts_with(&prefix));
        if !is_ours || !is_stale(&entry, now).await {
            continue;
        }
        match fs::remove_file(entry.path()).await {
            Ok(()) => removed += 1,
            Err(e) => {
                warn!(p = %entry.path().display(), err = %e, "IO fail");
                failed += 1;
            },
        }
    }

    if removed > 0 || failed > 0 {
        info!(removed, failed, "Cleaned up temporary files");
    }
}

async fn is_stale(entry: &fs::DirEntry, now: SystemTime) -> bool {
    entry
        .metadata()
        .await
        .ok()
        .and_then(|m| m.modified().ok())
        .and_then(|modified| now.duration_since(modified).ok())
        .is_none_or(|age| age > STALE_AFTER)
}

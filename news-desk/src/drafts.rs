use crate::types::Result;
use chrono::Local;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

pub const DRAFT_SEPARATOR: &str = "\n\n---\n\n";

/// Human-readable audit trail of generated drafts: the latest one, overwritten
/// each cycle, and an append-only archive.
#[derive(Debug, Clone)]
pub struct DraftArchive {
    latest_path: PathBuf,
    archive_path: PathBuf,
}

impl DraftArchive {
    pub fn new(latest_path: impl Into<PathBuf>, archive_path: impl Into<PathBuf>) -> Self {
        Self {
            latest_path: latest_path.into(),
            archive_path: archive_path.into(),
        }
    }

    pub fn latest_path(&self) -> &Path {
        &self.latest_path
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Joins the posts, overwrites the latest draft and appends to the archive.
    pub async fn save(&self, texts: &[String]) -> Result<String> {
        let content = texts.join(DRAFT_SEPARATOR);

        fs::write(&self.latest_path, &content).await?;

        let entry = format!(
            "\n\n--- [{}] ---\n\n{}",
            Local::now().format("%Y-%m-%d %H:%M"),
            content
        );
        let mut archive = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.archive_path)
            .await?;
        archive.write_all(entry.as_bytes()).await?;
        archive.flush().await?;

        info!(
            "Draft saved to {} and appended to {}",
            self.latest_path.display(),
            self.archive_path.display()
        );
        Ok(content)
    }

    /// The trimmed latest draft, or `None` when the file is missing or blank.
    pub async fn read_latest(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.latest_path).await {
            Ok(content) => {
                let content = content.trim();
                Ok((!content.is_empty()).then(|| content.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("No draft found at {}", self.latest_path.display());
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }
}

//! Local file sink.
//!
//! Writes one record per line to a single file. The file is recreated on
//! every run:
//!
//! ```text
//! results.txt
//! url='https://www.otodom.pl/pl/oferta/...' price='650000' size='48' ...
//! url='https://www.otodom.pl/pl/oferta/...' price='720000' size='55' ...
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::io::AsyncWriteExt;

use crate::error::Result;
use crate::models::{Estate, OutputConfig, OutputFormat};
use crate::storage::{ResultSink, WriteSummary};

/// Line-per-record file sink.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
    format: OutputFormat,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            path: path.into(),
            format,
        }
    }

    pub fn from_config(config: &OutputConfig) -> Self {
        Self::new(config.results_file.clone(), config.format)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// One newline-terminated line per estate.
    fn render(&self, estates: &[Estate]) -> Result<String> {
        let mut out = String::new();
        for estate in estates {
            let line = match self.format {
                OutputFormat::Text => estate.to_string().replace('\n', " "),
                OutputFormat::Json => serde_json::to_string(estate)?,
            };
            out.push_str(&line);
            out.push('\n');
        }
        Ok(out)
    }

    /// Sibling temp file: the full file name with `.tmp` appended.
    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    /// Write bytes atomically (write to temp, then rename).
    ///
    /// The temp file is removed if either step fails.
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.temp_path();
        let written = async {
            let mut file = tokio::fs::File::create(&tmp).await?;
            file.write_all(bytes).await?;
            file.flush().await?;
            drop(file);
            tokio::fs::rename(&tmp, &self.path).await
        }
        .await;

        if let Err(e) = written {
            if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
                log::debug!("Could not remove {}: {cleanup}", tmp.display());
            }
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ResultSink for FileSink {
    async fn write_estates(&self, estates: &[Estate]) -> Result<WriteSummary> {
        let content = self.render(estates)?;
        self.write_bytes(content.as_bytes()).await?;

        log::info!(
            "Wrote {} estates to {}",
            estates.len(),
            self.path.display()
        );

        Ok(WriteSummary {
            record_count: estates.len(),
            location: self.path.display().to_string(),
            timestamp: Utc::now(),
        })
    }
}

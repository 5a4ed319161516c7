use std::io;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};
use translator_domain::AudioFormat;

const STAGING_PREFIX: &str = "voice-translator-";

/// Uploaded audio held on disk for the duration of one request.
///
/// The backing file is created with a collision-free name and removed when the
/// value is dropped, whichever path the request takes out of the use case. A
/// dropped request future (client disconnect) releases it the same way.
pub struct StagedAudio {
    file: Option<NamedTempFile>,
    path: PathBuf,
    format: AudioFormat,
    size: usize,
}

impl StagedAudio {
    /// Reserves an empty staging file; `dir` falls back to the system temp dir.
    pub fn create(dir: Option<&Path>, format: AudioFormat) -> io::Result<Self> {
        let suffix = format!(".{}", format.extension());
        let mut builder = Builder::new();
        builder.prefix(STAGING_PREFIX).suffix(&suffix);
        let file = match dir {
            Some(dir) => builder.tempfile_in(dir)?,
            None => builder.tempfile()?,
        };
        let path = file.path().to_path_buf();
        tracing::debug!(path = %path.display(), "reserved staging file");

        Ok(Self {
            file: Some(file),
            path,
            format,
            size: 0,
        })
    }

    pub async fn write(&mut self, bytes: &[u8]) -> io::Result<()> {
        tokio::fs::write(&self.path, bytes).await?;
        self.size = bytes.len();
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for StagedAudio {
    fn drop(&mut self) {
        let Some(file) = self.file.take() else {
            return;
        };
        match file.close() {
            Ok(()) => tracing::info!(path = %self.path.display(), "cleaned up staged audio"),
            Err(err) => tracing::warn!(
                path = %self.path.display(),
                error = %err,
                "failed to delete staged audio"
            ),
        }
    }
}

//! Saving generated images.
//!
//! Copying to a clipboard or triggering a browser download belongs to the
//! frontend; it plugs in through [`ImageSink`].

use crate::providers::http_client;
use crate::Error;
use chrono::{DateTime, Utc};
use reqwest::Client;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// File name for a downloaded image.
pub fn download_file_name(now: DateTime<Utc>) -> String {
    format!("generated-image-{}.png", now.timestamp_millis())
}

/// Destination for generated images.
#[async_trait::async_trait]
pub trait ImageSink: Send + Sync {
    /// Store the image at `url` under `file_name`, returning where it went.
    async fn save(&self, url: &str, file_name: &str) -> Result<PathBuf, Error>;
}

/// Downloads images into a directory.
pub struct DirectorySink {
    client: Client,
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, Error> {
        Ok(Self {
            client: http_client()?,
            dir: dir.into(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path for `file_name` inside the sink directory. Only a single plain
    /// file name is accepted.
    fn target(&self, file_name: &str) -> Result<PathBuf, Error> {
        let mut components = Path::new(file_name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(name)), None) => Ok(self.dir.join(name)),
            _ => Err(Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{file_name}' is not a plain file name"),
            ))),
        }
    }
}

#[async_trait::async_trait]
impl ImageSink for DirectorySink {
    async fn save(&self, url: &str, file_name: &str) -> Result<PathBuf, Error> {
        let path = self.target(file_name)?;
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Transport {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, &bytes).await?;

        info!(path = %path.display(), size = bytes.len(), "saved generated image");
        Ok(path)
    }
}

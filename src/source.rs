//! Dataset sources
//!
//! A [`DatasetSource`] hands back the raw bytes of an ATT&CK bundle. The
//! cache layer decides when to call it; sources never touch the disk.

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

use crate::error::{Error, Result};

/// Upper bound on the buffer reserved up front from `Content-Length`
const MAX_PREALLOC: u64 = 64 << 20;

/// Enterprise ATT&CK bundle in the mitre/cti repository
pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/mitre/cti/master/enterprise-attack/enterprise-attack.json";

/// Something that can produce the dataset bytes on demand
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Fetch the complete dataset document
    async fn fetch(&self) -> Result<Vec<u8>>;

    /// Human-readable origin, used in log lines and error messages
    fn location(&self) -> String;
}

/// Downloads the dataset over HTTP(S)
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
    show_progress: bool,
}

impl HttpSource {
    /// Create a source for `url` with a whole-request timeout
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("attack-search/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::retrieval(url.clone(), e))?;

        Ok(Self {
            client,
            url,
            show_progress: false,
        })
    }

    /// Draw a byte progress bar on stderr while downloading
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    fn progress_bar(&self, total: Option<u64>) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = match total {
            Some(len) => {
                let pb = ProgressBar::new(len);
                pb.set_style(
                    ProgressStyle::default_bar()
                        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec})")
                        .unwrap()
                        .progress_chars("=>-"),
                );
                pb
            }
            None => {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner} {bytes} downloaded ({bytes_per_sec})")
                        .unwrap(),
                );
                pb
            }
        };
        pb.set_draw_target(ProgressDrawTarget::stderr());
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

#[async_trait]
impl DatasetSource for HttpSource {
    async fn fetch(&self) -> Result<Vec<u8>> {
        log::info!("Downloading dataset from {}", self.url);

        let mut response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::retrieval(self.location(), e))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(Error::retrieval(self.location(), format!("HTTP {}", status)));
        }

        let total = response.content_length();
        let pb = self.progress_bar(total);
        // The header is untrusted; grow past the cap only as bytes arrive
        let mut body = Vec::with_capacity(total.map_or(0, |n| n.min(MAX_PREALLOC)) as usize);

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| Error::retrieval(self.location(), e))?
        {
            body.extend_from_slice(&chunk);
            pb.set_position(body.len() as u64);
        }
        pb.finish_and_clear();

        log::info!("Downloaded {} bytes from {}", body.len(), self.url);
        Ok(body)
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

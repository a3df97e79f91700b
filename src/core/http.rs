//! Blocking HTTP access to remote data sources.
//!
//! Metadata calls (`get_text`, `get_json`) read the whole body. Data files are
//! streamed to disk through a temp file so a failed transfer never leaves a
//! truncated file under its final name.

use crate::error::{Error, Result};
use crate::utils::io;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use reqwest::blocking::{Client, Response};
use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;
use std::time::Duration;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const CONNECT_TIMEOUT_SECS: u64 = 30;
// Leaves room for the byte counters within an 80-column line.
const PROGRESS_BAR_COLUMNS: u16 = 30;

/// Post-download step: `(downloaded_file, final_outfile)`.
pub type Handler<'a> = dyn Fn(&Path, &Path) -> Result<()> + 'a;

/// HTTP client shared by every source in a store.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    mirrors: Vec<(String, String)>,
}

impl HttpClient {
    pub fn new() -> Result<Self> {
        // No whole-request timeout: some releases are several gigabytes.
        let client = Client::builder()
            .user_agent(format!("wags-tails/{}", VERSION))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(None)
            .build()
            .map_err(|e| Error::internal_io(e.to_string(), Some("create HTTP client".to_string())))?;

        Ok(Self {
            client,
            mirrors: Vec::new(),
        })
    }

    /// Redirect every URL starting with `origin` to `replacement`.
    ///
    /// Later registrations take precedence over earlier ones.
    pub fn with_mirror(mut self, origin: impl Into<String>, replacement: impl Into<String>) -> Self {
        self.mirrors.insert(0, (origin.into(), replacement.into()));
        self
    }

    /// Apply mirror rewrites to a URL.
    pub fn resolve(&self, url: &str) -> String {
        for (origin, replacement) in &self.mirrors {
            if let Some(rest) = url.strip_prefix(origin.as_str()) {
                return format!("{}{}", replacement, rest);
            }
        }
        url.to_string()
    }

    fn send(&self, url: &str, headers: &HeaderMap) -> Result<Response> {
        let resolved = self.resolve(url);
        let response = self
            .client
            .get(&resolved)
            .headers(headers.clone())
            .send()
            .map_err(|e| Error::remote_http(&resolved, e.status().map(|s| s.as_u16()), e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::remote_http(
                resolved,
                Some(status.as_u16()),
                body.chars().take(200).collect::<String>(),
            ));
        }

        Ok(response)
    }

    pub fn get_text(&self, url: &str) -> Result<String> {
        let response = self.send(url, &HeaderMap::new())?;
        response
            .text()
            .map_err(|e| Error::remote_http(self.resolve(url), None, e.to_string()))
    }

    /// Fetch and decode a metadata payload published by `source`.
    ///
    /// A body that does not decode as `T` is a `source.remote_data` error.
    pub fn get_json<T: DeserializeOwned>(&self, source: &str, url: &str) -> Result<T> {
        let body = self.get_text(url)?;
        serde_json::from_str(&body).map_err(|e| {
            Error::source_remote_data(
                source,
                format!("Unexpected JSON payload: {}", e),
                Some(url.to_string()),
            )
        })
    }

    /// Stream `url` to `outfile`, optionally routing through a post-download handler.
    pub fn download(
        &self,
        url: &str,
        outfile: &Path,
        handler: Option<&Handler<'_>>,
        silent: bool,
    ) -> Result<()> {
        self.download_with_headers(url, outfile, &HeaderMap::new(), handler, silent)
    }

    /// [`download`](Self::download) with extra request headers (auth tokens, `Accept`).
    pub fn download_with_headers(
        &self,
        url: &str,
        outfile: &Path,
        headers: &HeaderMap,
        handler: Option<&Handler<'_>>,
        silent: bool,
    ) -> Result<()> {
        let response = self.send(url, headers)?;
        let total = response.content_length();

        if !silent {
            log_status!("download", "Downloading {}", basename(url));
        }
        let bar = progress_bar(total, silent);

        match handler {
            Some(handler) => {
                let mut staged = tempfile::NamedTempFile::new().map_err(|e| {
                    Error::internal_io(e.to_string(), Some("create download temp file".to_string()))
                })?;
                copy_with_progress(response, staged.as_file_mut(), &bar, url)?;
                bar.finish_and_clear();
                handler(staged.path(), outfile)
            }
            None => {
                let mut staged = io::temp_file_beside(outfile, "download")?;
                copy_with_progress(response, staged.as_file_mut(), &bar, url)?;
                bar.finish_and_clear();
                io::persist(staged, outfile, "download")
            }
        }
    }
}

fn copy_with_progress(response: Response, file: &mut File, bar: &ProgressBar, url: &str) -> Result<()> {
    let mut reader = bar.wrap_read(response);
    std::io::copy(&mut reader, file)
        .map(|_| ())
        .map_err(|e| Error::internal_io(e.to_string(), Some(format!("write download from {}", url))))
}

fn progress_bar(total: Option<u64>, silent: bool) -> ProgressBar {
    if silent {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::with_draw_target(total, ProgressDrawTarget::stderr_with_hz(10));
    let template = if total.is_some() {
        format!(
            "{{bar:{}}} {{binary_bytes}}/{{binary_total_bytes}} [{{elapsed_precise}}<{{eta_precise}}, {{binary_bytes_per_sec}}]",
            PROGRESS_BAR_COLUMNS
        )
    } else {
        "{spinner} {binary_bytes} [{elapsed_precise}, {binary_bytes_per_sec}]".to_string()
    };
    if let Ok(style) = ProgressStyle::with_template(&template) {
        bar.set_style(style.progress_chars("█▉▊▋▌▍▎▏ "));
    }
    bar
}

/// Last path segment of a URL, without query string.
pub fn basename(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path)
}

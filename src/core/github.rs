//! Sources published as GitHub releases, versioned by tag name.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use serde::Deserialize;

pub(crate) const API_BASE: &str = "https://api.github.com";
pub(crate) const WEB_BASE: &str = "https://github.com";

#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Tag of the release GitHub marks as latest.
pub(crate) fn latest_tag(http: &HttpClient, source: &str, repo: &str) -> Result<String> {
    let url = format!("{}/repos/{}/releases/latest", API_BASE, repo);
    let release: Release = http.get_json(source, &url)?;
    if release.tag_name.trim().is_empty() {
        return Err(Error::source_remote_data(
            source,
            "Latest GitHub release has an empty tag name",
            Some(url),
        ));
    }
    Ok(release.tag_name)
}

/// Release tags in API order (newest first).
pub(crate) fn release_tags(http: &HttpClient, source: &str, repo: &str) -> Result<Vec<String>> {
    let url = format!("{}/repos/{}/releases", API_BASE, repo);
    let releases: Vec<Release> = http.get_json(source, &url)?;
    Ok(releases.into_iter().map(|r| r.tag_name).collect())
}

pub(crate) fn asset_url(repo: &str, tag: &str, asset: &str) -> String {
    format!("{}/{}/releases/download/{}/{}", WEB_BASE, repo, tag, asset)
}

pub(crate) fn tag_tarball_url(repo: &str, tag: &str) -> String {
    format!("{}/{}/archive/refs/tags/{}.tar.gz", WEB_BASE, repo, tag)
}

//! The data source contract.
//!
//! A source names its files `<name>_<version>.<filetype>` inside its data
//! directory. `get_latest` / `get_specific` decide between the local cache and a
//! fresh download; sources only supply version discovery and the download itself.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::paths;
use crate::version;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// A fetched (or cached) data file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFile {
    pub path: PathBuf,
    pub version: String,
}

/// Static description of a source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceMeta {
    pub name: &'static str,
    pub filetype: &'static str,
}

impl SourceMeta {
    pub const fn new(name: &'static str, filetype: &'static str) -> Self {
        Self { name, filetype }
    }

    /// `<name>_<version>.<filetype>`
    pub fn file_name(&self, version: &str) -> String {
        format!("{}_{}.{}", self.name, version, self.filetype)
    }

    /// `<name>_*.<filetype>`
    pub fn glob(&self) -> String {
        format!("{}_*.{}", self.name, self.filetype)
    }

    /// Recover the version from a cached file name, if it follows the naming scheme.
    pub fn version_of(&self, file_name: &str) -> Option<String> {
        let rest = file_name.strip_prefix(self.name)?.strip_prefix('_')?;
        let version = rest.strip_suffix(self.filetype)?.strip_suffix('.')?;
        (!version.is_empty()).then(|| version.to_string())
    }
}

/// Where a source keeps its files and how it talks to the network.
#[derive(Clone)]
pub struct DataStore {
    data_dir: PathBuf,
    silent: bool,
    http: HttpClient,
}

impl DataStore {
    /// Open the store for `source`, resolving and creating its data directory.
    pub fn open(source: &str, data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self {
            data_dir: paths::source_data_dir(source, data_dir)?,
            silent,
            http: HttpClient::new()?,
        })
    }

    pub fn with_http(mut self, http: HttpClient) -> Self {
        self.http = http;
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn silent(&self) -> bool {
        self.silent
    }

    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    /// Newest cached file matching `meta`'s naming scheme.
    pub fn latest_local(&self, meta: &SourceMeta) -> Result<DataFile> {
        let dir = glob::Pattern::escape(&self.data_dir.to_string_lossy());
        let pattern_str = format!("{}/{}", dir.trim_end_matches('/'), meta.glob());
        let no_data =
            || Error::source_no_local_data(meta.name, self.data_dir.display().to_string(), meta.glob());

        let entries = glob::glob(&pattern_str).map_err(|e| {
            Error::internal_unexpected(format!("invalid glob {}: {}", pattern_str, e))
        })?;

        let candidates: Vec<DataFile> = entries
            .filter_map(|entry| entry.ok())
            .filter(|path| path.is_file())
            .filter_map(|path| {
                let name = path.file_name()?.to_str()?.to_string();
                let version = meta.version_of(&name)?;
                Some(DataFile { path, version })
            })
            .collect();

        candidates
            .into_iter()
            .max_by(|a, b| version::compare(&a.version, &b.version))
            .ok_or_else(no_data)
    }

    /// Cached file for one version, if present.
    pub fn local_version(&self, meta: &SourceMeta, version: &str) -> Option<DataFile> {
        let path = self.data_dir.join(meta.file_name(version));
        path.is_file().then(|| DataFile {
            path,
            version: version.to_string(),
        })
    }
}

/// Access tool for one data source.
pub trait DataSource {
    fn meta(&self) -> SourceMeta;

    fn store(&self) -> &DataStore;

    /// Newest version available from the remote.
    fn latest_version(&self) -> Result<String>;

    /// Fetch `version` into `outfile`.
    fn download(&self, version: &str, outfile: &Path) -> Result<()>;

    fn data_dir(&self) -> &Path {
        self.store().data_dir()
    }

    /// Extra files published with `file` for the same version, cached beside it.
    fn companions(&self, _file: &DataFile) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Version-aware view of this source, for those that support older releases.
    fn as_versioned(&self) -> Option<&dyn VersionedSource> {
        None
    }

    /// Get the latest version of the data.
    ///
    /// * `from_local`: use the newest local file, never touch the network
    /// * `force_refresh`: download even if the latest version is cached
    ///
    /// Setting both is an invalid-argument error.
    fn get_latest(&self, from_local: bool, force_refresh: bool) -> Result<DataFile> {
        if from_local && force_refresh {
            return Err(Error::conflicting_fetch_flags());
        }

        let meta = self.meta();
        let store = self.store();

        if from_local {
            return store.latest_local(&meta);
        }

        let latest = self.latest_version()?;
        fetch_version(self, &meta, &latest, force_refresh)
    }
}

/// A source whose older releases can also be retrieved.
pub trait VersionedSource: DataSource {
    /// Remote versions, newest first.
    fn versions(&self) -> Result<Vec<String>>;

    /// Get one specific version of the data.
    ///
    /// Same flag semantics as [`DataSource::get_latest`], except `from_local` only
    /// accepts a cached copy of exactly `version`.
    fn get_specific(&self, version: &str, from_local: bool, force_refresh: bool) -> Result<DataFile> {
        if from_local && force_refresh {
            return Err(Error::conflicting_fetch_flags());
        }

        let meta = self.meta();
        let store = self.store();

        if from_local {
            return store.local_version(&meta, version).ok_or_else(|| {
                Error::source_no_local_data(
                    meta.name,
                    store.data_dir().display().to_string(),
                    meta.file_name(version),
                )
            });
        }

        fetch_version(self, &meta, version, force_refresh)
    }
}

fn fetch_version<S: DataSource + ?Sized>(
    source: &S,
    meta: &SourceMeta,
    version: &str,
    force_refresh: bool,
) -> Result<DataFile> {
    let store = source.store();

    if !force_refresh {
        if let Some(cached) = store.local_version(meta, version) {
            return Ok(cached);
        }
    }

    let outfile = store.data_dir().join(meta.file_name(version));
    if !store.silent() {
        log_status!(
            "fetch",
            "{} {} -> {}",
            meta.name,
            version,
            outfile.display()
        );
    }
    source.download(version, &outfile)?;

    Ok(DataFile {
        path: outfile,
        version: version.to_string(),
    })
}

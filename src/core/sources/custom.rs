//! Caller-defined source: version discovery and download are supplied as closures.
//!
//! ```ignore
//! let source = CustomData::new(
//!     "my_table",
//!     "tsv",
//!     Box::new(|| Ok("2024-01".to_string())),
//!     Box::new(|version, outfile| fetch_my_table(version, outfile)),
//!     None,
//!     true,
//! )?;
//! let file = source.get_latest(false, false)?;
//! ```

use crate::error::Result;
use crate::source::{DataSource, DataStore, SourceMeta};
use std::path::Path;

pub type LatestVersionFn = Box<dyn Fn() -> Result<String>>;
pub type DownloadFn = Box<dyn Fn(&str, &Path) -> Result<()>>;

pub struct CustomData {
    meta: SourceMeta,
    store: DataStore,
    latest_version_cb: LatestVersionFn,
    download_cb: DownloadFn,
}

impl CustomData {
    pub fn new(
        name: &'static str,
        filetype: &'static str,
        latest_version_cb: LatestVersionFn,
        download_cb: DownloadFn,
        data_dir: Option<&Path>,
        silent: bool,
    ) -> Result<Self> {
        Ok(Self {
            meta: SourceMeta::new(name, filetype),
            store: DataStore::open(name, data_dir, silent)?,
            latest_version_cb,
            download_cb,
        })
    }
}

impl DataSource for CustomData {
    fn meta(&self) -> SourceMeta {
        self.meta
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        (self.latest_version_cb)()
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        (self.download_cb)(version, outfile)
    }
}

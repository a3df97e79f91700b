//! Molecular Oncology Almanac knowledge base export.
//!
//! Releases are tagged on GitHub, but the API only exports the current database.

use crate::error::Result;
use crate::github;
use crate::source::{DataSource, DataStore, SourceMeta};
use std::path::Path;

const REPO: &str = "vanallenlab/moalmanac-db";
const EXPORT_URL: &str = "https://moalmanac.org/api/export";

pub struct MoaData {
    store: DataStore,
}

impl MoaData {
    pub const META: SourceMeta = SourceMeta::new("moalmanac", "json");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }
}

impl DataSource for MoaData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        github::latest_tag(self.store.http(), Self::META.name, REPO)
    }

    fn download(&self, _version: &str, outfile: &Path) -> Result<()> {
        self.store
            .http()
            .download(EXPORT_URL, outfile, None, self.store.silent())
    }
}

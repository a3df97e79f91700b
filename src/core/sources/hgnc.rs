//! HGNC complete set, from the monthly JSON archive.
//!
//! Versions are archive dates written `YYYYMMDD`.

use super::reformat_date;
use crate::error::{Error, Result};
use crate::listing;
use crate::source::{DataSource, DataStore, SourceMeta, VersionedSource};
use crate::version;
use std::path::Path;

const ARCHIVE_URL: &str = "https://ftp.ebi.ac.uk/pub/databases/genenames/hgnc/archive/monthly/json";
const ARCHIVE_ENTRY: &str = r"hgnc_complete_set_(\d{4}-\d{2}-\d{2})\.json";

pub struct HgncData {
    store: DataStore,
}

impl HgncData {
    pub const META: SourceMeta = SourceMeta::new("hgnc", "json");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    fn archive_versions(&self) -> Result<Vec<String>> {
        let index = self.store.http().get_text(&format!("{}/", ARCHIVE_URL))?;
        let mut versions = listing::versions_in_listing(&index, ARCHIVE_ENTRY)?
            .into_iter()
            .map(|date| reformat_date(Self::META.name, &date, "%Y-%m-%d", "%Y%m%d"))
            .collect::<Result<Vec<_>>>()?;
        version::sort_descending(&mut versions);
        Ok(versions)
    }
}

impl DataSource for HgncData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        self.archive_versions()?.into_iter().next().ok_or_else(|| {
            Error::source_remote_data(
                Self::META.name,
                "No HGNC complete set files found in monthly archive",
                Some(ARCHIVE_URL.to_string()),
            )
        })
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        let date = reformat_date(Self::META.name, version, "%Y%m%d", "%Y-%m-%d")?;
        let url = format!("{}/hgnc_complete_set_{}.json", ARCHIVE_URL, date);
        self.store
            .http()
            .download(&url, outfile, None, self.store.silent())
    }

    fn as_versioned(&self) -> Option<&dyn VersionedSource> {
        Some(self)
    }
}

impl VersionedSource for HgncData {
    fn versions(&self) -> Result<Vec<String>> {
        self.archive_versions()
    }
}

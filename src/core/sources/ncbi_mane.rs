//! NCBI MANE (Matched Annotation from NCBI and EMBL-EBI) summary table.

use crate::error::{Error, Result};
use crate::extract;
use crate::listing;
use crate::source::{DataSource, DataStore, SourceMeta, VersionedSource};
use crate::version;
use std::path::Path;

const MANE_URL: &str = "https://ftp.ncbi.nlm.nih.gov/refseq/MANE/MANE_human";

pub struct NcbiManeSummaryData {
    store: DataStore,
}

impl NcbiManeSummaryData {
    pub const META: SourceMeta = SourceMeta::new("ncbi_mane_summary", "txt");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    fn summary_url(version: &str) -> String {
        format!(
            "{}/release_{v}/MANE.GRCh38.v{v}.summary.txt.gz",
            MANE_URL,
            v = version
        )
    }
}

impl DataSource for NcbiManeSummaryData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        let url = format!("{}/current/", MANE_URL);
        let index = self.store.http().get_text(&url)?;
        let versions = listing::versions_in_listing(
            &index,
            r"MANE\.GRCh38\.v(\d+\.\d+)\.summary\.txt\.gz",
        )?;
        version::newest(versions.iter().map(String::as_str))
            .map(str::to_string)
            .ok_or_else(|| {
                Error::source_remote_data(
                    Self::META.name,
                    "No MANE summary file in current release directory",
                    Some(url),
                )
            })
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        self.store.http().download(
            &Self::summary_url(version),
            outfile,
            Some(&extract::gunzip),
            self.store.silent(),
        )
    }

    fn as_versioned(&self) -> Option<&dyn VersionedSource> {
        Some(self)
    }
}

impl VersionedSource for NcbiManeSummaryData {
    fn versions(&self) -> Result<Vec<String>> {
        let index = self.store.http().get_text(&format!("{}/", MANE_URL))?;
        let mut versions = listing::versions_in_listing(&index, r"release_(\d+\.\d+)")?;
        version::sort_descending(&mut versions);
        Ok(versions)
    }
}

//! Ensembl human gene annotation (GFF3).

use crate::error::{Error, Result};
use crate::extract;
use crate::http::HttpClient;
use crate::listing;
use crate::source::{DataSource, DataStore, SourceMeta, VersionedSource};
use crate::version;
use serde::Deserialize;
use std::path::Path;

const REST_URL: &str = "https://rest.ensembl.org/info/data/?content-type=application/json";
const FTP_URL: &str = "https://ftp.ensembl.org/pub";

#[derive(Debug, Deserialize)]
struct DataInfo {
    releases: Vec<u32>,
}

/// Newest release number reported by the Ensembl REST API.
pub(crate) fn latest_release(http: &HttpClient, source: &str) -> Result<String> {
    let info: DataInfo = http.get_json(source, REST_URL)?;
    info.releases
        .into_iter()
        .max()
        .map(|release| release.to_string())
        .ok_or_else(|| {
            Error::source_remote_data(
                source,
                "Ensembl REST data info lists no releases",
                Some(REST_URL.to_string()),
            )
        })
}

pub struct EnsemblData {
    store: DataStore,
}

impl EnsemblData {
    pub const META: SourceMeta = SourceMeta::new("ensembl", "gff3");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    fn gff3_url(version: &str) -> String {
        format!(
            "{}/release-{v}/gff3/homo_sapiens/Homo_sapiens.GRCh38.{v}.gff3.gz",
            FTP_URL,
            v = version
        )
    }
}

impl DataSource for EnsemblData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        latest_release(self.store.http(), Self::META.name)
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        self.store.http().download(
            &Self::gff3_url(version),
            outfile,
            Some(&extract::gunzip),
            self.store.silent(),
        )
    }

    fn as_versioned(&self) -> Option<&dyn VersionedSource> {
        Some(self)
    }
}

impl VersionedSource for EnsemblData {
    fn versions(&self) -> Result<Vec<String>> {
        let index = self.store.http().get_text(&format!("{}/", FTP_URL))?;
        let mut versions = listing::versions_in_listing(&index, r"release-(\d+)")?;
        version::sort_descending(&mut versions);
        Ok(versions)
    }
}

//! Drugs@FDA bulk export from openFDA.

use super::reformat_date;
use crate::error::{Error, Result};
use crate::extract;
use crate::source::{DataSource, DataStore, SourceMeta};
use serde::Deserialize;
use std::path::Path;

const DOWNLOAD_INDEX: &str = "https://api.fda.gov/download.json";

#[derive(Debug, Deserialize)]
struct DownloadIndex {
    results: IndexResults,
}

#[derive(Debug, Deserialize)]
struct IndexResults {
    drug: DrugEndpoints,
}

#[derive(Debug, Deserialize)]
struct DrugEndpoints {
    drugsfda: Export,
}

#[derive(Debug, Deserialize)]
struct Export {
    export_date: String,
    partitions: Vec<Partition>,
}

#[derive(Debug, Deserialize)]
struct Partition {
    file: String,
}

pub struct DrugsAtFdaData {
    store: DataStore,
}

impl DrugsAtFdaData {
    pub const META: SourceMeta = SourceMeta::new("drugsatfda", "json");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    fn export(&self) -> Result<(String, Export)> {
        let index: DownloadIndex = self.store.http().get_json(Self::META.name, DOWNLOAD_INDEX)?;
        let export = index.results.drug.drugsfda;
        let version = reformat_date(Self::META.name, &export.export_date, "%Y-%m-%d", "%Y%m%d")?;
        Ok((version, export))
    }
}

impl DataSource for DrugsAtFdaData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        self.export().map(|(version, _)| version)
    }

    /// openFDA only publishes the current export; asking for any other date fails.
    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        let (current, export) = self.export()?;
        if current != version {
            return Err(Error::source_remote_data(
                Self::META.name,
                format!(
                    "openFDA currently serves export {}, not requested version {}",
                    current, version
                ),
                Some(DOWNLOAD_INDEX.to_string()),
            ));
        }

        let partition = export.partitions.first().ok_or_else(|| {
            Error::source_remote_data(
                Self::META.name,
                "Drugs@FDA export lists no partitions",
                Some(DOWNLOAD_INDEX.to_string()),
            )
        })?;

        let handler = |archive: &Path, out: &Path| {
            extract::unzip_member(Self::META.name, archive, out, "*.json")
        };
        self.store
            .http()
            .download(&partition.file, outfile, Some(&handler), self.store.silent())
    }
}

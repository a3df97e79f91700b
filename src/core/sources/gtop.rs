//! IUPHAR/BPS Guide to PHARMACOLOGY ligand tables.
//!
//! The site only publishes the current release. The ligand table is the main
//! file and the ligand ID mapping table is kept beside it.

use super::companion_file;
use crate::error::{Error, Result};
use crate::source::{DataFile, DataSource, DataStore, SourceMeta};
use regex::Regex;
use serde::Serialize;
use std::path::{Path, PathBuf};

const SITE_URL: &str = "https://www.guidetopharmacology.org";

/// Ligand table plus the ligand ID mapping table of the same release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GtoPLigandPaths {
    pub ligands: PathBuf,
    pub ligand_id_mapping: PathBuf,
    pub version: String,
}

pub struct GToPLigandData {
    store: DataStore,
}

impl GToPLigandData {
    pub const META: SourceMeta = SourceMeta::new("guidetopharmacology", "tsv");
    pub const MAPPING_META: SourceMeta = SourceMeta::new("gtop_ligand_id_mapping", "tsv");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    /// Latest ligand and ligand ID mapping tables.
    ///
    /// Same flag semantics as [`DataSource::get_latest`].
    pub fn get_latest_paths(&self, from_local: bool, force_refresh: bool) -> Result<GtoPLigandPaths> {
        let ligands = self.get_latest(from_local, force_refresh)?;
        let ligand_id_mapping = companion_file(
            &self.store,
            &Self::MAPPING_META,
            &ligands.version,
            from_local,
            |path| self.download_table("ligand_id_mapping.tsv", path),
        )?;

        Ok(GtoPLigandPaths {
            ligands: ligands.path,
            ligand_id_mapping,
            version: ligands.version,
        })
    }

    fn download_table(&self, table: &str, outfile: &Path) -> Result<()> {
        self.store.http().download(
            &format!("{}/DATA/{}", SITE_URL, table),
            outfile,
            None,
            self.store.silent(),
        )
    }
}

/// `Current Release Version 2024.1 (released ...)` -> `2024.1`
fn release_in_page(page: &str) -> Result<Option<String>> {
    let pattern = Regex::new(r"(?i)Current\s+Release\s+Version\s+(\d{4}\.\d+)")
        .map_err(|e| Error::internal_unexpected(e.to_string()))?;
    Ok(pattern
        .captures(page)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string()))
}

impl DataSource for GToPLigandData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        let url = format!("{}/", SITE_URL);
        let page = self.store.http().get_text(&url)?;
        release_in_page(&page)?.ok_or_else(|| {
            Error::source_remote_data(
                Self::META.name,
                "No 'Current Release Version' on the Guide to PHARMACOLOGY home page",
                Some(url),
            )
        })
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        let mapping = self
            .store
            .data_dir()
            .join(Self::MAPPING_META.file_name(version));
        self.download_table("ligand_id_mapping.tsv", &mapping)?;
        self.download_table("ligands.tsv", outfile)
    }

    fn companions(&self, file: &DataFile) -> Vec<PathBuf> {
        self.store
            .local_version(&Self::MAPPING_META, &file.version)
            .map(|mapping| vec![mapping.path])
            .unwrap_or_default()
    }
}

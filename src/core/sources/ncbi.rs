//! NCBI Gene info tables and the RefSeq human genome annotation.
//!
//! Both are served from the current state of the NCBI FTP tree, so only the latest
//! release can be fetched.

use super::{companion_file, reformat_date};
use crate::error::{Error, Result};
use crate::extract;
use crate::listing;
use crate::source::{DataFile, DataSource, DataStore, SourceMeta};
use crate::version;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub(super) const NCBI_FTP: &str = "https://ftp.ncbi.nlm.nih.gov";
const GENE_INFO_DIR: &str = "gene/DATA/GENE_INFO/Mammalia";
const GENE_INFO_FILE: &str = "Homo_sapiens.gene_info.gz";
const GENE_HISTORY_DIR: &str = "gene/DATA";
const GENE_HISTORY_FILE: &str = "gene_history.gz";
const ASSEMBLIES_DIR: &str = "genomes/refseq/vertebrate_mammalian/Homo_sapiens/latest_assembly_versions";

/// Date a file in an NCBI directory was last modified, as `YYYYMMDD`.
pub(super) fn modified_version(store: &DataStore, source: &str, dir: &str, file_name: &str) -> Result<String> {
    let url = format!("{}/{}/", NCBI_FTP, dir);
    let index = store.http().get_text(&url)?;
    let date = listing::modified_in_listing(&index, file_name)?.ok_or_else(|| {
        Error::source_remote_data(
            source,
            format!("No modification date for {} in directory listing", file_name),
            Some(url.clone()),
        )
    })?;
    reformat_date(source, &date, "%Y-%m-%d", "%Y%m%d")
}

/// Gene info table plus the gene history table published with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NcbiGenePaths {
    pub gene_info: PathBuf,
    pub gene_history: PathBuf,
    pub version: String,
}

/// Human gene info from NCBI Gene.
pub struct NcbiGeneData {
    store: DataStore,
}

impl NcbiGeneData {
    pub const META: SourceMeta = SourceMeta::new("ncbi_gene", "tsv");
    pub const HISTORY_META: SourceMeta = SourceMeta::new("ncbi_history", "tsv");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    /// Latest gene info and gene history tables.
    ///
    /// Same flag semantics as [`DataSource::get_latest`]. A gene history table
    /// missing from the cache is fetched again unless `from_local` is set.
    pub fn get_latest_paths(&self, from_local: bool, force_refresh: bool) -> Result<NcbiGenePaths> {
        let info = self.get_latest(from_local, force_refresh)?;
        let gene_history = companion_file(
            &self.store,
            &Self::HISTORY_META,
            &info.version,
            from_local,
            |path| self.download_history(path),
        )?;

        Ok(NcbiGenePaths {
            gene_info: info.path,
            gene_history,
            version: info.version,
        })
    }

    fn download_history(&self, outfile: &Path) -> Result<()> {
        self.store.http().download(
            &format!("{}/{}/{}", NCBI_FTP, GENE_HISTORY_DIR, GENE_HISTORY_FILE),
            outfile,
            Some(&extract::gunzip),
            self.store.silent(),
        )
    }
}

impl DataSource for NcbiGeneData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        modified_version(&self.store, Self::META.name, GENE_INFO_DIR, GENE_INFO_FILE)
    }

    // The history table lands first so a cached info table always has its partner.
    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        let history = self
            .store
            .data_dir()
            .join(Self::HISTORY_META.file_name(version));
        self.download_history(&history)?;

        self.store.http().download(
            &format!("{}/{}/{}", NCBI_FTP, GENE_INFO_DIR, GENE_INFO_FILE),
            outfile,
            Some(&extract::gunzip),
            self.store.silent(),
        )
    }

    fn companions(&self, file: &DataFile) -> Vec<PathBuf> {
        self.store
            .local_version(&Self::HISTORY_META, &file.version)
            .map(|history| vec![history.path])
            .unwrap_or_default()
    }
}

/// RefSeq annotation (GFF) of the latest human reference assembly.
pub struct NcbiGenomeData {
    store: DataStore,
}

impl NcbiGenomeData {
    pub const META: SourceMeta = SourceMeta::new("ncbi_genome", "gff");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    /// Assembly directories keyed by their assembly name, e.g.
    /// `("GRCh38.p14", "GCF_000001405.40_GRCh38.p14")`.
    fn assemblies(&self) -> Result<Vec<(String, String)>> {
        let url = format!("{}/{}/", NCBI_FTP, ASSEMBLIES_DIR);
        let index = self.store.http().get_text(&url)?;
        let dirs = listing::versions_in_listing(&index, r"(GCF_\d+\.\d+_GRCh\d+\.p\d+)")?;
        Ok(dirs
            .into_iter()
            .filter_map(|dir| {
                let assembly = dir.splitn(3, '_').nth(2)?.to_string();
                Some((assembly, dir))
            })
            .collect())
    }
}

impl DataSource for NcbiGenomeData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        let assemblies = self.assemblies()?;
        version::newest(assemblies.iter().map(|(assembly, _)| assembly.as_str()))
            .map(str::to_string)
            .ok_or_else(|| {
                Error::source_remote_data(
                    Self::META.name,
                    "No GRCh assembly directory under latest_assembly_versions",
                    Some(format!("{}/{}/", NCBI_FTP, ASSEMBLIES_DIR)),
                )
            })
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        let dir = self
            .assemblies()?
            .into_iter()
            .find(|(assembly, _)| assembly == version)
            .map(|(_, dir)| dir)
            .ok_or_else(|| {
                Error::source_remote_data(
                    Self::META.name,
                    format!("Assembly {} is no longer the latest NCBI assembly", version),
                    Some(format!("{}/{}/", NCBI_FTP, ASSEMBLIES_DIR)),
                )
            })?;

        let url = format!(
            "{}/{}/{dir}/{dir}_genomic.gff.gz",
            NCBI_FTP,
            ASSEMBLIES_DIR,
            dir = dir
        );
        self.store
            .http()
            .download(&url, outfile, Some(&extract::gunzip), self.store.silent())
    }
}

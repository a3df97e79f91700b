//! NCBI LRG_RefSeqGene mapping of Locus Reference Genomic records to RefSeqGene.

use super::ncbi::{modified_version, NCBI_FTP};
use crate::error::Result;
use crate::source::{DataSource, DataStore, SourceMeta};
use std::path::Path;

const REFSEQGENE_DIR: &str = "refseq/H_sapiens/RefSeqGene";
const LRG_FILE: &str = "LRG_RefSeqGene";

pub struct NcbiLrgRefSeqGeneData {
    store: DataStore,
}

impl NcbiLrgRefSeqGeneData {
    pub const META: SourceMeta = SourceMeta::new("ncbi_lrg_refseqgene", "tsv");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }
}

impl DataSource for NcbiLrgRefSeqGeneData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        modified_version(&self.store, Self::META.name, REFSEQGENE_DIR, LRG_FILE)
    }

    fn download(&self, _version: &str, outfile: &Path) -> Result<()> {
        let url = format!("{}/{}/{}", NCBI_FTP, REFSEQGENE_DIR, LRG_FILE);
        self.store
            .http()
            .download(&url, outfile, None, self.store.silent())
    }
}

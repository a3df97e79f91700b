//! Name-based lookup of the built-in sources.

use crate::error::{Error, Result};
use crate::http::HttpClient;
use crate::paths;
use crate::source::{DataSource, DataStore, SourceMeta};
use crate::sources::{
    ChemblData, DoData, DrugsAtFdaData, EnsemblData, EnsemblTranscriptMappingData, GToPLigandData,
    HgncData, MoaData, MondoData, NcbiGeneData, NcbiGenomeData, NcbiLrgRefSeqGeneData,
    NcbiManeSummaryData, NcitData, OncoTreeData,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

type Build = fn(DataStore) -> Box<dyn DataSource>;

/// Registry row for one built-in source.
pub struct SourceEntry {
    pub meta: SourceMeta,
    pub versioned: bool,
    build: Build,
}

const ENTRIES: &[SourceEntry] = &[
    SourceEntry {
        meta: ChemblData::META,
        versioned: true,
        build: |store| Box::new(ChemblData::from_store(store)),
    },
    SourceEntry {
        meta: DoData::META,
        versioned: true,
        build: |store| Box::new(DoData::from_store(store)),
    },
    SourceEntry {
        meta: DrugsAtFdaData::META,
        versioned: false,
        build: |store| Box::new(DrugsAtFdaData::from_store(store)),
    },
    SourceEntry {
        meta: EnsemblData::META,
        versioned: true,
        build: |store| Box::new(EnsemblData::from_store(store)),
    },
    SourceEntry {
        meta: EnsemblTranscriptMappingData::META,
        versioned: false,
        build: |store| Box::new(EnsemblTranscriptMappingData::from_store(store)),
    },
    SourceEntry {
        meta: GToPLigandData::META,
        versioned: false,
        build: |store| Box::new(GToPLigandData::from_store(store)),
    },
    SourceEntry {
        meta: HgncData::META,
        versioned: true,
        build: |store| Box::new(HgncData::from_store(store)),
    },
    SourceEntry {
        meta: MoaData::META,
        versioned: false,
        build: |store| Box::new(MoaData::from_store(store)),
    },
    SourceEntry {
        meta: MondoData::META,
        versioned: true,
        build: |store| Box::new(MondoData::from_store(store)),
    },
    SourceEntry {
        meta: NcbiGeneData::META,
        versioned: false,
        build: |store| Box::new(NcbiGeneData::from_store(store)),
    },
    SourceEntry {
        meta: NcbiGenomeData::META,
        versioned: false,
        build: |store| Box::new(NcbiGenomeData::from_store(store)),
    },
    SourceEntry {
        meta: NcbiLrgRefSeqGeneData::META,
        versioned: false,
        build: |store| Box::new(NcbiLrgRefSeqGeneData::from_store(store)),
    },
    SourceEntry {
        meta: NcbiManeSummaryData::META,
        versioned: true,
        build: |store| Box::new(NcbiManeSummaryData::from_store(store)),
    },
    SourceEntry {
        meta: NcitData::META,
        versioned: false,
        build: |store| Box::new(NcitData::from_store(store)),
    },
    SourceEntry {
        meta: OncoTreeData::META,
        versioned: false,
        build: |store| Box::new(OncoTreeData::from_store(store)),
    },
];

/// Summary row for `list-sources`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceSummary {
    pub name: &'static str,
    pub filetype: &'static str,
    pub versioned: bool,
    pub data_dir: PathBuf,
}

pub fn entries() -> &'static [SourceEntry] {
    ENTRIES
}

pub fn names() -> Vec<String> {
    ENTRIES.iter().map(|e| e.meta.name.to_string()).collect()
}

pub fn find(name: &str) -> Result<&'static SourceEntry> {
    let wanted = name.trim().to_lowercase();
    ENTRIES
        .iter()
        .find(|e| e.meta.name == wanted)
        .ok_or_else(|| Error::source_not_found(name, names()))
}

/// Open a built-in source by name with the default HTTP client.
pub fn open(name: &str, data_dir: Option<&Path>, silent: bool) -> Result<Box<dyn DataSource>> {
    let entry = find(name)?;
    let store = DataStore::open(entry.meta.name, data_dir, silent)?;
    Ok((entry.build)(store))
}

/// Open a built-in source with a caller-configured HTTP client (mirrors etc).
pub fn open_with_http(
    name: &str,
    data_dir: Option<&Path>,
    silent: bool,
    http: HttpClient,
) -> Result<Box<dyn DataSource>> {
    let entry = find(name)?;
    let store = DataStore::open(entry.meta.name, data_dir, silent)?.with_http(http);
    Ok((entry.build)(store))
}

/// Describe every built-in source.
///
/// Resolves (and creates) the base data directory, but not the per-source directories.
pub fn summaries() -> Result<Vec<SourceSummary>> {
    let base = paths::data_base_dir()?;
    Ok(ENTRIES
        .iter()
        .map(|e| SourceSummary {
            name: e.meta.name,
            filetype: e.meta.filetype,
            versioned: e.versioned,
            data_dir: base.join(e.meta.name),
        })
        .collect())
}

//! Concrete data sources.

mod chembl;
mod custom;
mod do_ontology;
mod drugsatfda;
mod ensembl;
mod ensembl_transcripts;
mod gtop;
mod hgnc;
mod moa;
mod mondo;
mod ncbi;
mod ncbi_lrg_refseqgene;
mod ncbi_mane;
mod ncit;
mod oncotree;

pub use chembl::ChemblData;
pub use custom::{CustomData, DownloadFn, LatestVersionFn};
pub use do_ontology::DoData;
pub use drugsatfda::DrugsAtFdaData;
pub use ensembl::EnsemblData;
pub use ensembl_transcripts::EnsemblTranscriptMappingData;
pub use gtop::{GToPLigandData, GtoPLigandPaths};
pub use hgnc::HgncData;
pub use moa::MoaData;
pub use mondo::MondoData;
pub use ncbi::{NcbiGeneData, NcbiGenePaths, NcbiGenomeData};
pub use ncbi_lrg_refseqgene::NcbiLrgRefSeqGeneData;
pub use ncbi_mane::NcbiManeSummaryData;
pub use ncit::NcitData;
pub use oncotree::OncoTreeData;

use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::source::{DataStore, SourceMeta};

/// Reformat a date string between two `chrono` formats, failing as remote data.
pub(crate) fn reformat_date(source: &str, raw: &str, from: &str, to: &str) -> Result<String> {
    NaiveDate::parse_from_str(raw.trim(), from)
        .map(|date| date.format(to).to_string())
        .map_err(|e| {
            Error::source_remote_data(
                source,
                format!("Unable to parse date '{}' as {}: {}", raw, from, e),
                None,
            )
        })
}

/// Cached path of a file published alongside a source's main file.
///
/// A missing file is fetched through `fetch`, unless `from_local` is set.
pub(crate) fn companion_file(
    store: &DataStore,
    meta: &SourceMeta,
    version: &str,
    from_local: bool,
    fetch: impl FnOnce(&Path) -> Result<()>,
) -> Result<PathBuf> {
    if let Some(cached) = store.local_version(meta, version) {
        return Ok(cached.path);
    }
    if from_local {
        return Err(Error::source_no_local_data(
            meta.name,
            store.data_dir().display().to_string(),
            meta.file_name(version),
        ));
    }

    let path = store.data_dir().join(meta.file_name(version));
    fetch(&path)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reformat_date_round_trips_formats() {
        assert_eq!(
            reformat_date("oncotree", "2021-11-02", "%Y-%m-%d", "%Y%m%d").unwrap(),
            "20211102"
        );
        assert_eq!(
            reformat_date("hgnc", "20240105", "%Y%m%d", "%Y-%m-%d").unwrap(),
            "2024-01-05"
        );
    }

    #[test]
    fn reformat_date_rejects_garbage() {
        let err = reformat_date("oncotree", "next tuesday", "%Y-%m-%d", "%Y%m%d").unwrap_err();
        assert_eq!(err.code.as_str(), "source.remote_data");
    }
}

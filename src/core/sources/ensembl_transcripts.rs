//! Ensembl gene, transcript and protein identifier mappings from BioMart.
//!
//! BioMart answers queries against the current Ensembl release only.

use super::ensembl::latest_release;
use crate::error::{Error, Result};
use crate::source::{DataSource, DataStore, SourceMeta};
use reqwest::Url;
use std::path::Path;

const MARTSERVICE_URL: &str = "https://www.ensembl.org/biomart/martservice";

const ATTRIBUTES: &[&str] = &[
    "ensembl_gene_id",
    "ensembl_gene_id_version",
    "ensembl_transcript_id",
    "ensembl_transcript_id_version",
    "ensembl_peptide_id",
    "ensembl_peptide_id_version",
    "transcript_mane_select",
    "external_gene_name",
];

pub struct EnsemblTranscriptMappingData {
    store: DataStore,
}

impl EnsemblTranscriptMappingData {
    pub const META: SourceMeta = SourceMeta::new("ensembl_transcript_mappings", "tsv");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    fn query_xml() -> String {
        let attributes: String = ATTRIBUTES
            .iter()
            .map(|name| format!("<Attribute name=\"{}\"/>", name))
            .collect();
        format!(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?><!DOCTYPE Query>\
             <Query virtualSchemaName=\"default\" formatter=\"TSV\" header=\"1\" uniqueRows=\"0\" count=\"\" datasetConfigVersion=\"0.6\">\
             <Dataset name=\"hsapiens_gene_ensembl\" interface=\"default\">{}</Dataset></Query>",
            attributes
        )
    }

    fn query_url() -> Result<String> {
        Url::parse_with_params(MARTSERVICE_URL, &[("query", Self::query_xml())])
            .map(String::from)
            .map_err(|e| Error::internal_unexpected(format!("invalid BioMart URL: {}", e)))
    }
}

impl DataSource for EnsemblTranscriptMappingData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        latest_release(self.store.http(), Self::META.name)
    }

    fn download(&self, _version: &str, outfile: &Path) -> Result<()> {
        self.store
            .http()
            .download(&Self::query_url()?, outfile, None, self.store.silent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_asks_for_every_attribute_as_tsv() {
        let xml = EnsemblTranscriptMappingData::query_xml();
        assert!(xml.contains("formatter=\"TSV\""));
        assert!(xml.contains("<Dataset name=\"hsapiens_gene_ensembl\""));
        for attribute in ATTRIBUTES {
            assert!(xml.contains(&format!("<Attribute name=\"{}\"/>", attribute)));
        }

        let url = EnsemblTranscriptMappingData::query_url().unwrap();
        assert!(url.starts_with("https://www.ensembl.org/biomart/martservice?query=%3C%3Fxml"));
        assert!(!url.contains(' '));
    }
}

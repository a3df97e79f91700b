//! NCI Thesaurus OWL release from the EVS file server.

use crate::error::{Error, ErrorCode, Result};
use crate::extract;
use crate::listing;
use crate::source::{DataSource, DataStore, SourceMeta};
use crate::version;
use std::path::Path;

const EVS_URL: &str = "https://evs.nci.nih.gov/ftp1/NCI_Thesaurus";
const RELEASE_ENTRY: &str = r"Thesaurus_(\d{2}\.\d{2}[a-z])\.OWL\.zip";

pub struct NcitData {
    store: DataStore,
}

impl NcitData {
    pub const META: SourceMeta = SourceMeta::new("ncit", "owl");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    fn current_url(version: &str) -> String {
        format!("{}/Thesaurus_{}.OWL.zip", EVS_URL, version)
    }

    fn archive_url(version: &str) -> String {
        format!(
            "{}/archive/{v}_Release/Thesaurus_{v}.OWL.zip",
            EVS_URL,
            v = version
        )
    }
}

impl DataSource for NcitData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        let index = self.store.http().get_text(&format!("{}/", EVS_URL))?;
        let versions = listing::versions_in_listing(&index, RELEASE_ENTRY)?;
        version::newest(versions.iter().map(String::as_str))
            .map(str::to_string)
            .ok_or_else(|| {
                Error::source_remote_data(
                    Self::META.name,
                    "No Thesaurus OWL release found on EVS server",
                    Some(EVS_URL.to_string()),
                )
            })
    }

    /// The current release sits at the top level; superseded ones move under `archive/`.
    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        let handler = |archive: &Path, out: &Path| {
            extract::unzip_member(Self::META.name, archive, out, "Thesaurus.owl")
        };
        let http = self.store.http();
        let silent = self.store.silent();

        match http.download(&Self::current_url(version), outfile, Some(&handler), silent) {
            Err(err) if err.code == ErrorCode::RemoteHttpError && err.details["status"] == 404 => {
                if !silent {
                    log_status!("ncit", "{} not current; trying archive", version);
                }
                http.download(&Self::archive_url(version), outfile, Some(&handler), silent)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_url_layout() {
        assert_eq!(
            NcitData::archive_url("23.09d"),
            "https://evs.nci.nih.gov/ftp1/NCI_Thesaurus/archive/23.09d_Release/Thesaurus_23.09d.OWL.zip"
        );
    }
}

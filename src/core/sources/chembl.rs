//! ChEMBL SQLite releases from the EBI archive.

use crate::error::{Error, Result};
use crate::extract;
use crate::listing;
use crate::source::{DataSource, DataStore, SourceMeta, VersionedSource};
use crate::version;
use regex::Regex;
use std::path::Path;

const BASE_URL: &str = "https://ftp.ebi.ac.uk/pub/databases/chembl/ChEMBLdb";

/// Provide access to the ChEMBL database.
pub struct ChemblData {
    store: DataStore,
}

impl ChemblData {
    pub const META: SourceMeta = SourceMeta::new("chembl", "db");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }

    fn readme_url() -> String {
        format!("{}/latest/README", BASE_URL)
    }

    fn tarball_url(version: &str) -> String {
        format!(
            "{}/releases/chembl_{v}/chembl_{v}_sqlite.tar.gz",
            BASE_URL,
            v = version
        )
    }
}

/// Pull the release number out of the `* Release: chembl_NN` line of the README.
pub(crate) fn parse_release(readme: &str) -> Option<String> {
    let pattern = Regex::new(r"^\*\s*Release:\s*chembl_(\d*)").ok()?;
    readme.lines().find_map(|line| {
        let caps = pattern.captures(line.trim_start())?;
        let number = caps.get(1)?.as_str();
        (!number.is_empty()).then(|| number.to_string())
    })
}

impl DataSource for ChemblData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        let url = Self::readme_url();
        let readme = self.store.http().get_text(&url)?;
        parse_release(&readme).ok_or_else(|| {
            Error::source_remote_data(
                Self::META.name,
                "Unable to parse latest ChEMBL version number from latest release README",
                Some(url),
            )
        })
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        let glob = Self::META.glob();
        let handler = |archive: &Path, out: &Path| {
            extract::untar_member(Self::META.name, archive, out, &glob)
        };
        self.store.http().download(
            &Self::tarball_url(version),
            outfile,
            Some(&handler),
            self.store.silent(),
        )
    }

    fn as_versioned(&self) -> Option<&dyn VersionedSource> {
        Some(self)
    }
}

impl VersionedSource for ChemblData {
    fn versions(&self) -> Result<Vec<String>> {
        let url = format!("{}/releases/", BASE_URL);
        let index = self.store.http().get_text(&url)?;
        let mut versions = listing::versions_in_listing(&index, r"chembl_(\d+)")?;
        version::sort_descending(&mut versions);
        Ok(versions)
    }
}

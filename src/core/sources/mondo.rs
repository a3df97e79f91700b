//! Mondo Disease Ontology, released on GitHub.

use crate::error::Result;
use crate::github;
use crate::source::{DataSource, DataStore, SourceMeta, VersionedSource};
use std::path::Path;

const REPO: &str = "monarch-initiative/mondo";

/// Provide access to the Mondo disease ontology.
pub struct MondoData {
    store: DataStore,
}

impl MondoData {
    pub const META: SourceMeta = SourceMeta::new("mondo", "owl");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }
}

impl DataSource for MondoData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        github::latest_tag(self.store.http(), Self::META.name, REPO)
    }

    fn download(&self, version: &str, outfile: &Path) -> Result<()> {
        self.store.http().download(
            &github::asset_url(REPO, version, "mondo.owl"),
            outfile,
            None,
            self.store.silent(),
        )
    }

    fn as_versioned(&self) -> Option<&dyn VersionedSource> {
        Some(self)
    }
}

impl VersionedSource for MondoData {
    fn versions(&self) -> Result<Vec<String>> {
        github::release_tags(self.store.http(), Self::META.name, REPO)
    }
}

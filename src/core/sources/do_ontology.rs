//! Human Disease Ontology. Releases are GitHub tags; the OWL file lives inside the
//! tag's source tarball.

use crate::error::Result;
use crate::extract;
use crate::github;
use crate::source::{DataSource, DataStore, SourceMeta, VersionedSource};
use std::path::Path;

const REPO: &str = "DiseaseOntology/HumanDiseaseOntology";
const OWL_MEMBER: &str = "*/src/ontology/doid.owl";

pub struct DoData {
    store: DataStore,
}

impl DoData {
    pub const META: SourceMeta = SourceMeta::new("do", "owl");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }
}

impl DataSource for DoData {
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
        let handler = |archive: &Path, out: &Path| {
            extract::untar_member(Self::META.name, archive, out, OWL_MEMBER)
        };
        self.store.http().download(
            &github::tag_tarball_url(REPO, version),
            outfile,
            Some(&handler),
            self.store.silent(),
        )
    }

    fn as_versioned(&self) -> Option<&dyn VersionedSource> {
        Some(self)
    }
}

impl VersionedSource for DoData {
    fn versions(&self) -> Result<Vec<String>> {
        github::release_tags(self.store.http(), Self::META.name, REPO)
    }
}

//! OncoTree tumor type tree from the MSK OncoTree API.
//!
//! The API only serves the latest stable tree, so older versions cannot be fetched.

use super::reformat_date;
use crate::error::{Error, Result};
use crate::source::{DataSource, DataStore, SourceMeta};
use serde::Deserialize;
use std::path::Path;

const API_URL: &str = "https://oncotree.mskcc.org/api";
const STABLE_ID: &str = "oncotree_latest_stable";

#[derive(Debug, Deserialize)]
struct ApiVersion {
    api_identifier: String,
    release_date: String,
}

pub struct OncoTreeData {
    store: DataStore,
}

impl OncoTreeData {
    pub const META: SourceMeta = SourceMeta::new("oncotree", "json");

    pub fn new(data_dir: Option<&Path>, silent: bool) -> Result<Self> {
        Ok(Self::from_store(DataStore::open(Self::META.name, data_dir, silent)?))
    }

    pub fn from_store(store: DataStore) -> Self {
        Self { store }
    }
}

impl DataSource for OncoTreeData {
    fn meta(&self) -> SourceMeta {
        Self::META
    }

    fn store(&self) -> &DataStore {
        &self.store
    }

    fn latest_version(&self) -> Result<String> {
        let url = format!("{}/versions", API_URL);
        let versions: Vec<ApiVersion> = self.store.http().get_json(Self::META.name, &url)?;
        let stable = versions
            .into_iter()
            .find(|v| v.api_identifier == STABLE_ID)
            .ok_or_else(|| {
                Error::source_remote_data(
                    Self::META.name,
                    format!("No '{}' entry in OncoTree versions", STABLE_ID),
                    Some(url.clone()),
                )
            })?;
        reformat_date(Self::META.name, &stable.release_date, "%Y-%m-%d", "%Y%m%d")
    }

    fn download(&self, _version: &str, outfile: &Path) -> Result<()> {
        let url = format!("{}/tumorTypes/tree?version={}", API_URL, STABLE_ID);
        self.store
            .http()
            .download(&url, outfile, None, self.store.silent())
    }
}

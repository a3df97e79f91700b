use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use wags_tails::registry;

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct VersionsArgs {
    /// Source name (see `wags-tails list-sources`)
    pub source: String,

    /// Only return the first N versions
    #[arg(long)]
    pub limit: Option<usize>,

    /// Open the source here instead of the resolved data directory
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<String>,
}

impl VersionsArgs {
    fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.as_deref().map(wags_tails::paths::expand)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionsOutput {
    pub source: String,
    pub versions: Vec<String>,
}

pub fn run(args: VersionsArgs, global: &GlobalArgs) -> CmdResult<VersionsOutput> {
    let data_dir = args.data_dir();
    let source = registry::open(&args.source, data_dir.as_deref(), global.silent)?;
    let name = source.meta().name;

    let versioned = source.as_versioned().ok_or_else(|| {
        wags_tails::Error::validation_invalid_argument(
            "source",
            format!("{} does not publish a version history", name),
            Some(name.to_string()),
            None,
        )
    })?;

    let mut versions = versioned.versions()?;
    if let Some(limit) = args.limit {
        versions.truncate(limit);
    }

    Ok((
        VersionsOutput {
            source: name.to_string(),
            versions,
        },
        0,
    ))
}

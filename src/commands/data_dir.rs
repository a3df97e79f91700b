use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use wags_tails::{paths, registry};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Args)]
pub struct DataDirArgs {
    /// Show the directory for this source instead of the base directory
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataDirOutput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub path: PathBuf,
}

pub fn run(args: DataDirArgs, _global: &GlobalArgs) -> CmdResult<DataDirOutput> {
    let (source, path) = match args.source {
        Some(name) => {
            let entry = registry::find(&name)?;
            let path = paths::source_data_dir(entry.meta.name, None)?;
            (Some(entry.meta.name.to_string()), path)
        }
        None => (None, paths::data_base_dir()?),
    };

    Ok((DataDirOutput { source, path }, 0))
}

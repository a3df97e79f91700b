use clap::Args;
use serde::Serialize;
use std::path::PathBuf;
use wags_tails::{registry, DataFile};

use crate::commands::{CmdResult, FetchArgs, GlobalArgs};

#[derive(Args)]
pub struct GetLatestArgs {
    /// Source name (see `wags-tails list-sources`)
    pub source: String,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Args)]
pub struct GetVersionArgs {
    /// Source name (see `wags-tails list-sources`)
    pub source: String,

    /// Version string, as reported by `wags-tails versions`
    pub version: String,

    #[command(flatten)]
    pub fetch: FetchArgs,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GetOutput {
    pub source: String,
    #[serde(flatten)]
    pub file: DataFile,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub companions: Vec<PathBuf>,
}

pub fn run_latest(args: GetLatestArgs, global: &GlobalArgs) -> CmdResult<GetOutput> {
    let data_dir = args.fetch.data_dir();
    let source = registry::open(&args.source, data_dir.as_deref(), global.silent)?;
    let file = source.get_latest(args.fetch.from_local, args.fetch.force_refresh)?;
    let companions = source.companions(&file);

    Ok((
        GetOutput {
            source: source.meta().name.to_string(),
            file,
            companions,
        },
        0,
    ))
}

pub fn run_version(args: GetVersionArgs, global: &GlobalArgs) -> CmdResult<GetOutput> {
    let data_dir = args.fetch.data_dir();
    let source = registry::open(&args.source, data_dir.as_deref(), global.silent)?;
    let name = source.meta().name;

    let versioned = source.as_versioned().ok_or_else(|| {
        wags_tails::Error::validation_invalid_argument(
            "version",
            format!("{} only provides its latest release", name),
            Some(name.to_string()),
            None,
        )
        .with_hint(format!("Try: wags-tails get-latest {}", name))
    })?;

    let file = versioned.get_specific(
        &args.version,
        args.fetch.from_local,
        args.fetch.force_refresh,
    )?;
    let companions = source.companions(&file);

    Ok((
        GetOutput {
            source: name.to_string(),
            file,
            companions,
        },
        0,
    ))
}

use clap::Args;
use std::path::PathBuf;

pub type CmdResult<T> = wags_tails::Result<(T, i32)>;

pub struct GlobalArgs {
    pub silent: bool,
}

/// Arguments shared by commands that fetch data.
#[derive(Args, Debug, Default)]
pub struct FetchArgs {
    /// Use the newest local file; never touch the network
    #[arg(long)]
    pub from_local: bool,

    /// Download even when a local copy is present
    #[arg(long)]
    pub force_refresh: bool,

    /// Store data here instead of the resolved data directory
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<String>,
}

impl FetchArgs {
    pub fn data_dir(&self) -> Option<PathBuf> {
        self.data_dir.as_deref().map(wags_tails::paths::expand)
    }
}

pub mod data_dir;
pub mod get;
pub mod list_sources;
pub mod versions;

/// Run a command handler and turn its output into JSON plus an exit code.
macro_rules! dispatch {
    ($args:expr, $global:expr, $run:path) => {
        crate::output::to_json_result($run($args, $global))
    };
}

pub(crate) fn run_json(
    command: crate::Commands,
    global: &GlobalArgs,
) -> (wags_tails::Result<serde_json::Value>, i32) {
    if !global.silent {
        crate::tty::status(&format!("wags-tails {}...", command.name()));
    }

    match command {
        crate::Commands::GetLatest(args) => dispatch!(args, global, get::run_latest),
        crate::Commands::GetVersion(args) => dispatch!(args, global, get::run_version),
        crate::Commands::Versions(args) => dispatch!(args, global, versions::run),
        crate::Commands::DataDir(args) => dispatch!(args, global, data_dir::run),
        crate::Commands::ListSources => crate::output::to_json_result(list_sources::run(global)),
    }
}

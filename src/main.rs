use clap::{Parser, Subcommand};

use commands::GlobalArgs;

mod commands;
mod output;
mod tty;

use commands::{data_dir, get, versions};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "wags-tails")]
#[command(version = VERSION)]
#[command(about = "Fetch, version and cache biomedical reference data")]
struct Cli {
    /// Suppress progress bars and status lines
    #[arg(long, global = true)]
    silent: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported data sources
    #[command(name = "list-sources")]
    ListSources,
    /// Get the latest version of a source's data
    #[command(name = "get-latest")]
    GetLatest(get::GetLatestArgs),
    /// Get a specific version of a source's data
    #[command(name = "get-version")]
    GetVersion(get::GetVersionArgs),
    /// List remote versions of a source, newest first
    Versions(versions::VersionsArgs),
    /// Show the resolved data directory
    #[command(name = "data-dir")]
    DataDir(data_dir::DataDirArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::ListSources => "list-sources",
            Commands::GetLatest(_) => "get-latest",
            Commands::GetVersion(_) => "get-version",
            Commands::Versions(_) => "versions",
            Commands::DataDir(_) => "data-dir",
        }
    }
}

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();

    let global = GlobalArgs { silent: cli.silent };

    let command = cli.command.name();
    let (json_result, exit_code) = commands::run_json(cli.command, &global);

    if let Err(err) = output::print_envelope(command, json_result) {
        eprintln!("{}", err);
        return std::process::ExitCode::from(1);
    }

    std::process::ExitCode::from(exit_code_to_u8(exit_code))
}

fn exit_code_to_u8(code: i32) -> u8 {
    if code <= 0 {
        0
    } else if code >= 255 {
        255
    } else {
        code as u8
    }
}

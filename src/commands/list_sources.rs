use serde::Serialize;
use wags_tails::registry::{self, SourceSummary};

use crate::commands::{CmdResult, GlobalArgs};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSourcesOutput {
    pub sources: Vec<SourceSummary>,
}

pub fn run(_global: &GlobalArgs) -> CmdResult<ListSourcesOutput> {
    Ok((
        ListSourcesOutput {
            sources: registry::summaries()?,
        },
        0,
    ))
}

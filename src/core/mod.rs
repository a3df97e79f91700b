// Public modules
pub mod error;
pub mod extract;
pub mod http;
pub mod paths;
pub mod registry;
pub mod source;
pub mod sources;
pub mod version;

// Internal modules - not part of public API
pub(crate) mod github;
pub(crate) mod listing;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use source::{DataFile, DataSource, DataStore, SourceMeta, VersionedSource};
pub use sources::{
    ChemblData, CustomData, DoData, DrugsAtFdaData, EnsemblData, EnsemblTranscriptMappingData,
    GToPLigandData, GtoPLigandPaths, HgncData, MoaData, MondoData, NcbiGeneData, NcbiGenePaths,
    NcbiGenomeData, NcbiLrgRefSeqGeneData, NcbiManeSummaryData, NcitData, OncoTreeData,
};

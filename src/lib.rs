/// Curation pipeline for the PHENIX ppg146 identified-particle spectra.
///
/// Downloads the published per-centrality measurement files, annotates each
/// row with a systematic uncertainty derived from the paper's reference
/// table, regroups the files by collision system / species / charge /
/// value type, and renders each group as aligned plain-text tables.

pub mod analysis;
pub mod classify;
pub mod config;
pub mod ingest;
pub mod model;
pub mod reform;
pub mod table;
pub mod uncertainty;

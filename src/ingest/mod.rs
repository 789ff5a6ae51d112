/// Network retrieval of the source data files.
///
/// Submodules:
/// - `phenix` — scrapes the PHENIX data-directory listings for `.txt` links
///   and downloads them to the local data directory.

pub mod phenix;

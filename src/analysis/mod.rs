/// Data organization utilities for the curation pipeline.
///
/// Submodules:
/// - `grouping` — re-aggregates single-centrality file records into
///   per-physical-group collections with deterministic member ordering.

pub mod grouping;

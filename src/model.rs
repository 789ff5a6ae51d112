/// Core data types for the PHENIX ppg146 curation pipeline.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no logic and no I/O — only types and the error taxonomy.

use std::fmt;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Classification enums
// ---------------------------------------------------------------------------

/// The colliding species pair for an experiment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionSystem {
    /// Gold–gold collisions.
    AuAu,
    /// Deuteron–gold collisions.
    DAu,
}

impl fmt::Display for CollisionSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollisionSystem::AuAu => write!(f, "AuAu"),
            CollisionSystem::DAu => write!(f, "dAu"),
        }
    }
}

/// Identified particle species measured in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Pion,
    Kaon,
    Proton,
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Species::Pion => write!(f, "pion"),
            Species::Kaon => write!(f, "kaon"),
            Species::Proton => write!(f, "proton"),
        }
    }
}

/// Particle charge sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Charge {
    Positive,
    Negative,
}

impl fmt::Display for Charge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Charge::Positive => write!(f, "pos"),
            Charge::Negative => write!(f, "neg"),
        }
    }
}

/// What the value column of a data file measures.
///
/// `Raa` and `RdA` are nuclear modification factors; their filename tokens
/// also fix the collision system, so a `Metadata` can never pair `Raa` with
/// dAu or `RdA` with AuAu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Raa,
    RdA,
    InvariantYield,
}

impl ValueType {
    /// Column header used when rendering tables of this value type.
    pub fn header(&self) -> &'static str {
        match self {
            ValueType::Raa => "RAA",
            ValueType::RdA => "RdA",
            ValueType::InvariantYield => "Inv. Yield",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header())
    }
}

// ---------------------------------------------------------------------------
// Classification result
// ---------------------------------------------------------------------------

/// Everything a filename tells us about the measurement it contains.
///
/// Produced once by `classify::classify` and never mutated afterward.
/// Centrality bounds are percentiles with `low < high`; 0–100 denotes the
/// fully inclusive sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Metadata {
    pub collision_system: CollisionSystem,
    pub species: Species,
    pub charge: Charge,
    pub value_type: ValueType,
    pub centrality_low: u8,
    pub centrality_high: u8,
}

impl Metadata {
    /// True for the fully inclusive 0–100% centrality sample, which always
    /// sorts first within its group.
    pub fn is_full_centrality(&self) -> bool {
        self.centrality_low == 0 && self.centrality_high == 100
    }
}

// ---------------------------------------------------------------------------
// File contents
// ---------------------------------------------------------------------------

/// One measurement row from a data file.
///
/// `momentum` and `value` are parsed for the uncertainty lookup, but the
/// original field text is kept verbatim in `fields` so rendered output
/// reproduces the source formatting exactly. `fields[2]` (the statistical
/// error) is opaque text and is never parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct DataRow {
    pub momentum: f64,
    pub value: f64,
    pub fields: [String; 3],
}

/// A classified data file: its name, its metadata, and its parsed rows.
#[derive(Debug, Clone, PartialEq)]
pub struct FileRecord {
    pub raw_name: String,
    pub metadata: Metadata,
    pub rows: Vec<DataRow>,
}

// ---------------------------------------------------------------------------
// Error taxonomy
// ---------------------------------------------------------------------------

/// Errors that can arise while classifying, grouping, or retrieving data.
///
/// Classification and lookup failures are per-file: the driver reports them
/// and moves on to the next file rather than aborting the pass.
#[derive(Debug, Error)]
pub enum ReformError {
    /// The filename does not match the expected grammar.
    #[error("filename '{0}' does not match the expected pattern")]
    UnrecognizedFilename(String),

    /// Parsed centrality bounds are nonsensical (low >= high).
    #[error("invalid centrality bounds {low}-{high} in '{filename}'")]
    InvalidCentrality { filename: String, low: u8, high: u8 },

    /// The uncertainty table has no entry for the requested cell.
    /// Must surface as an explicit "n/a" marker, never a numeric zero.
    #[error("no systematic uncertainty entry for {charge} {species} in {system} at pT {momentum}")]
    UncertaintyUnavailable {
        system: CollisionSystem,
        species: Species,
        charge: Charge,
        momentum: f64,
    },

    /// Two files in the same group claim the same centrality bounds.
    #[error("duplicate centrality {low}-{high}% in group '{group}'")]
    DuplicateCentrality { group: String, low: u8, high: u8 },

    /// A data row could not be parsed as `momentum value stat_error`.
    #[error("malformed row {line} in '{filename}': {reason}")]
    MalformedRow {
        filename: String,
        line: usize,
        reason: String,
    },

    /// The configuration file exists but could not be parsed.
    #[error("invalid configuration '{path}': {reason}")]
    Config { path: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response from the data server.
    #[error("HTTP error {status} from {url}")]
    HttpStatus { url: String, status: u16 },
}

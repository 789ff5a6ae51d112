/// Filename classifier for the ppg146 data files.
///
/// Filenames are semantically loaded: a name like
/// `raa_pospion_AuAu_cent0010.txt` encodes the value type, charge, species,
/// collision system, and centrality bin of the measurement it contains.
/// The grammar, in order:
///
///   1. optional ratio token (`raa` | `rda`) — fixes the value type AND the
///      collision system, overriding any later system token
///   2. optional `_`
///   3. optional charge token (`pos` | `neg`), defaulting to positive
///   4. required species token (`pion` | `kaon` | `prot`)
///   5. required `_`
///   6. optional collision-system token (`AuAu` | `dAu`)
///   7. optional `_`
///   8. required `cent` followed by exactly 4 digits, then `.txt`
///
/// Each segment is matched by an independent prefix matcher with an explicit
/// defaulting rule, so the rules are individually testable rather than being
/// buried in one monolithic pattern.

use crate::model::{Charge, CollisionSystem, Metadata, ReformError, Species, ValueType};

/// Parse a data filename into its `Metadata`.
///
/// Fails with `UnrecognizedFilename` when the grammar does not match, and
/// with `InvalidCentrality` when the centrality digits parse but are
/// nonsensical (low >= high, other than the `0100` inclusive special case).
pub fn classify(filename: &str) -> Result<Metadata, ReformError> {
    let unrecognized = || ReformError::UnrecognizedFilename(filename.to_string());

    let stem = filename.strip_suffix(".txt").ok_or_else(unrecognized)?;
    let mut rest = stem;

    // 1. Ratio token: implies both value type and collision system.
    let mut value_type = ValueType::InvariantYield;
    let mut implied_system = None;
    if let Some(r) = rest.strip_prefix("raa") {
        value_type = ValueType::Raa;
        implied_system = Some(CollisionSystem::AuAu);
        rest = r;
    } else if let Some(r) = rest.strip_prefix("rda") {
        value_type = ValueType::RdA;
        implied_system = Some(CollisionSystem::DAu);
        rest = r;
    }

    // 2. Separator after the ratio token is optional.
    rest = rest.strip_prefix('_').unwrap_or(rest);

    // 3. Charge defaults to positive when no token is present.
    let mut charge = Charge::Positive;
    if let Some(r) = rest.strip_prefix("pos") {
        rest = r;
    } else if let Some(r) = rest.strip_prefix("neg") {
        charge = Charge::Negative;
        rest = r;
    }

    // 4. Species is required.
    let species;
    if let Some(r) = rest.strip_prefix("pion") {
        species = Species::Pion;
        rest = r;
    } else if let Some(r) = rest.strip_prefix("kaon") {
        species = Species::Kaon;
        rest = r;
    } else if let Some(r) = rest.strip_prefix("prot") {
        species = Species::Proton;
        rest = r;
    } else {
        return Err(unrecognized());
    }

    // 5. Separator after the species is required.
    rest = rest.strip_prefix('_').ok_or_else(unrecognized)?;

    // 6. Collision-system token; only consulted when step 1 did not already
    //    fix the system.
    let mut parsed_system = None;
    if let Some(r) = rest.strip_prefix("AuAu") {
        parsed_system = Some(CollisionSystem::AuAu);
        rest = r;
    } else if let Some(r) = rest.strip_prefix("dAu") {
        parsed_system = Some(CollisionSystem::DAu);
        rest = r;
    }

    // 7. Separator before the centrality token is optional.
    rest = rest.strip_prefix('_').unwrap_or(rest);

    // 8. Centrality: `cent` plus exactly 4 digits ending the name.
    let digits = rest.strip_prefix("cent").ok_or_else(unrecognized)?;
    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(unrecognized());
    }
    let (centrality_low, centrality_high) = parse_centrality(digits, filename)?;

    // Files with neither a ratio token nor a system token (e.g.
    // `prot_cent0100.txt`) fall back to dAu, matching the uncertainty rows
    // the source data used for them.
    let collision_system = implied_system
        .or(parsed_system)
        .unwrap_or(CollisionSystem::DAu);

    Ok(Metadata {
        collision_system,
        species,
        charge,
        value_type,
        centrality_low,
        centrality_high,
    })
}

/// Split a 4-digit centrality token into (low, high) percentile bounds.
///
/// `0100` is the fully inclusive 0–100% sample: the digits do NOT split as
/// "01"/"00". Every other token splits 2+2 and must satisfy low < high.
fn parse_centrality(digits: &str, filename: &str) -> Result<(u8, u8), ReformError> {
    if digits == "0100" {
        return Ok((0, 100));
    }
    // Both halves are 2 ASCII digits, so the parses cannot fail.
    let low: u8 = digits[..2].parse().unwrap_or(0);
    let high: u8 = digits[2..].parse().unwrap_or(0);
    if low >= high {
        return Err(ReformError::InvalidCentrality {
            filename: filename.to_string(),
            low,
            high,
        });
    }
    Ok((low, high))
}

/// The group label of a filename: everything before the `_cent####.txt`
/// suffix. Files differing only in centrality share a label and are
/// concatenated into one output table per label.
pub fn group_label(filename: &str) -> &str {
    const SUFFIX_LEN: usize = "_cent0000.txt".len();
    if filename.len() > SUFFIX_LEN {
        &filename[..filename.len() - SUFFIX_LEN]
    } else {
        filename
    }
}

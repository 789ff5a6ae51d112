/// Systematic-uncertainty lookup for the ppg146 dataset.
///
/// The fractional uncertainties come from table 4 of arXiv:1304.3410. They
/// are process-wide constant data, modeled as immutable statics — all other
/// modules read them through `lookup`.
///
/// Column layout is {pos,neg} x {pion,kaon,proton}; rows are momentum bands.
/// The adopted band rule: row 0 if pT < 3; else row 1 if pT < 5; else row 2 —
/// with dAu always capped at row 1 (its table has only two rows).

use crate::model::{Charge, CollisionSystem, ReformError, Species};

/// Fractional uncertainties for AuAu, momentum bands <3, [3,5), >=5 GeV/c.
/// The kaon columns have no published value in the highest band.
static AUAU_TABLE: [[Option<f64>; 6]; 3] = [
    [Some(0.09), Some(0.09), Some(0.11), Some(0.11), Some(0.10), Some(0.10)],
    [Some(0.10), Some(0.10), Some(0.11), Some(0.11), Some(0.11), Some(0.11)],
    [Some(0.14), Some(0.14), None, None, Some(0.14), Some(0.14)],
];

/// Fractional uncertainties for dAu, momentum bands <3 and >=3 GeV/c.
static DAU_TABLE: [[Option<f64>; 6]; 2] = [
    [Some(0.08), Some(0.08), Some(0.13), Some(0.13), Some(0.09), Some(0.09)],
    [Some(0.09), Some(0.09), Some(0.13), Some(0.13), Some(0.11), Some(0.11)],
];

/// Table column for a (species, charge) pair.
fn column(species: Species, charge: Charge) -> usize {
    let base = match species {
        Species::Pion => 0,
        Species::Kaon => 2,
        Species::Proton => 4,
    };
    match charge {
        Charge::Positive => base,
        Charge::Negative => base + 1,
    }
}

/// Momentum-band row for a collision system. dAu has no third band, so its
/// row index is capped at 1 regardless of momentum.
fn row(system: CollisionSystem, momentum: f64) -> usize {
    let band = if momentum < 3.0 {
        0
    } else if momentum < 5.0 {
        1
    } else {
        2
    };
    match system {
        CollisionSystem::AuAu => band,
        CollisionSystem::DAu => band.min(1),
    }
}

/// Systematic uncertainty of a measured value: the fractional table entry
/// for this cell multiplied by the value.
///
/// Fails with `UncertaintyUnavailable` when the table has no entry (AuAu
/// kaons above 5 GeV/c). Callers must propagate that explicitly — it is
/// never a numeric zero.
pub fn lookup(
    system: CollisionSystem,
    species: Species,
    charge: Charge,
    momentum: f64,
    value: f64,
) -> Result<f64, ReformError> {
    let cell = match system {
        CollisionSystem::AuAu => AUAU_TABLE[row(system, momentum)][column(species, charge)],
        CollisionSystem::DAu => DAU_TABLE[row(system, momentum)][column(species, charge)],
    };
    match cell {
        Some(fraction) => Ok(fraction * value),
        None => Err(ReformError::UncertaintyUnavailable {
            system,
            species,
            charge,
            momentum,
        }),
    }
}

// ---------------------------------------------------------------------------
// Significant-figure formatting
// ---------------------------------------------------------------------------

/// Format a value to `digits` significant figures, trimming trailing zeros
/// (the `%g` convention). Uncertainty columns are serialized with
/// `format_significant(su, 6)`.
pub fn format_significant(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }
    let digits = digits.max(1);
    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= digits as i32 {
        // Scientific notation, trailing zeros trimmed from the mantissa.
        let s = format!("{:.*e}", digits - 1, value);
        match s.split_once('e') {
            Some((mantissa, exp)) => {
                let mantissa = trim_fraction(mantissa);
                format!("{mantissa}e{exp}")
            }
            None => s,
        }
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{value:.decimals$}")).to_string()
    }
}

/// Strip trailing zeros after a decimal point, and the point itself when
/// nothing remains behind it.
fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_layout_is_pos_neg_interleaved() {
        assert_eq!(column(Species::Pion, Charge::Positive), 0);
        assert_eq!(column(Species::Pion, Charge::Negative), 1);
        assert_eq!(column(Species::Kaon, Charge::Positive), 2);
        assert_eq!(column(Species::Kaon, Charge::Negative), 3);
        assert_eq!(column(Species::Proton, Charge::Positive), 4);
        assert_eq!(column(Species::Proton, Charge::Negative), 5);
    }

    #[test]
    fn test_momentum_bands_for_auau() {
        assert_eq!(row(CollisionSystem::AuAu, 2.9), 0);
        assert_eq!(row(CollisionSystem::AuAu, 3.0), 1);
        assert_eq!(row(CollisionSystem::AuAu, 4.9), 1);
        assert_eq!(row(CollisionSystem::AuAu, 5.0), 2);
        assert_eq!(row(CollisionSystem::AuAu, 12.0), 2);
    }

    #[test]
    fn test_dau_caps_at_row_one() {
        assert_eq!(row(CollisionSystem::DAu, 2.0), 0);
        assert_eq!(row(CollisionSystem::DAu, 4.0), 1);
        assert_eq!(row(CollisionSystem::DAu, 10.0), 1);
    }

    #[test]
    fn test_lookup_low_momentum_auau_kaon() {
        // Row 0, kaon-positive column: 0.11.
        let su = lookup(CollisionSystem::AuAu, Species::Kaon, Charge::Positive, 2.0, 1.0).unwrap();
        assert!((su - 0.11).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_scales_with_value() {
        let su = lookup(CollisionSystem::AuAu, Species::Pion, Charge::Negative, 1.5, 3.0).unwrap();
        assert!((su - 0.27).abs() < 1e-12);
    }

    #[test]
    fn test_lookup_dau_high_momentum_uses_capped_row() {
        // pT 10 would be row 2, but dAu caps at row 1: pion-positive 0.09.
        let su = lookup(CollisionSystem::DAu, Species::Pion, Charge::Positive, 10.0, 2.0).unwrap();
        assert!((su - 0.18).abs() < 1e-12);
    }

    #[test]
    fn test_auau_high_momentum_kaons_are_unavailable() {
        for charge in [Charge::Positive, Charge::Negative] {
            let result = lookup(CollisionSystem::AuAu, Species::Kaon, charge, 6.0, 1.0);
            assert!(matches!(
                result,
                Err(ReformError::UncertaintyUnavailable { momentum, .. }) if momentum == 6.0
            ));
        }
    }

    #[test]
    fn test_all_populated_cells_are_fractions() {
        for table_row in AUAU_TABLE.iter().chain(DAU_TABLE.iter()) {
            for cell in table_row.iter().flatten() {
                assert!(*cell > 0.0 && *cell < 1.0);
            }
        }
    }

    #[test]
    fn test_format_significant_fixed_notation() {
        assert_eq!(format_significant(0.18, 6), "0.18");
        assert_eq!(format_significant(0.099, 6), "0.099");
        assert_eq!(format_significant(123.456789, 6), "123.457");
        assert_eq!(format_significant(0.0, 6), "0");
        assert_eq!(format_significant(-0.27, 6), "-0.27");
    }

    #[test]
    fn test_format_significant_scientific_notation() {
        assert_eq!(format_significant(2.25e-5, 6), "2.25e-5");
        assert_eq!(format_significant(1.234567e8, 6), "1.23457e8");
    }
}

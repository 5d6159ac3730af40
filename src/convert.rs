// License: MIT
// Copyright © 2026 Farm Nutrient Graph contributors

//! Pure unit conversions for feed and forage quantities.
//!
//! All functions are total: a degenerate divisor (zero head count, zero output
//! volume) yields 0 instead of NaN or infinity, so callers never need to guard
//! ratio results.

/// kg N per kg of crude protein.
pub const N_FRACTION_OF_PROTEIN: f64 = 0.16;

/// Converts a feed rate in kg/animal/day into tonnes/year for a group.
pub fn annual_from_per_animal_day(kg_per_animal_day: f64, head: f64) -> f64 {
    kg_per_animal_day * head * 365.0 / 1000.0
}

/// Inverse of [`annual_from_per_animal_day`]. Returns 0 when `head` is 0.
pub fn per_animal_day_from_annual(tonnes_annual: f64, head: f64) -> f64 {
    if head == 0.0 {
        return 0.0;
    }
    tonnes_annual * 1000.0 / (head * 365.0)
}

/// Converts a feed rate in kg per unit of output (e.g. kg/L milk) into
/// tonnes/year, given the annual output total.
pub fn annual_from_per_output_unit(kg_per_unit: f64, output_total: f64) -> f64 {
    kg_per_unit * output_total / 1000.0
}

/// Inverse of [`annual_from_per_output_unit`]. Returns 0 when `output_total`
/// is 0.
pub fn per_output_unit_from_annual(tonnes_annual: f64, output_total: f64) -> f64 {
    if output_total == 0.0 {
        return 0.0;
    }
    tonnes_annual * 1000.0 / output_total
}

/// Fresh-weight tonnes to dry-matter tonnes.
pub fn fresh_to_dry(fresh_tonnes: f64, dm_pct: f64) -> f64 {
    fresh_tonnes * dm_pct / 100.0
}

/// Crude protein percentage to nitrogen percentage.
///
/// The 6.25 factor is the standard protein-to-nitrogen conversion and must
/// not be approximated.
pub fn crude_protein_to_nitrogen_pct(cp_pct: f64) -> f64 {
    cp_pct / 6.25
}

/// Protein tonnes in a forage lot, from fresh weight, DM% and CP% on a dry
/// matter basis.
pub fn protein_tonnes(fresh_tonnes: f64, dm_pct: f64, cp_dm_pct: f64) -> f64 {
    fresh_tonnes * (dm_pct / 100.0) * (cp_dm_pct / 100.0)
}

/// Nitrogen kg contained in the given protein tonnes.
pub fn protein_to_n_kg(protein_t: f64) -> f64 {
    protein_t * 1000.0 * N_FRACTION_OF_PROTEIN
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        if b == 0.0 {
            return a.abs() < 1e-9;
        }
        ((a - b) / b).abs() < 1e-6
    }

    #[test]
    fn test_per_animal_day() {
        // 180 cows fed 8 kg/day is 525.6 t/year.
        assert!(close(annual_from_per_animal_day(8.0, 180.0), 525.6));
        assert!(close(per_animal_day_from_annual(525.6, 180.0), 8.0));
    }

    #[test]
    fn test_per_output_unit() {
        // 0.243 kg concentrate per litre over 1.44M litres.
        assert!(close(annual_from_per_output_unit(0.243, 1_440_000.0), 349.92));
        assert!(close(per_output_unit_from_annual(349.92, 1_440_000.0), 0.243));
    }

    #[test]
    fn test_degenerate_divisors() {
        assert_eq!(per_animal_day_from_annual(100.0, 0.0), 0.0);
        assert_eq!(per_output_unit_from_annual(100.0, 0.0), 0.0);
    }

    #[test]
    fn test_dry_matter() {
        assert!(close(fresh_to_dry(2800.0, 30.0), 840.0));
        assert_eq!(fresh_to_dry(0.0, 88.0), 0.0);
    }

    #[test]
    fn test_crude_protein_factor_is_exact() {
        assert_eq!(crude_protein_to_nitrogen_pct(6.25), 1.0);
        assert_eq!(crude_protein_to_nitrogen_pct(14.0), 14.0 / 6.25);
    }

    #[test]
    fn test_protein_chain() {
        // 2800 t fresh at 30% DM and 14% CP holds 117.6 t protein.
        let protein = protein_tonnes(2800.0, 30.0, 14.0);
        assert!(close(protein, 117.6));
        assert!(close(protein_to_n_kg(protein), 18_816.0));
    }

    proptest! {
        #[test]
        fn prop_animal_day_round_trip(rate in 0.0f64..100.0, head in 1.0f64..10_000.0) {
            let annual = annual_from_per_animal_day(rate, head);
            prop_assert!(close(per_animal_day_from_annual(annual, head), rate));
        }

        #[test]
        fn prop_output_unit_round_trip(rate in 0.0f64..10.0, total in 1.0f64..10_000_000.0) {
            let annual = annual_from_per_output_unit(rate, total);
            prop_assert!(close(per_output_unit_from_annual(annual, total), rate));
        }
    }
}

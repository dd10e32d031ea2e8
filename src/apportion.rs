//! Largest-remainder integer apportionment.
//!
//! Splits a set of non-negative magnitudes into integer shares that sum
//! exactly to a target unit count. Every proportional share is rounded down,
//! then the leftover units go to the entries with the largest fractional
//! remainders. Remainder ties keep input order, so the result is identical
//! on every run and every platform.
//!
//! The same routine backs three consumers: percentage legends (100 units),
//! raster bar layout (pixel columns), and terminal bar layout (character
//! cells).

use crate::error::{Error, Result};

/// Integer percentages summing exactly to 100.
///
/// Shorthand for [`apportion`] with 100 units.
///
/// ```
/// use partviz::apportion::rounded_percentages;
///
/// let shares = rounded_percentages(&[60.0, 30.0, 10.0]).unwrap();
/// assert_eq!(shares, vec![60, 30, 10]);
/// ```
///
/// # Errors
///
/// See [`apportion`].
pub fn rounded_percentages(values: &[f64]) -> Result<Vec<u32>> {
    apportion(values, 100)
}

/// Integer shares of `units` proportional to `values`.
///
/// Each share is `floor(units * value / total)` or that plus one, and the
/// shares sum to exactly `units` regardless of floating-point noise in the
/// intermediate divisions: the leftover is computed from the integer floors,
/// not the raw fractions, and absorbed by the entries with the largest
/// remainders.
///
/// ```
/// use partviz::apportion::apportion;
///
/// // Three equal magnitudes over 10 units: the odd unit goes to index 0.
/// let shares = apportion(&[1.0, 1.0, 1.0], 10).unwrap();
/// assert_eq!(shares, vec![4, 3, 3]);
/// ```
///
/// # Errors
///
/// Returns [`Error::EmptyData`] for an empty slice,
/// [`Error::InvalidValue`] for negative or non-finite entries, and
/// [`Error::ZeroTotal`] when the magnitudes sum to zero.
pub fn apportion(values: &[f64], units: u32) -> Result<Vec<u32>> {
    if values.is_empty() {
        return Err(Error::EmptyData);
    }
    for (index, &value) in values.iter().enumerate() {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::InvalidValue { index, value });
        }
    }
    let total: f64 = values.iter().sum();
    if total <= 0.0 {
        return Err(Error::ZeroTotal);
    }

    Ok(largest_remainder(values, total, units))
}

/// Core allocation over pre-validated input: every entry finite and
/// non-negative, `total` strictly positive.
pub(crate) fn largest_remainder(values: &[f64], total: f64, units: u32) -> Vec<u32> {
    let mut shares = Vec::with_capacity(values.len());
    let mut remainders = Vec::with_capacity(values.len());

    for &value in values {
        let raw = f64::from(units) * value / total;
        let floor = raw.floor();
        shares.push(floor as u32);
        remainders.push(raw - floor);
    }

    let allotted: u32 = shares.iter().sum();
    // Floors cannot overshoot `units` when inputs are valid; saturate so a
    // violated precondition cannot wrap in release builds.
    let deficit = units.saturating_sub(allotted) as usize;
    debug_assert!(
        deficit == 0 || deficit < values.len(),
        "{deficit} leftover units for {} entries",
        values.len()
    );

    let mut order: Vec<usize> = (0..values.len()).collect();
    // sort_by is stable: equal remainders keep input order, so tie bonuses
    // always land on the earliest entries.
    order.sort_by(|&a, &b| remainders[b].total_cmp(&remainders[a]));

    for &index in order.iter().take(deficit) {
        shares[index] += 1;
    }

    shares
}

//! Validation of raw resolution input coming from text, JSON, or floating point controls.

use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde_json::value::RawValue;

use crate::foundation::error::{GridError, GridResult};

/// Check a resolution list before any level is built.
///
/// An empty list is rejected rather than replaced: substituting defaults belongs to the caller.
pub fn validate_resolutions<const N: usize>(resolutions: &[[u32; N]]) -> GridResult<()> {
    if resolutions.is_empty() {
        return Err(GridError::EmptyResolutionList);
    }
    for (position, r) in resolutions.iter().enumerate() {
        if r.contains(&0) {
            return Err(GridError::invalid_resolution(position, format_resolution(r)));
        }
    }
    Ok(())
}

/// Convert a floating point control value into a resolution.
pub fn resolution_from_f64(position: usize, value: f64) -> GridResult<u32> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > f64::from(u32::MAX) {
        return Err(GridError::invalid_resolution(position, value));
    }
    Ok(value as u32)
}

/// Convert a decimal literal into a resolution without going through binary floating point.
///
/// `"4"`, `"4.000"` and `"4e0"` are accepted; `"4.0000000000000001"` is not.
pub fn resolution_from_text(position: usize, text: &str) -> GridResult<u32> {
    let text = text.trim();
    let invalid = || GridError::invalid_resolution(position, text);
    let value = BigDecimal::from_str(text).map_err(|_| invalid())?;
    let (mantissa, scale) = value.normalized().as_bigint_and_exponent();
    // u32::MAX has ten digits, so a mantissa shifted by more than nine places cannot fit.
    if scale > 0 || scale < -9 {
        return Err(invalid());
    }
    let whole = mantissa * num_traits::pow(BigInt::from(10u32), scale.unsigned_abs() as usize);
    whole.to_u32().filter(|&v| v >= 1).ok_or_else(invalid)
}

/// Convert a raw JSON resolution entry: a bare number (1-D) or an array of `N` numbers.
///
/// The raw text is kept so that digits beyond `f64` precision still count.
pub fn resolution_entry_from_json<const N: usize>(
    position: usize,
    raw: &RawValue,
) -> GridResult<[u32; N]> {
    let text = raw.get().trim();
    let invalid = || GridError::invalid_resolution(position, text);
    let parts: Vec<u32> = if text.starts_with('[') {
        let items: Vec<Box<RawValue>> = serde_json::from_str(text).map_err(|_| invalid())?;
        if items.len() != N {
            return Err(invalid());
        }
        items
            .iter()
            .map(|item| resolution_from_text(position, item.get()))
            .collect::<GridResult<_>>()?
    } else if N == 1 {
        vec![resolution_from_text(position, text)?]
    } else {
        return Err(invalid());
    };
    <[u32; N]>::try_from(parts).map_err(|_| invalid())
}

/// Parse a comma separated list: `"4, 7"` for notes, `"4x4, 3x5"` for pixels.
///
/// A trailing comma is accepted. Blank input yields an empty list.
pub fn parse_resolution_list<const N: usize>(text: &str) -> GridResult<Vec<[u32; N]>> {
    let text = text.trim().trim_end_matches(',');
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }
    text.split(',')
        .enumerate()
        .map(|(position, item)| parse_entry::<N>(position, item.trim()))
        .collect()
}

fn parse_entry<const N: usize>(position: usize, item: &str) -> GridResult<[u32; N]> {
    let parts = item
        .split(['x', 'X'])
        .map(|p| {
            resolution_from_text(position, p)
                .map_err(|_| GridError::invalid_resolution(position, item))
        })
        .collect::<GridResult<Vec<u32>>>()?;
    <[u32; N]>::try_from(parts).map_err(|_| GridError::invalid_resolution(position, item))
}

pub(crate) fn format_resolution<const N: usize>(r: &[u32; N]) -> String {
    r.iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join("x")
}

#[cfg(test)]
#[path = "../../tests/unit/grid/resolution.rs"]
mod tests;

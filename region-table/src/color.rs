//! Region color conversion
//!
//! REAPER exports region colors as decimal integer literals. The dashboard
//! shows them as uppercase hexadecimal, at least six digits wide.

use crate::parser::leading_integer;

/// Convert an integer color value to uppercase hex, zero-padded to 6 digits.
///
/// Values wider than 24 bits keep all of their digits.
///
/// # Example
///
/// ```rust
/// use region_table::color::to_hex;
///
/// assert_eq!(to_hex(255), "0000FF");
/// assert_eq!(to_hex(16777215), "FFFFFF");
/// ```
pub fn to_hex(value: u64) -> String {
    format!("{value:06X}")
}

/// Convert a decimal color literal as delivered by the region table.
///
/// The literal is read with the same leading-integer rule as region
/// offsets, so `"255x"` is 255. Returns `None` when there are no leading
/// digits or the value is negative.
pub fn hex_from_literal(literal: &str) -> Option<String> {
    leading_integer(literal)
        .and_then(|value| u64::try_from(value).ok())
        .map(to_hex)
}

//! Numeric ids exchanged with the page.
//!
//! Handles are passed to JavaScript as plain numbers, so an id coming back may be any `f64`.

/// Largest integer a JavaScript number holds exactly.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Converts an id received from the page back into a handle value.
///
/// Only whole, non-negative numbers up to [`MAX_SAFE_INTEGER`] can be handles. Anything else,
/// including `NaN`, does not name any marker or row.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn handle_id(id: f64) -> Option<u64> {
    if id.is_finite() && id >= 0.0 && id.fract() == 0.0 && id <= MAX_SAFE_INTEGER {
        Some(id as u64)
    } else {
        None
    }
}

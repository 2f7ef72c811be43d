// ============================================================
// Layer 6: Optional Reads
// ============================================================
// Some reads are allowed to fail quietly: the baseline report
// when phase 2 prints its comparison, the dataset counts in the
// demo sidebar, the model artifact at server start. A failure
// there is logged at debug level and becomes None.

use std::fmt::Display;

/// Run `f`; on error log `what` with the error and return None.
pub fn try_or_none<T, E, F>(what: &str, f: F) -> Option<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match f() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!("{what} unavailable: {e:#}");
            None
        }
    }
}

use serde::Serialize;

/// Remaining lifetime of a registry record, derived on every read.
///
/// Never stored: registry answers are re-derived from `last_updated`, so a
/// record read twice a minute apart reports two different `remaining` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Freshness {
    pub remaining: u64,
    pub expired: bool,
    pub elapsed: i64,
}

impl Freshness {
    /// `elapsed = now - last_updated`, `remaining = max(0, ttl - elapsed)`.
    ///
    /// A `last_updated` in the future yields a negative `elapsed` and a
    /// `remaining` larger than `ttl`.
    pub fn compute(ttl: u64, last_updated: u64, now_secs: u64) -> Self {
        let elapsed = now_secs as i64 - last_updated as i64;
        let remaining = (ttl as i128 - elapsed as i128).clamp(0, u64::MAX as i128) as u64;

        Self {
            remaining,
            expired: remaining == 0,
            elapsed,
        }
    }
}

/// Wall-clock source.
///
/// Cache expiry works in milliseconds, record freshness in seconds; both
/// come from the same clock so tests can drive time explicitly.
pub trait Clock: Send + Sync {
    fn now_millis(&self) -> u64;

    fn now_secs(&self) -> u64 {
        self.now_millis() / 1000
    }
}

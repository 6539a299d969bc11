use super::Config;

/// About one tick per animation frame at 25 fps.
pub const TICK_MS: u64 = 40;
pub const CACHE_CAPACITY: usize = crate::lyrics::TimelineCache::DEFAULT_CAPACITY;
pub const LOG_LEVEL: &str = "warn";

/// Config written on first run.
pub fn defaults() -> Config {
    Config::default()
}

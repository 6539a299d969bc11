//! Timed lyrics (LRC / LRCP) parsing and playback lookups for the homesong
//! music library.

pub mod config;
pub mod lyrics;

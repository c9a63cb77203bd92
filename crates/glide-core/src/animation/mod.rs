//! Tween playback
//!
//! - `spec` - Immutable from/to property snapshots with timing
//! - `playback` - Player advancing timed and scrubbed instances

pub mod playback;
pub mod spec;

pub use playback::{PlaybackStats, PlaybackToken, Player};
pub use spec::{AnimationSpec, PropertySet};

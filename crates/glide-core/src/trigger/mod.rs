//! Scroll triggers
//!
//! - `descriptor` - What a trigger watches and what it drives
//! - `registry` - Arena of live triggers evaluated once per frame

pub mod descriptor;
pub mod registry;

pub use descriptor::{TriggerDescriptor, TriggerMode, DEFAULT_ACTIVATION_EDGE};
pub use registry::{visibility_ratio, Evaluation, TriggerHandle, TriggerRegistry, TriggerState};

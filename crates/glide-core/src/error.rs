use serde::Serialize;
use thiserror::Error;

use crate::scene::ElementId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Section not mounted: {0}")]
    SectionNotFound(u32),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Per-frame faults. The pipeline absorbs these and retries on a later tick;
/// they are reported for diagnostics only and never reach the caller as errors.
#[derive(Error, Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "fault", content = "element", rename_all = "snake_case")]
pub enum FrameFault {
    /// Region has no measured size yet
    #[error("region {0} has not been laid out")]
    LayoutNotReady(ElementId),

    /// Cached scrollable range no longer matches the content
    #[error("scrollable range of {0} is stale")]
    StaleRange(ElementId),

    /// Element was removed from the render tree
    #[error("element {0} is detached")]
    TargetDetached(ElementId),
}

impl FrameFault {
    pub fn element(&self) -> ElementId {
        match self {
            FrameFault::LayoutNotReady(id)
            | FrameFault::StaleRange(id)
            | FrameFault::TargetDetached(id) => *id,
        }
    }
}

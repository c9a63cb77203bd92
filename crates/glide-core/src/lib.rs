pub mod animation;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod geometry;
pub mod pinned;
pub mod reveal;
pub mod scene;
pub mod scroll;
pub mod trigger;

pub use config::{AppConfig, EasingType, RevealConfig, ScrollConfig, UiConfig};
pub use coordinator::{Coordinator, FrameReport};
pub use error::{Error, FrameFault, Result};
pub use geometry::{Rect, Viewport};
pub use reveal::{BindingKind, RevealPreset, SectionBinding, SectionId};
pub use scene::{ElementId, Property, RenderTarget, Scene};

//! Smooth scrolling engine
//!
//! Intercepts wheel/touch input and publishes an interpolated scroll position
//! on every frame, in the manner of a browser smooth-scroll library.
//!
//! # Architecture
//!
//! ## L4 Atomic Layer
//! - `easing` - Pure easing functions (power, exponential, in-out)
//! - `timing` - Time calculation utilities (progress, interpolation, damping)
//! - `config` - Configuration helpers (re-exported from `crate::config`)
//!
//! ## L3 Molecular Layer
//! - `engine` - Scroll engine combining atoms
//! - `host` - Viewport host contract and the capture guard
//!
//! # Usage
//!
//! ```ignore
//! use glide_core::scroll::{ScrollInput, SmoothScroller};
//!
//! let mut scroller = SmoothScroller::with_defaults();
//! scroller.set_limit(document_height - viewport_height);
//!
//! // Feed native input as it arrives
//! scroller.input(ScrollInput::Wheel { delta: 120.0 });
//!
//! // Once per frame, with the frame timestamp
//! let state = scroller.tick(now);
//! ```

// L4 Atomic Layer
pub mod config;
pub mod easing;
pub mod timing;

// L3 Molecular Layer
pub mod engine;
pub mod host;

// Re-exports for convenient access
pub use config::{ScrollConfig, ScrollConfigExt};
pub use easing::{EasingType, EasingTypeExt};
pub use engine::{ScrollInput, ScrollState, SmoothScroller};
pub use host::{ScrollCapture, ViewportHost};

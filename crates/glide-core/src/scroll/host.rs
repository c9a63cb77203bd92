//! L3 Molecular Layer: Viewport host contract
//!
//! The host owns native scrolling. Smooth scrolling overrides it while a
//! [`ScrollCapture`] is alive and hands it back when the guard drops, whether
//! the session ends normally, returns early with an error, or unwinds.

use tracing::debug;

use crate::geometry::Viewport;

/// Provides the viewport and native scroll behavior
pub trait ViewportHost {
    /// Current viewport size
    fn viewport(&self) -> Viewport;

    /// Stop native scrolling and route scroll input to the engine
    fn capture_scroll(&mut self) -> crate::Result<()>;

    /// Restore native scrolling
    fn release_scroll(&mut self);
}

impl<H: ViewportHost + ?Sized> ViewportHost for &mut H {
    fn viewport(&self) -> Viewport {
        (**self).viewport()
    }

    fn capture_scroll(&mut self) -> crate::Result<()> {
        (**self).capture_scroll()
    }

    fn release_scroll(&mut self) {
        (**self).release_scroll()
    }
}

/// Holds native scrolling captured until dropped
pub struct ScrollCapture<H: ViewportHost> {
    host: H,
    active: bool,
}

impl<H: ViewportHost> ScrollCapture<H> {
    /// Capture native scrolling on `host`
    pub fn acquire(mut host: H) -> crate::Result<Self> {
        host.capture_scroll()?;
        debug!("Native scrolling captured");
        Ok(Self { host, active: true })
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn viewport(&self) -> Viewport {
        self.host.viewport()
    }

    /// Release explicitly instead of waiting for drop
    pub fn release(&mut self) {
        if std::mem::take(&mut self.active) {
            self.host.release_scroll();
            debug!("Native scrolling restored");
        }
    }
}

impl<H: ViewportHost> Drop for ScrollCapture<H> {
    fn drop(&mut self) {
        self.release();
    }
}

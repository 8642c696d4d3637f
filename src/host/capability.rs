use crate::foundation::core::{Bounds, OverlayId, Vec2};
use crate::foundation::error::{SegueError, SegueResult};

/// Measures the live geometry of a host node.
///
/// `None` means the node cannot be measured (already detached, not laid out by the host).
pub trait Measure<N: ?Sized> {
    /// Current viewport-space bounds of `node`.
    fn measure(&self, node: &N) -> Option<Bounds>;
}

impl<N: ?Sized, F> Measure<N> for F
where
    F: Fn(&N) -> Option<Bounds>,
{
    fn measure(&self, node: &N) -> Option<Bounds> {
        self(node)
    }
}

/// Requests one callback per upcoming display refresh.
///
/// The host answers each request by calling `Broker::on_frame` on the next refresh. Repeated
/// requests before that refresh may be coalesced.
pub trait FrameScheduler {
    /// Ask for the next animation frame.
    fn schedule_frame(&mut self);
}

/// Requests a re-render of the tree.
///
/// Contract: the host must not re-enter the broker from inside this call. It re-renders later and
/// reports the commit through `Broker::render_committed`.
pub trait RenderInvalidator {
    /// Mark the tree dirty.
    fn request_render(&mut self);
}

/// Reports how far the host's document is scrolled.
pub trait ScrollSource {
    /// Current scroll offset (`x` horizontal, `y` vertical).
    fn scroll_offset(&self) -> Vec2;
}

/// Floating layer able to host out-of-flow overlay nodes.
pub trait OverlayLayer<C> {
    /// Mount a floating node at `bounds` showing `content`.
    fn mount(&mut self, name: &str, bounds: Bounds, content: C) -> OverlayId;
    /// Write new geometry onto a mounted overlay.
    fn update(&mut self, id: OverlayId, bounds: Bounds);
    /// Swap the overlay's content in one step.
    fn replace_content(&mut self, id: OverlayId, content: C);
    /// Remove a mounted overlay.
    fn unmount(&mut self, id: OverlayId);
}

struct NoScroll;

impl ScrollSource for NoScroll {
    fn scroll_offset(&self) -> Vec2 {
        Vec2::ZERO
    }
}

/// Validated bundle of host capabilities consumed by the broker.
pub struct Capabilities<C> {
    pub(crate) frames: Box<dyn FrameScheduler>,
    pub(crate) overlays: Box<dyn OverlayLayer<C>>,
    pub(crate) invalidator: Box<dyn RenderInvalidator>,
    pub(crate) scroll: Box<dyn ScrollSource>,
}

impl<C> Capabilities<C> {
    /// Start assembling a capability bundle.
    pub fn builder() -> CapabilitiesBuilder<C> {
        CapabilitiesBuilder::default()
    }
}

/// Builder for [`Capabilities`]; `build` rejects bundles with a missing required member.
pub struct CapabilitiesBuilder<C> {
    frames: Option<Box<dyn FrameScheduler>>,
    overlays: Option<Box<dyn OverlayLayer<C>>>,
    invalidator: Option<Box<dyn RenderInvalidator>>,
    scroll: Option<Box<dyn ScrollSource>>,
}

impl<C> Default for CapabilitiesBuilder<C> {
    fn default() -> Self {
        Self {
            frames: None,
            overlays: None,
            invalidator: None,
            scroll: None,
        }
    }
}

impl<C> CapabilitiesBuilder<C> {
    /// Set the frame scheduler (required).
    pub fn frames(mut self, frames: impl FrameScheduler + 'static) -> Self {
        self.frames = Some(Box::new(frames));
        self
    }

    /// Set the overlay layer (required).
    pub fn overlays(mut self, overlays: impl OverlayLayer<C> + 'static) -> Self {
        self.overlays = Some(Box::new(overlays));
        self
    }

    /// Set the render invalidator (required).
    pub fn invalidator(mut self, invalidator: impl RenderInvalidator + 'static) -> Self {
        self.invalidator = Some(Box::new(invalidator));
        self
    }

    /// Set the scroll source (optional; defaults to a host that never scrolls).
    pub fn scroll(mut self, scroll: impl ScrollSource + 'static) -> Self {
        self.scroll = Some(Box::new(scroll));
        self
    }

    /// Validate and assemble the bundle.
    pub fn build(self) -> SegueResult<Capabilities<C>> {
        let mut missing = Vec::new();
        if self.frames.is_none() {
            missing.push("frame scheduler");
        }
        if self.overlays.is_none() {
            missing.push("overlay layer");
        }
        if self.invalidator.is_none() {
            missing.push("render invalidator");
        }
        match (self.frames, self.overlays, self.invalidator) {
            (Some(frames), Some(overlays), Some(invalidator)) => Ok(Capabilities {
                frames,
                overlays,
                invalidator,
                scroll: self.scroll.unwrap_or_else(|| Box::new(NoScroll)),
            }),
            _ => Err(SegueError::capability(format!(
                "missing required host capability: {}",
                missing.join(", ")
            ))),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/capability.rs"]
mod tests;

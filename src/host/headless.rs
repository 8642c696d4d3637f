use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use crate::{
    broker::lifecycle::BrokerHandle,
    foundation::core::{Bounds, OverlayId, Vec2},
    foundation::error::SegueResult,
    host::capability::{
        Capabilities, FrameScheduler, OverlayLayer, RenderInvalidator, ScrollSource,
    },
};

/// One overlay call observed by a [`HeadlessHost`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum OverlayEvent<C> {
    /// A floating node was mounted.
    Mounted {
        /// Overlay identity.
        id: OverlayId,
        /// Transition name.
        name: String,
        /// Initial geometry.
        bounds: Bounds,
        /// Initial content.
        content: C,
    },
    /// Geometry was written.
    Updated {
        /// Overlay identity.
        id: OverlayId,
        /// Transition name.
        name: String,
        /// New geometry.
        bounds: Bounds,
    },
    /// Content was swapped.
    ContentReplaced {
        /// Overlay identity.
        id: OverlayId,
        /// Transition name.
        name: String,
        /// New content.
        content: C,
    },
    /// The floating node was removed.
    Unmounted {
        /// Overlay identity.
        id: OverlayId,
        /// Transition name.
        name: String,
    },
}

/// Overlay currently mounted in a [`HeadlessHost`].
#[derive(Clone, Debug, PartialEq)]
pub struct MountedOverlay<C> {
    /// Transition name.
    pub name: String,
    /// Latest geometry.
    pub bounds: Bounds,
    /// Latest content.
    pub content: C,
}

struct State<C> {
    next_id: u64,
    scroll: Vec2,
    render_requested: bool,
    frame_requested: bool,
    renders_requested: u64,
    frames_requested: u64,
    mounted: BTreeMap<OverlayId, MountedOverlay<C>>,
    events: Vec<OverlayEvent<C>>,
}

/// In-memory host implementing every capability.
///
/// Clones share state, so one clone can be handed to the broker while another inspects what the
/// broker did.
pub struct HeadlessHost<C>(Rc<RefCell<State<C>>>);

impl<C> Clone for HeadlessHost<C> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<C> Default for HeadlessHost<C> {
    fn default() -> Self {
        Self(Rc::new(RefCell::new(State {
            next_id: 0,
            scroll: Vec2::ZERO,
            render_requested: false,
            frame_requested: false,
            renders_requested: 0,
            frames_requested: 0,
            mounted: BTreeMap::new(),
            events: Vec::new(),
        })))
    }
}

impl<C: Clone + 'static> HeadlessHost<C> {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capability bundle backed by this host.
    pub fn capabilities(&self) -> SegueResult<Capabilities<C>> {
        Capabilities::builder()
            .frames(self.clone())
            .overlays(self.clone())
            .invalidator(self.clone())
            .scroll(self.clone())
            .build()
    }
}

impl<C> HeadlessHost<C> {
    /// Change the reported scroll offset.
    pub fn set_scroll(&self, offset: Vec2) {
        self.0.borrow_mut().scroll = offset;
    }

    /// Consume an outstanding re-render request.
    pub fn take_render_request(&self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().render_requested)
    }

    /// Consume an outstanding frame request.
    pub fn take_frame_request(&self) -> bool {
        std::mem::take(&mut self.0.borrow_mut().frame_requested)
    }

    /// Total re-render requests received.
    pub fn renders_requested(&self) -> u64 {
        self.0.borrow().renders_requested
    }

    /// Total frame requests received.
    pub fn frames_requested(&self) -> u64 {
        self.0.borrow().frames_requested
    }

    /// Number of overlays currently mounted.
    pub fn mounted_count(&self) -> usize {
        self.0.borrow().mounted.len()
    }
}

impl<C: Clone> HeadlessHost<C> {
    /// Overlays currently mounted, ordered by id.
    pub fn mounted(&self) -> Vec<MountedOverlay<C>> {
        self.0.borrow().mounted.values().cloned().collect()
    }

    /// The mounted overlay for `name`, if any.
    pub fn overlay_for(&self, name: &str) -> Option<MountedOverlay<C>> {
        self.0
            .borrow()
            .mounted
            .values()
            .find(|o| o.name == name)
            .cloned()
    }

    /// Every overlay call observed so far.
    pub fn events(&self) -> Vec<OverlayEvent<C>> {
        self.0.borrow().events.clone()
    }

    /// Drain the overlay call log.
    pub fn take_events(&self) -> Vec<OverlayEvent<C>> {
        std::mem::take(&mut self.0.borrow_mut().events)
    }
}

impl<C> FrameScheduler for HeadlessHost<C> {
    fn schedule_frame(&mut self) {
        let mut s = self.0.borrow_mut();
        s.frame_requested = true;
        s.frames_requested += 1;
    }
}

impl<C> RenderInvalidator for HeadlessHost<C> {
    fn request_render(&mut self) {
        let mut s = self.0.borrow_mut();
        s.render_requested = true;
        s.renders_requested += 1;
    }
}

impl<C> ScrollSource for HeadlessHost<C> {
    fn scroll_offset(&self) -> Vec2 {
        self.0.borrow().scroll
    }
}

impl<C: Clone> OverlayLayer<C> for HeadlessHost<C> {
    fn mount(&mut self, name: &str, bounds: Bounds, content: C) -> OverlayId {
        let mut s = self.0.borrow_mut();
        let id = OverlayId(s.next_id);
        s.next_id += 1;
        s.mounted.insert(
            id,
            MountedOverlay {
                name: name.to_string(),
                bounds,
                content: content.clone(),
            },
        );
        s.events.push(OverlayEvent::Mounted {
            id,
            name: name.to_string(),
            bounds,
            content,
        });
        id
    }

    fn update(&mut self, id: OverlayId, bounds: Bounds) {
        let mut s = self.0.borrow_mut();
        let Some(o) = s.mounted.get_mut(&id) else {
            return;
        };
        o.bounds = bounds;
        let name = o.name.clone();
        s.events.push(OverlayEvent::Updated { id, name, bounds });
    }

    fn replace_content(&mut self, id: OverlayId, content: C) {
        let mut s = self.0.borrow_mut();
        let Some(o) = s.mounted.get_mut(&id) else {
            return;
        };
        o.content = content.clone();
        let name = o.name.clone();
        s.events
            .push(OverlayEvent::ContentReplaced { id, name, content });
    }

    fn unmount(&mut self, id: OverlayId) {
        let mut s = self.0.borrow_mut();
        if let Some(o) = s.mounted.remove(&id) {
            s.events.push(OverlayEvent::Unmounted { id, name: o.name });
        }
    }
}

/// Result of driving a broker with [`pump`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct PumpStats {
    /// Render commits reported to the broker.
    pub commits: u64,
    /// Animation frames delivered to the broker.
    pub frames: u64,
    /// `false` when `max_frames` was hit with frames still requested.
    pub settled: bool,
}

/// Deliver outstanding render commits and frames until the host goes quiet.
///
/// Commits are always delivered before the next frame, matching a host that finishes a render
/// pass before its next refresh.
pub fn pump<C>(
    broker: &BrokerHandle<C>,
    host: &HeadlessHost<C>,
    max_frames: u64,
) -> SegueResult<PumpStats> {
    let mut stats = PumpStats::default();
    loop {
        if host.take_render_request() {
            broker.render_committed()?;
            stats.commits += 1;
            continue;
        }
        if host.0.borrow().frame_requested {
            if stats.frames >= max_frames {
                return Ok(stats);
            }
            host.take_frame_request();
            broker.on_frame()?;
            stats.frames += 1;
            continue;
        }
        stats.settled = true;
        return Ok(stats);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;

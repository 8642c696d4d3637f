use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    broker::opts::BrokerOpts,
    broker::scheduler::{self, FrameOutcome},
    foundation::core::{Bounds, OverlayId, Vec2},
    foundation::error::{SegueError, SegueResult},
    host::capability::Capabilities,
    slot::render::Renderer,
    transition::completion::{Completion, Outcome},
    transition::record::{Capture, Lifecycle, Readiness, RecordSnapshot},
    transition::registry::TransitionRegistry,
};

/// Receives lifecycle notifications from every slot and turns them into transitions.
///
/// The departing occurrence's unmount and the arriving occurrence's mount/start can reach the
/// broker in any order. Each call records its part of the `(from_state, to_state, from_rect,
/// to_rect)` quadruple and re-checks readiness; whichever call completes the quadruple arms the
/// record.
///
/// Convention: the arriving occurrence calls [`Broker::start_transition`] with its own measured
/// rectangle, which becomes the destination. The departing occurrence supplies the origin through
/// [`Broker::register_unmount`].
///
/// Both handoffs are two-step. On arming, the broker marks the record running and asks the host to
/// re-render; only once the host reports the commit through [`Broker::render_committed`] is the
/// overlay mounted and the first frame requested. On completion, the record returns to idle and a
/// re-render is requested, but the overlay stays up until that render commits, so the name never
/// goes blank between the last frame and the real occurrence drawing itself.
pub struct Broker<C> {
    registry: TransitionRegistry<C>,
    caps: Capabilities<C>,
    opts: BrokerOpts,
    frame_requested: bool,
    // Overlays of finished runs, removed on the next render commit.
    retiring: Vec<OverlayId>,
}

impl<C> Broker<C> {
    /// Create a broker over a validated capability bundle.
    pub fn new(caps: Capabilities<C>, opts: BrokerOpts) -> SegueResult<Self> {
        opts.validate()?;
        Ok(Self {
            registry: TransitionRegistry::new(),
            caps,
            opts,
            frame_requested: false,
            retiring: Vec::new(),
        })
    }

    /// Options the broker was created with.
    pub fn opts(&self) -> &BrokerOpts {
        &self.opts
    }

    /// An occurrence of `name` in `state` is about to enter the tree.
    #[tracing::instrument(level = "debug", skip(self, renderer))]
    pub fn register_mount(&mut self, name: &str, state: &str, renderer: Renderer<C>) {
        self.dispatch(
            name,
            Lifecycle::Mount {
                state: state.to_string(),
                renderer,
            },
        );
    }

    /// An occurrence of `name` in `state` is about to leave the tree; `rect` was measured before
    /// removal (`None` if the host could not measure it).
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn register_unmount(&mut self, name: &str, state: &str, rect: Option<Bounds>) {
        let scroll = self.caps.scroll.scroll_offset();
        self.dispatch(
            name,
            Lifecycle::Unmount {
                state: state.to_string(),
                rect,
                scroll,
            },
        );
    }

    /// An occurrence of `name` in `state` finished mounting and measured itself at `rect`.
    ///
    /// Returns the completion of the transition this occurrence arrives through, or `None` when
    /// there is nothing to wait for (first sighting, remount into the idle state, unknown name).
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start_transition(
        &mut self,
        name: &str,
        state: &str,
        rect: Option<Bounds>,
    ) -> Option<Completion> {
        let scroll = self.caps.scroll.scroll_offset();
        self.dispatch(
            name,
            Lifecycle::Start {
                state: state.to_string(),
                rect,
                scroll,
                completion: None,
            },
        )
    }

    /// Whether the occurrence `(name, state)` should draw its own content this render pass.
    ///
    /// `false` while a transition for `name` is in flight (the overlay stands in) and for any
    /// state other than the record's idle state.
    pub fn should_render_content(&self, name: &str, state: &str) -> bool {
        match self.registry.get(name) {
            None => true,
            Some(rec) => !rec.is_running() && rec.from_state == state,
        }
    }

    /// The host committed the re-render requested by the broker.
    ///
    /// Overlays of finished runs are removed now that the arrival draws itself. Armed records get
    /// their overlay mounted now that the real occurrences are hidden, then the first animation
    /// frame is requested.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn render_committed(&mut self) {
        scheduler::teardown(&mut self.retiring, &mut *self.caps.overlays);
        let mut launched = false;
        for rec in self.registry.running_mut() {
            launched |= scheduler::launch(rec, &mut *self.caps.overlays);
        }
        if launched {
            self.request_frame();
        }
    }

    /// The host's animation-frame callback.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_frame(&mut self) {
        self.frame_requested = false;
        let mut finished = Vec::new();
        let mut active = false;
        for rec in self.registry.running_mut() {
            match scheduler::advance(rec, &self.opts.easing, &mut *self.caps.overlays) {
                FrameOutcome::Finished => finished.push(rec.name.clone()),
                FrameOutcome::Advanced => active = true,
                FrameOutcome::Waiting => {}
            }
        }

        let any_finished = !finished.is_empty();
        for name in finished {
            self.finish(&name);
        }
        if any_finished {
            // Hand the screen back to the occurrences now idle at their arrival state.
            self.caps.invalidator.request_render();
        }
        if active {
            self.request_frame();
        }
    }

    /// Snapshot of the record for `name`.
    pub fn snapshot(&self, name: &str) -> Option<RecordSnapshot> {
        self.registry.get(name).map(|r| r.snapshot())
    }

    /// Snapshots of every record, in insertion order.
    pub fn snapshots(&self) -> Vec<RecordSnapshot> {
        self.registry.iter().map(|r| r.snapshot()).collect()
    }

    /// Return `true` when no transition is armed or running and no finished overlay is still
    /// waiting for its hand-back commit.
    pub fn is_idle(&self) -> bool {
        self.retiring.is_empty() && self.registry.running().next().is_none()
    }

    fn dispatch(&mut self, name: &str, call: Lifecycle<C>) -> Option<Completion> {
        if let Some(rec) = self.registry.get_mut(name)
            && rec.is_running()
        {
            // Accepted for the next cycle; the in-flight run keeps its rectangles.
            tracing::debug!(name, "deferred while running");
            let completion = match call {
                Lifecycle::Start {
                    state,
                    rect,
                    scroll,
                    completion,
                } => {
                    let c = completion.unwrap_or_default();
                    rec.deferred.push(Lifecycle::Start {
                        state,
                        rect,
                        scroll,
                        completion: Some(c.clone()),
                    });
                    Some(c)
                }
                other => {
                    rec.deferred.push(other);
                    None
                }
            };
            return completion;
        }

        let completion = match call {
            Lifecycle::Mount { state, renderer } => {
                self.apply_mount(name, &state, renderer);
                None
            }
            Lifecycle::Unmount {
                state,
                rect,
                scroll,
            } => {
                self.apply_unmount(name, &state, rect, scroll);
                None
            }
            Lifecycle::Start {
                state,
                rect,
                scroll,
                completion,
            } => self.apply_start(name, &state, rect, scroll, completion),
        };
        self.reconcile(name);
        completion
    }

    fn apply_mount(&mut self, name: &str, state: &str, renderer: Renderer<C>) {
        let (rec, created) = self.registry.get_or_create(name, state, &renderer);
        if created {
            tracing::debug!(
                name,
                state,
                records = self.registry.len(),
                "new transition slot"
            );
            return;
        }
        rec.renderer = renderer;
        if rec.from_state == state {
            // Back in the idle state: a fresh baseline, not an arrival.
            rec.departed = false;
            rec.from_rect = Capture::Pending;
        } else {
            if rec.to_state.as_deref() != Some(state) {
                rec.to_rect = Capture::Pending;
            }
            rec.to_state = Some(state.to_string());
        }
    }

    fn apply_unmount(
        &mut self,
        name: &str,
        state: &str,
        rect: Option<Bounds>,
        scroll: Vec2,
    ) {
        let Some(rec) = self.registry.get_mut(name) else {
            tracing::trace!(name, "unmount for unknown name");
            return;
        };
        if rec.from_state == state {
            rec.from_rect = Capture::taken(rect, scroll);
            rec.departed = true;
        } else if rec.to_state.as_deref() == Some(state) {
            tracing::debug!(name, state, "arrival withdrawn");
            for c in rec.withdraw_arrival() {
                c.resolve(Outcome::Skipped);
            }
        }
    }

    fn apply_start(
        &mut self,
        name: &str,
        state: &str,
        rect: Option<Bounds>,
        scroll: Vec2,
        completion: Option<Completion>,
    ) -> Option<Completion> {
        let arriving = self
            .registry
            .get_mut(name)
            .filter(|rec| rec.to_state.as_deref() == Some(state));
        match arriving {
            Some(rec) => {
                rec.to_rect = Capture::taken(rect, scroll);
                Some(rec.completion_handle(completion))
            }
            None => {
                // A replayed start whose arrival went away in the meantime.
                if let Some(c) = completion {
                    c.resolve(Outcome::Skipped);
                }
                None
            }
        }
    }

    fn reconcile(&mut self, name: &str) {
        let Some(rec) = self.registry.get_mut(name) else {
            return;
        };
        if rec.is_running() {
            return;
        }
        match rec.readiness() {
            Readiness::Pending => {}
            Readiness::Ready => {
                let scroll = self.caps.scroll.scroll_offset();
                rec.arm(scroll, self.opts.scroll_correction);
                tracing::debug!(
                    name,
                    from = %rec.from_state,
                    to = rec.to_state.as_deref().unwrap_or_default(),
                    "transition armed"
                );
                self.caps.invalidator.request_render();
            }
            Readiness::Unmeasurable => {
                let waiters = rec.settle();
                tracing::debug!(
                    name,
                    to = %rec.from_state,
                    "transition skipped, side unmeasurable"
                );
                for c in waiters {
                    c.resolve(Outcome::Skipped);
                }
                self.caps.invalidator.request_render();
            }
        }
    }

    fn finish(&mut self, name: &str) {
        let Some(rec) = self.registry.get_mut(name) else {
            return;
        };
        self.retiring.extend(scheduler::retire(rec));
        let waiters = rec.settle();
        let deferred = std::mem::take(&mut rec.deferred);
        tracing::debug!(
            name,
            to = %rec.from_state,
            replay = deferred.len(),
            "transition complete"
        );
        for c in waiters {
            c.resolve(Outcome::Animated);
        }
        for call in deferred {
            self.dispatch(name, call);
        }
    }

    fn request_frame(&mut self) {
        if !self.frame_requested {
            self.frame_requested = true;
            self.caps.frames.schedule_frame();
        }
    }
}

/// Shared, single-threaded handle to a [`Broker`], injected into every slot.
///
/// Every call borrows the broker for its duration. A capability implementation that calls back
/// into the broker synchronously gets [`SegueError::Reentrant`] instead of a panic.
pub struct BrokerHandle<C>(Rc<RefCell<Broker<C>>>);

impl<C> Clone for BrokerHandle<C> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<C> BrokerHandle<C> {
    /// Wrap a broker for sharing.
    pub fn new(broker: Broker<C>) -> Self {
        Self(Rc::new(RefCell::new(broker)))
    }

    /// Run `f` with exclusive access to the broker.
    pub fn with<R>(&self, f: impl FnOnce(&mut Broker<C>) -> R) -> SegueResult<R> {
        let mut broker = self
            .0
            .try_borrow_mut()
            .map_err(|_| SegueError::reentrant("broker is already in use"))?;
        Ok(f(&mut broker))
    }

    /// Run `f` with shared access to the broker.
    pub fn read<R>(&self, f: impl FnOnce(&Broker<C>) -> R) -> SegueResult<R> {
        let broker = self
            .0
            .try_borrow()
            .map_err(|_| SegueError::reentrant("broker is being mutated"))?;
        Ok(f(&broker))
    }

    /// See [`Broker::register_mount`].
    pub fn register_mount(
        &self,
        name: &str,
        state: &str,
        renderer: Renderer<C>,
    ) -> SegueResult<()> {
        self.with(|b| b.register_mount(name, state, renderer))
    }

    /// See [`Broker::register_unmount`].
    pub fn register_unmount(
        &self,
        name: &str,
        state: &str,
        rect: Option<Bounds>,
    ) -> SegueResult<()> {
        self.with(|b| b.register_unmount(name, state, rect))
    }

    /// See [`Broker::start_transition`].
    pub fn start_transition(
        &self,
        name: &str,
        state: &str,
        rect: Option<Bounds>,
    ) -> SegueResult<Option<Completion>> {
        self.with(|b| b.start_transition(name, state, rect))
    }

    /// See [`Broker::should_render_content`].
    pub fn should_render_content(&self, name: &str, state: &str) -> SegueResult<bool> {
        self.read(|b| b.should_render_content(name, state))
    }

    /// See [`Broker::render_committed`].
    pub fn render_committed(&self) -> SegueResult<()> {
        self.with(|b| b.render_committed())
    }

    /// See [`Broker::on_frame`].
    pub fn on_frame(&self) -> SegueResult<()> {
        self.with(|b| b.on_frame())
    }

    /// See [`Broker::snapshot`].
    pub fn snapshot(&self, name: &str) -> SegueResult<Option<RecordSnapshot>> {
        self.read(|b| b.snapshot(name))
    }

    /// See [`Broker::snapshots`].
    pub fn snapshots(&self) -> SegueResult<Vec<RecordSnapshot>> {
        self.read(|b| b.snapshots())
    }

    /// See [`Broker::is_idle`].
    pub fn is_idle(&self) -> SegueResult<bool> {
        self.read(|b| b.is_idle())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/broker/lifecycle.rs"]
mod tests;

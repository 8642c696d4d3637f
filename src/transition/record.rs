use crate::{
    animation::{ease::EaseOut, lerp::Lerp},
    foundation::core::{Bounds, OverlayId, Vec2},
    slot::render::{Presentation, Renderer},
    transition::completion::Completion,
};

/// Rectangle capture for one side of a transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Capture {
    /// The side has not reported yet.
    Pending,
    /// Geometry taken while the host was scrolled by `scroll`.
    Measured {
        /// Viewport-space snapshot.
        bounds: Bounds,
        /// Host scroll offset at capture time.
        scroll: Vec2,
    },
    /// The side reported but the host could not measure it.
    Unmeasurable,
}

impl Capture {
    pub(crate) fn taken(bounds: Option<Bounds>, scroll: Vec2) -> Self {
        match bounds {
            Some(bounds) => Self::Measured { bounds, scroll },
            None => Self::Unmeasurable,
        }
    }

    /// Captured geometry, if any.
    pub(crate) fn bounds(&self) -> Option<Bounds> {
        match self {
            Self::Measured { bounds, .. } => Some(*bounds),
            _ => None,
        }
    }

    // A rect captured at scroll `s0` sits at `rect + s0 - s1` once the host scrolled to `s1`.
    fn corrected(&self, scroll_now: Vec2, enabled: bool) -> Option<Bounds> {
        match self {
            Self::Measured { bounds, scroll } if enabled => {
                Some(bounds.translate(*scroll - scroll_now))
            }
            Self::Measured { bounds, .. } => Some(*bounds),
            _ => None,
        }
    }
}

/// Scheduler ownership of a record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Quiescent at `from_state`, possibly with a pending arrival.
    Idle,
    /// Armed; waiting for the host to commit the re-render that mounts the overlay.
    Armed,
    /// Overlay mounted; advanced once per frame.
    Running,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Readiness {
    Pending,
    Ready,
    Unmeasurable,
}

/// One lifecycle call, applied immediately or queued while the record is running.
pub(crate) enum Lifecycle<C> {
    Mount {
        state: String,
        renderer: Renderer<C>,
    },
    Unmount {
        state: String,
        rect: Option<Bounds>,
        scroll: Vec2,
    },
    Start {
        state: String,
        rect: Option<Bounds>,
        scroll: Vec2,
        completion: Option<Completion>,
    },
}

/// Per-name transition state.
pub(crate) struct TransitionRecord<C> {
    pub(crate) name: String,
    pub(crate) from_state: String,
    pub(crate) to_state: Option<String>,
    pub(crate) from_rect: Capture,
    pub(crate) to_rect: Capture,
    // The from-occurrence unmounted during the current cycle.
    pub(crate) departed: bool,
    pub(crate) start_rect: Option<Bounds>,
    pub(crate) target_rect: Option<Bounds>,
    pub(crate) moving_rect: Option<Bounds>,
    pub(crate) progress: f64,
    pub(crate) renderer: Renderer<C>,
    pub(crate) phase: Phase,
    pub(crate) first_run: bool,
    pub(crate) frames: u32,
    pub(crate) overlay: Option<OverlayId>,
    pub(crate) waiters: Vec<Completion>,
    pub(crate) deferred: Vec<Lifecycle<C>>,
    pub(crate) cycles: u64,
}

impl<C> TransitionRecord<C> {
    pub(crate) fn new(
        name: impl Into<String>,
        state: impl Into<String>,
        renderer: Renderer<C>,
    ) -> Self {
        Self {
            name: name.into(),
            from_state: state.into(),
            to_state: None,
            from_rect: Capture::Pending,
            to_rect: Capture::Pending,
            departed: false,
            start_rect: None,
            target_rect: None,
            moving_rect: None,
            progress: 0.0,
            renderer,
            phase: Phase::Idle,
            first_run: false,
            frames: 0,
            overlay: None,
            waiters: Vec::new(),
            deferred: Vec::new(),
            cycles: 0,
        }
    }

    /// Return `true` while the scheduler owns the record.
    pub(crate) fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub(crate) fn readiness(&self) -> Readiness {
        if self.to_state.is_none() {
            return Readiness::Pending;
        }
        if self.to_rect == Capture::Unmeasurable
            || (self.departed && self.from_rect == Capture::Unmeasurable)
        {
            return Readiness::Unmeasurable;
        }
        match (self.departed, &self.from_rect, &self.to_rect) {
            (true, Capture::Measured { .. }, Capture::Measured { .. }) => Readiness::Ready,
            _ => Readiness::Pending,
        }
    }

    /// Hand the record to the scheduler. Only called on a ready record.
    pub(crate) fn arm(&mut self, scroll_now: Vec2, scroll_correction: bool) {
        debug_assert_eq!(self.readiness(), Readiness::Ready);
        let start = self.from_rect.corrected(scroll_now, scroll_correction);
        let target = self.to_rect.corrected(scroll_now, scroll_correction);
        self.phase = Phase::Armed;
        self.progress = 0.0;
        self.frames = 0;
        self.first_run = true;
        self.start_rect = start;
        self.target_rect = target;
        self.moving_rect = start;
    }

    /// Advance one frame. Returns `true` once progress reached `1`.
    pub(crate) fn step(&mut self, ease: &EaseOut) -> bool {
        self.progress = ease.step(self.progress);
        self.frames = self.frames.saturating_add(1);
        if let (Some(start), Some(target)) = (self.start_rect, self.target_rect) {
            self.moving_rect = Some(Bounds::lerp(&start, &target, self.progress));
        }
        self.progress >= 1.0
    }

    /// Completion transform: become idle at the arrival state.
    pub(crate) fn settle(&mut self) -> Vec<Completion> {
        if let Some(to) = self.to_state.take() {
            self.from_state = to;
        }
        self.from_rect = std::mem::replace(&mut self.to_rect, Capture::Pending);
        self.departed = false;
        self.start_rect = None;
        self.target_rect = None;
        self.moving_rect = None;
        self.progress = 0.0;
        self.phase = Phase::Idle;
        self.first_run = false;
        self.frames = 0;
        self.cycles += 1;
        std::mem::take(&mut self.waiters)
    }

    /// Forget a pending arrival whose occurrence left before the record armed.
    pub(crate) fn withdraw_arrival(&mut self) -> Vec<Completion> {
        self.to_state = None;
        self.to_rect = Capture::Pending;
        std::mem::take(&mut self.waiters)
    }

    /// Completion of the current cycle; `given` joins it when supplied.
    pub(crate) fn completion_handle(&mut self, given: Option<Completion>) -> Completion {
        match given {
            Some(c) => {
                self.waiters.push(c.clone());
                c
            }
            None => match self.waiters.first() {
                Some(c) => c.clone(),
                None => {
                    let c = Completion::new();
                    self.waiters.push(c.clone());
                    c
                }
            },
        }
    }

    /// Presentation handed to the renderer while the overlay stands in.
    pub(crate) fn overlay_content(&self) -> Option<C> {
        let to = self.to_state.as_deref()?;
        Some(self.renderer.render(&Presentation::morphing(
            &self.name,
            &self.from_state,
            to,
            self.first_run,
        )))
    }

    /// Serializable view of the record.
    pub(crate) fn snapshot(&self) -> RecordSnapshot {
        RecordSnapshot {
            name: self.name.clone(),
            from_state: self.from_state.clone(),
            to_state: self.to_state.clone(),
            from_rect: self.from_rect.bounds(),
            to_rect: self.to_rect.bounds(),
            moving_rect: self.moving_rect,
            progress: self.progress,
            phase: self.phase,
            first_run: self.first_run,
            deferred: self.deferred.len(),
            cycles: self.cycles,
        }
    }
}

/// Point-in-time view of a [`TransitionRecord`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RecordSnapshot {
    /// Transition name.
    pub name: String,
    /// Idle (or departing) state.
    pub from_state: String,
    /// Pending or in-flight arrival state.
    pub to_state: Option<String>,
    /// Departing side geometry.
    pub from_rect: Option<Bounds>,
    /// Arriving side geometry.
    pub to_rect: Option<Bounds>,
    /// Latest interpolated geometry while running.
    pub moving_rect: Option<Bounds>,
    /// Progress in `[0, 1]`.
    pub progress: f64,
    /// Scheduler phase.
    pub phase: Phase,
    /// Overlay still shows the departing state.
    pub first_run: bool,
    /// Lifecycle calls waiting for the current run to end.
    pub deferred: usize,
    /// Completed (animated or skipped) cycles.
    pub cycles: u64,
}

#[cfg(test)]
#[path = "../../tests/unit/transition/record.rs"]
mod tests;

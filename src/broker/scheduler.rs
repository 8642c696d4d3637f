use crate::{
    animation::ease::EaseOut,
    foundation::core::OverlayId,
    host::capability::OverlayLayer,
    transition::record::{Phase, TransitionRecord},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum FrameOutcome {
    /// Not running yet (still waiting for the render commit).
    Waiting,
    /// Stepped; more frames needed.
    Advanced,
    /// Reached `progress == 1`.
    Finished,
}

/// Mount the overlay of an armed record and hand it to the frame loop.
///
/// Returns `false` when the record was not armed.
pub(crate) fn launch<C>(
    record: &mut TransitionRecord<C>,
    overlays: &mut dyn OverlayLayer<C>,
) -> bool {
    if record.phase != Phase::Armed {
        return false;
    }
    let (Some(bounds), Some(content)) = (record.moving_rect, record.overlay_content()) else {
        return false;
    };
    record.overlay = Some(overlays.mount(&record.name, bounds, content));
    record.phase = Phase::Running;
    tracing::debug!(name = %record.name, "overlay mounted");
    true
}

/// Advance one running record by a single frame.
///
/// The overlay keeps the departing content for exactly the first frame; from the second frame on
/// it shows the arrival state.
pub(crate) fn advance<C>(
    record: &mut TransitionRecord<C>,
    ease: &EaseOut,
    overlays: &mut dyn OverlayLayer<C>,
) -> FrameOutcome {
    if record.phase != Phase::Running {
        return FrameOutcome::Waiting;
    }
    let Some(id) = record.overlay else {
        return FrameOutcome::Waiting;
    };

    if record.first_run && record.frames > 0 {
        record.first_run = false;
        if let Some(content) = record.overlay_content() {
            overlays.replace_content(id, content);
        }
    }

    let done = record.step(ease);
    if let Some(bounds) = record.moving_rect {
        overlays.update(id, bounds);
    }
    tracing::trace!(name = %record.name, progress = record.progress, "frame");

    if done {
        FrameOutcome::Finished
    } else {
        FrameOutcome::Advanced
    }
}

/// Detach the overlay from a finished record; it stays mounted until [`teardown`].
pub(crate) fn retire<C>(record: &mut TransitionRecord<C>) -> Option<OverlayId> {
    let id = record.overlay.take()?;
    tracing::debug!(name = %record.name, ?id, "overlay retiring");
    Some(id)
}

/// Unmount retired overlays once the host has drawn the real occurrences.
pub(crate) fn teardown<C>(retiring: &mut Vec<OverlayId>, overlays: &mut dyn OverlayLayer<C>) {
    for id in retiring.drain(..) {
        overlays.unmount(id);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/broker/scheduler.rs"]
mod tests;

use std::path::Path;

use anyhow::Context as _;

use crate::{
    broker::lifecycle::{Broker, BrokerHandle},
    broker::opts::BrokerOpts,
    foundation::core::{Bounds, Vec2},
    foundation::error::{SegueError, SegueResult},
    host::headless::{HeadlessHost, OverlayEvent, PumpStats, pump},
    slot::render::{Presentation, Renderer},
    transition::completion::{Completion, Outcome},
    transition::record::RecordSnapshot,
};

/// Ordered lifecycle calls replayed against a headless host.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Script {
    /// Calls in delivery order.
    pub steps: Vec<Step>,
    /// Frame budget for the final drain; defaults to `10_000`.
    #[serde(default = "default_max_frames")]
    pub max_frames: u64,
}

fn default_max_frames() -> u64 {
    10_000
}

/// One scripted call.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case", deny_unknown_fields)]
pub enum Step {
    /// `register_mount`.
    Mount {
        /// Transition name.
        name: String,
        /// Logical state.
        state: String,
    },
    /// `register_unmount`; a missing `rect` means the node could not be measured.
    Unmount {
        /// Transition name.
        name: String,
        /// Logical state.
        state: String,
        /// Geometry measured before removal.
        #[serde(default)]
        rect: Option<Bounds>,
    },
    /// `start_transition`; a missing `rect` means the node could not be measured.
    Start {
        /// Transition name.
        name: String,
        /// Logical state.
        state: String,
        /// Geometry measured after attach.
        #[serde(default)]
        rect: Option<Bounds>,
    },
    /// Move the host scroll offset.
    Scroll {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
    /// Deliver pending commits and at most `count` frames before the next step.
    Frames {
        /// Frame limit.
        count: u64,
    },
}

/// Completion of one scripted `start` step.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct StartResult {
    /// Index of the step in [`Script::steps`].
    pub step: usize,
    /// Transition name.
    pub name: String,
    /// Logical state.
    pub state: String,
    /// `None` when the call had nothing to wait for or the run is still in flight.
    pub outcome: Option<Outcome>,
}

/// What a script did to the host and the records.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Playback {
    /// Every overlay call, in order.
    pub events: Vec<OverlayEvent<String>>,
    /// Final state of every record.
    pub records: Vec<RecordSnapshot>,
    /// Completions returned by `start` steps.
    pub starts: Vec<StartResult>,
    /// Commits and frames delivered.
    pub stats: PumpStats,
}

impl Script {
    /// Parse and validate a script from JSON.
    pub fn from_json_str(s: &str) -> SegueResult<Self> {
        let script: Self = serde_json::from_str(s).map_err(|e| SegueError::serde(e.to_string()))?;
        script.validate()?;
        Ok(script)
    }

    /// Read, parse and validate a script from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> SegueResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read script '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check names, states and scroll values.
    pub fn validate(&self) -> SegueResult<()> {
        for (i, step) in self.steps.iter().enumerate() {
            match step {
                Step::Mount { name, state }
                | Step::Unmount { name, state, .. }
                | Step::Start { name, state, .. } => {
                    if name.is_empty() || state.is_empty() {
                        return Err(SegueError::validation(format!(
                            "step {i}: name and state must be non-empty"
                        )));
                    }
                }
                Step::Scroll { x, y } => {
                    if !x.is_finite() || !y.is_finite() {
                        return Err(SegueError::validation(format!(
                            "step {i}: scroll offset must be finite"
                        )));
                    }
                }
                Step::Frames { .. } => {}
            }
        }
        Ok(())
    }

    /// Replay the script against a fresh broker and headless host.
    ///
    /// Overlay content is the string `"<name>:<effective_state>"`.
    pub fn play(&self, opts: BrokerOpts) -> SegueResult<Playback> {
        self.validate()?;
        let host = HeadlessHost::<String>::new();
        let broker = BrokerHandle::new(Broker::new(host.capabilities()?, opts)?);
        let renderer =
            Renderer::new(|v: &Presentation<'_>| format!("{}:{}", v.name, v.effective_state));

        let mut stats = PumpStats::default();
        let mut pending: Vec<(usize, Completion)> = Vec::new();
        let mut starts = Vec::new();

        for (i, step) in self.steps.iter().enumerate() {
            tracing::trace!(step = i, ?step, "script step");
            match step {
                Step::Mount { name, state } => {
                    broker.register_mount(name, state, renderer.clone())?;
                }
                Step::Unmount { name, state, rect } => {
                    broker.register_unmount(name, state, *rect)?;
                }
                Step::Start { name, state, rect } => {
                    let completion = broker.start_transition(name, state, *rect)?;
                    if let Some(c) = completion {
                        pending.push((starts.len(), c));
                    }
                    starts.push(StartResult {
                        step: i,
                        name: name.clone(),
                        state: state.clone(),
                        outcome: None,
                    });
                }
                Step::Scroll { x, y } => host.set_scroll(Vec2::new(*x, *y)),
                Step::Frames { count } => {
                    let s = pump(&broker, &host, *count)?;
                    stats.commits += s.commits;
                    stats.frames += s.frames;
                }
            }
        }

        let last = pump(&broker, &host, self.max_frames)?;
        stats.commits += last.commits;
        stats.frames += last.frames;
        stats.settled = last.settled;
        if !stats.settled {
            tracing::warn!(
                max_frames = self.max_frames,
                frames = stats.frames,
                "script ended with transitions in flight"
            );
        }

        for (idx, c) in pending {
            starts[idx].outcome = c.outcome();
        }

        Ok(Playback {
            events: host.take_events(),
            records: broker.snapshots()?,
            starts,
            stats,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scenario/script.rs"]
mod tests;

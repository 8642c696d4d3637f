//! Segue is a shared-element ("FLIP") transition engine.
//!
//! Two occurrences of the same logical thing (a card in a grid and the same card in a detail
//! view) share a transition name. When one leaves the tree and the other arrives in a different
//! state, the engine captures both geometries, hides both occurrences, and animates a floating
//! overlay from the old rectangle to the new one.
//!
//! The public surface is host-agnostic:
//!
//! - Implement the host [`Capabilities`] (frame scheduling, overlay layer, re-render requests)
//! - Create a [`Broker`] and share it through a [`BrokerHandle`]
//! - Bind each occurrence to a [`Slot`] and forward attach/detach/render hooks to it
//!
//! [`HeadlessHost`] implements every capability in memory for tests and scripted replays.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod broker;
pub(crate) mod host;
pub(crate) mod scenario;
pub(crate) mod slot;
pub(crate) mod transition;

pub use crate::foundation::core::{Bounds, OverlayId, Point, Rect, Size, Vec2};
pub use crate::foundation::error::{SegueError, SegueResult};

pub use crate::animation::ease::EaseOut;
pub use crate::animation::lerp::Lerp;
pub use crate::broker::lifecycle::{Broker, BrokerHandle};
pub use crate::broker::opts::BrokerOpts;
pub use crate::host::capability::{
    Capabilities, CapabilitiesBuilder, FrameScheduler, Measure, OverlayLayer, RenderInvalidator,
    ScrollSource,
};
pub use crate::host::headless::{HeadlessHost, MountedOverlay, OverlayEvent, PumpStats, pump};
pub use crate::scenario::script::{Playback, Script, StartResult, Step};
pub use crate::slot::proxy::Slot;
pub use crate::slot::render::{Presentation, Render, Renderer};
pub use crate::transition::completion::{Completion, Outcome};
pub use crate::transition::record::{Phase, RecordSnapshot};

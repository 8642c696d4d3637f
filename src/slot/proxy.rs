use std::rc::Rc;

use crate::{
    broker::lifecycle::BrokerHandle,
    foundation::error::SegueResult,
    host::capability::Measure,
    slot::render::{Presentation, Renderer},
    transition::completion::Completion,
};

/// Per-occurrence facade bound to one `(name, state, renderer)` for its mounted lifetime.
///
/// A slot holds no transition state. Every call is forwarded to the shared broker; the host wires
/// the calls to its own attach, layout, detach and render hooks. `N` is the host's node type,
/// handed to the measurement capability.
pub struct Slot<C, N: ?Sized> {
    broker: BrokerHandle<C>,
    measure: Rc<dyn Measure<N>>,
    name: String,
    state: String,
    renderer: Renderer<C>,
}

impl<C, N: ?Sized> Slot<C, N> {
    /// Bind an occurrence of `name` in `state` to `broker`.
    pub fn new(
        broker: BrokerHandle<C>,
        measure: Rc<dyn Measure<N>>,
        name: impl Into<String>,
        state: impl Into<String>,
        renderer: Renderer<C>,
    ) -> Self {
        Self {
            broker,
            measure,
            name: name.into(),
            state: state.into(),
            renderer,
        }
    }

    /// Transition name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logical state of this occurrence.
    pub fn state(&self) -> &str {
        &self.state
    }

    /// The occurrence is entering the tree.
    pub fn attach(&self) -> SegueResult<()> {
        self.broker
            .register_mount(&self.name, &self.state, self.renderer.clone())
    }

    /// The occurrence finished attaching and `node` has geometry.
    ///
    /// Returns the completion of the transition this occurrence arrives through, if any.
    pub fn attached(&self, node: &N) -> SegueResult<Option<Completion>> {
        let rect = self.measure.measure(node);
        self.broker.start_transition(&self.name, &self.state, rect)
    }

    /// The occurrence is about to leave the tree; `node` is measured before removal.
    pub fn detach(&self, node: &N) -> SegueResult<()> {
        let rect = self.measure.measure(node);
        self.broker.register_unmount(&self.name, &self.state, rect)
    }

    /// Whether this occurrence draws its own content this pass.
    pub fn should_render(&self) -> SegueResult<bool> {
        self.broker.should_render_content(&self.name, &self.state)
    }

    /// Content for this pass, or `None` while something else stands in for the name.
    pub fn render(&self) -> SegueResult<Option<C>> {
        if !self.should_render()? {
            return Ok(None);
        }
        let view = Presentation::in_place(&self.name, &self.state);
        Ok(Some(self.renderer.render(&view)))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slot/proxy.rs"]
mod tests;

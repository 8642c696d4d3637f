use std::fmt;
use std::rc::Rc;

/// Display-state information injected into a renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Presentation<'a> {
    /// Transition name of the occurrence being drawn.
    pub name: &'a str,
    /// `true` when drawn inside the floating overlay of a running transition.
    pub is_morphing: bool,
    /// State the transition departs from (overlay only).
    pub from_state: Option<&'a str>,
    /// State the transition arrives at (overlay only).
    pub to_state: Option<&'a str>,
    /// State the content should present right now.
    pub effective_state: &'a str,
}

impl<'a> Presentation<'a> {
    /// Presentation of an occurrence rendering itself in place.
    pub fn in_place(name: &'a str, state: &'a str) -> Self {
        Self {
            name,
            is_morphing: false,
            from_state: None,
            to_state: None,
            effective_state: state,
        }
    }

    /// Presentation of an in-flight overlay.
    pub fn morphing(name: &'a str, from: &'a str, to: &'a str, first_run: bool) -> Self {
        Self {
            name,
            is_morphing: true,
            from_state: Some(from),
            to_state: Some(to),
            effective_state: if first_run { from } else { to },
        }
    }
}

/// Capability that produces caller content for a given presentation.
pub trait Render<C> {
    /// Produce content for `view`.
    fn render(&self, view: &Presentation<'_>) -> C;
}

impl<C, F> Render<C> for F
where
    F: Fn(&Presentation<'_>) -> C,
{
    fn render(&self, view: &Presentation<'_>) -> C {
        self(view)
    }
}

/// Shared, clonable handle to a [`Render`] implementation.
pub struct Renderer<C>(Rc<dyn Render<C>>);

impl<C> Renderer<C> {
    /// Wrap a render capability.
    pub fn new(render: impl Render<C> + 'static) -> Self {
        Self(Rc::new(render))
    }

    /// Produce content for `view`.
    pub fn render(&self, view: &Presentation<'_>) -> C {
        self.0.render(view)
    }
}

impl<C> Clone for Renderer<C> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<C> fmt::Debug for Renderer<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Renderer(..)")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/slot/render.rs"]
mod tests;

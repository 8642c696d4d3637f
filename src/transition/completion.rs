use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// How a transition cycle ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The overlay ran to `progress == 1`.
    Animated,
    /// The cycle settled without animating (unmeasurable side or withdrawn arrival).
    Skipped,
}

#[derive(Debug, Default)]
struct Signal {
    outcome: Option<Outcome>,
    wakers: Vec<Waker>,
}

/// Completion signal for one transition cycle.
///
/// Clones observe the same cycle. Resolving is one-shot: later resolutions are ignored. It can be
/// polled with [`Completion::outcome`] or awaited on a single-threaded executor.
#[derive(Clone, Debug, Default)]
pub struct Completion(Rc<RefCell<Signal>>);

impl Completion {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// The outcome, once the cycle has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.0.borrow().outcome
    }

    /// Return `true` once the cycle has ended.
    pub fn is_done(&self) -> bool {
        self.outcome().is_some()
    }

    pub(crate) fn resolve(&self, outcome: Outcome) {
        let wakers = {
            let mut signal = self.0.borrow_mut();
            if signal.outcome.is_some() {
                return;
            }
            signal.outcome = Some(outcome);
            std::mem::take(&mut signal.wakers)
        };
        for w in wakers {
            w.wake();
        }
    }

    /// Return `true` when both handles observe the same cycle.
    pub fn same_cycle(&self, other: &Completion) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Future for Completion {
    type Output = Outcome;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Outcome> {
        let mut signal = self.0.borrow_mut();
        match signal.outcome {
            Some(o) => Poll::Ready(o),
            None => {
                if !signal.wakers.iter().any(|w| w.will_wake(cx.waker())) {
                    signal.wakers.push(cx.waker().clone());
                }
                Poll::Pending
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/completion.rs"]
mod tests;

use std::collections::HashMap;

use crate::{slot::render::Renderer, transition::record::TransitionRecord};

/// Name-keyed store of transition records.
///
/// Records are never removed: a name is expected to be revisited, and keeping the record keeps its
/// idle state around to tell a genuine state change from a remount. Growth is bounded by the number
/// of distinct names the application uses. Iteration follows insertion order.
pub(crate) struct TransitionRegistry<C> {
    records: Vec<TransitionRecord<C>>,
    index: HashMap<String, usize>,
}

impl<C> Default for TransitionRegistry<C> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<C> TransitionRegistry<C> {
    /// Create an empty registry.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Look up the record for `name`.
    pub(crate) fn get(&self, name: &str) -> Option<&TransitionRecord<C>> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut TransitionRecord<C>> {
        self.index.get(name).map(|&i| &mut self.records[i])
    }

    /// Return the record for `name`, creating it idle at `state` when unseen.
    ///
    /// The flag is `true` when the record was created by this call.
    pub(crate) fn get_or_create(
        &mut self,
        name: &str,
        state: &str,
        renderer: &Renderer<C>,
    ) -> (&mut TransitionRecord<C>, bool) {
        let (i, created) = match self.index.get(name) {
            Some(&i) => (i, false),
            None => {
                let i = self.records.len();
                self.records
                    .push(TransitionRecord::new(name, state, renderer.clone()));
                self.index.insert(name.to_string(), i);
                (i, true)
            }
        };
        (&mut self.records[i], created)
    }

    /// Records currently owned by the scheduler, in insertion order.
    pub(crate) fn running(&self) -> impl Iterator<Item = &TransitionRecord<C>> {
        self.records.iter().filter(|r| r.is_running())
    }

    pub(crate) fn running_mut(&mut self) -> impl Iterator<Item = &mut TransitionRecord<C>> {
        self.records.iter_mut().filter(|r| r.is_running())
    }

    /// All records in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &TransitionRecord<C>> {
        self.records.iter()
    }

    /// Number of distinct names ever registered.
    pub(crate) fn len(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/registry.rs"]
mod tests;

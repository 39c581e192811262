//! Name -> value mapping owned by the publisher task

use std::collections::HashMap;
use std::sync::Arc;

use crate::vars::Var;

/// Registered metrics. Entries are only ever added or replaced.
#[derive(Default)]
pub(crate) struct Registry {
    vars: HashMap<String, Arc<dyn Var>>,
}

impl Registry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Insert or replace; returns true if the name was already registered
    pub(crate) fn insert(&mut self, name: String, var: Arc<dyn Var>) -> bool {
        self.vars.insert(name, var).is_some()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.vars.len()
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Cheap copy of the current entries for a publish pass
    pub(crate) fn snapshot(&self) -> Vec<(String, Arc<dyn Var>)> {
        self.vars.iter().map(|(name, var)| (name.clone(), Arc::clone(var))).collect()
    }
}

use std::sync::{Arc, Mutex, PoisonError};

use cv_runtime::builtins::standard_predicates;
use cv_runtime::{ActionRegistry, PredicateRegistry};

pub(crate) const PRINT_ACTION: &str = "print";

// Lines queued by `print` hooks; the player flushes them to its own writer.
#[derive(Debug, Clone, Default)]
pub(crate) struct PrintQueue {
    lines: Arc<Mutex<Vec<String>>>,
}

impl PrintQueue {
    pub(crate) fn push(&self, line: &str) {
        self.lines
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(line.to_string());
    }

    pub(crate) fn drain(&self) -> Vec<String> {
        let mut lines = self.lines.lock().unwrap_or_else(PoisonError::into_inner);
        lines.drain(..).collect()
    }
}

pub(crate) fn host_actions(queue: &PrintQueue) -> ActionRegistry {
    let queue = queue.clone();
    ActionRegistry::new().with_action(PRINT_ACTION, move |value, _memory| {
        queue.push(value);
        Ok(())
    })
}

pub(crate) fn host_predicates() -> PredicateRegistry {
    standard_predicates()
}

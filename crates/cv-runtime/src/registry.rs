use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use cv_core::{ConversationError, Memory};

pub trait Action: Send + Sync {
    fn invoke(&self, argument: &str, memory: &mut Memory) -> Result<(), ConversationError>;
}

impl<F> Action for F
where
    F: Fn(&str, &mut Memory) -> Result<(), ConversationError> + Send + Sync,
{
    fn invoke(&self, argument: &str, memory: &mut Memory) -> Result<(), ConversationError> {
        self(argument, memory)
    }
}

pub trait Predicate: Send + Sync {
    fn test(&self, argument: &str) -> bool;
}

impl<F> Predicate for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn test(&self, argument: &str) -> bool {
        self(argument)
    }
}

pub struct Registry<T: ?Sized> {
    entries: BTreeMap<String, Arc<T>>,
}

pub type ActionRegistry = Registry<dyn Action>;
pub type PredicateRegistry = Registry<dyn Predicate>;

impl<T: ?Sized> Registry<T> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: Arc<T>) -> Option<Arc<T>> {
        self.entries.insert(name.into(), entry)
    }

    // An empty name never matches.
    pub fn lookup(&self, name: &str) -> Option<&T> {
        if name.is_empty() {
            return None;
        }
        self.entries.get(name).map(|entry| entry.as_ref())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: ?Sized> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Registry<dyn Action> {
    pub fn with_action<F>(mut self, name: impl Into<String>, action: F) -> Self
    where
        F: Fn(&str, &mut Memory) -> Result<(), ConversationError> + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(action));
        self
    }
}

impl Registry<dyn Predicate> {
    pub fn with_predicate<F>(mut self, name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.insert(name, Arc::new(predicate));
        self
    }
}

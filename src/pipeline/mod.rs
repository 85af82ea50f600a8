use std::any::Any;
use std::collections::HashMap;

pub struct PipeMap {
    data: HashMap<String, Box<dyn Send + Sync + Any>>,
}

impl PipeMap {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn insert<T: Send + Sync + Any>(&mut self, key: &str, value: T) {
        self.data.insert(key.to_string(), Box::new(value));
    }

    pub fn get<T: Send + Sync + Any>(&self, key: &str) -> Option<&T> {
        self.data.get(key)?.downcast_ref::<T>()
    }

    pub fn get_mut<T: Send + Sync + Any>(&mut self, key: &str) -> Option<&mut T> {
        self.data.get_mut(key)?.downcast_mut::<T>()
    }

    /// Move a value out of the map; it is left untouched on a type mismatch
    pub fn take<T: Send + Sync + Any>(&mut self, key: &str) -> Option<T> {
        self.get::<T>(key)?;
        let boxed = self.data.remove(key)?;
        boxed.downcast::<T>().ok().map(|value| *value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }
}

impl Default for PipeMap {
    fn default() -> Self {
        Self::new()
    }
}

pub mod core;

pub mod nodes;

pub use crate::error::PipelineError;
pub use self::core::{NodeResult, PipeNode, Pipeline};

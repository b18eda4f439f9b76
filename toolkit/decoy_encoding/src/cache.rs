//! Parse-once descriptor cache.
//!
//! Mocks box every intercepted argument, and a busy mock sees the same few
//! encodings over and over. `DescriptorCache` parses each distinct string
//! once and hands out shared [`Arc<TypeDescriptor>`] handles.

use std::sync::Arc;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;

use crate::{parse, EncodingError, TypeDescriptor};

/// Thread-safe map from encoding string to parsed descriptor.
#[derive(Default, Debug)]
pub struct DescriptorCache {
    entries: RwLock<FxHashMap<String, Arc<TypeDescriptor>>>,
}

impl DescriptorCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parsed descriptor for `encoding`, parsing it on first use.
    ///
    /// Malformed encodings are not cached.
    pub fn get_or_parse(&self, encoding: &str) -> Result<Arc<TypeDescriptor>, EncodingError> {
        if let Some(hit) = self.entries.read().get(encoding) {
            return Ok(Arc::clone(hit));
        }

        let parsed = Arc::new(parse(encoding)?);
        let mut entries = self.entries.write();
        // Another thread may have inserted while the lock was released.
        let entry = entries
            .entry(encoding.to_string())
            .or_insert_with(|| Arc::clone(&parsed));
        Ok(Arc::clone(entry))
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }
}

//! Shared fixtures.

use std::any::Any;
use std::sync::Arc;

use decoy::{ObjectRef, RuntimeObject};

/// An object equal to any other `Item` with the same name.
#[derive(Debug)]
pub struct Item {
    pub name: &'static str,
}

impl RuntimeObject for Item {
    fn class_name(&self) -> &str {
        "Item"
    }

    fn is_equal(&self, other: &dyn RuntimeObject) -> Option<bool> {
        Some(
            other
                .as_any()
                .downcast_ref::<Item>()
                .is_some_and(|item| item.name == self.name),
        )
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

pub fn item(name: &'static str) -> ObjectRef {
    Arc::new(Item { name })
}

//! Runtime objects.
//!
//! Values of kind `@` (and `#`) refer to objects of the runtime under test.
//! The comparison engine only needs a handful of hooks from them, collected
//! in [`RuntimeObject`]. Equality and ordering hooks are optional: an object
//! that returns `None` falls back to identity for equality and cannot be
//! ordered.

use std::any::Any;
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// An object living in the runtime under test.
pub trait RuntimeObject: Send + Sync + fmt::Debug {
    /// Name of the object's class.
    fn class_name(&self) -> &str;

    /// Whether the object is an instance of `class_name` or a subclass.
    fn is_kind_of(&self, class_name: &str) -> bool {
        self.class_name() == class_name
    }

    /// Value equality, if the class defines it.
    fn is_equal(&self, _other: &dyn RuntimeObject) -> Option<bool> {
        None
    }

    /// Ordering, if the class defines one.
    fn compare(&self, _other: &dyn RuntimeObject) -> Option<Ordering> {
        None
    }

    fn as_any(&self) -> &dyn Any;
}

/// Shared handle to a runtime object.
pub type ObjectRef = Arc<dyn RuntimeObject>;

/// Address of `object`, used as its identity and as the bit pattern stored
/// in a boxed `@`.
pub fn address_of(object: &ObjectRef) -> usize {
    Arc::as_ptr(object).cast::<()>() as usize
}

/// Whether two handles name the same object.
pub fn same_object(a: &ObjectRef, b: &ObjectRef) -> bool {
    address_of(a) == address_of(b)
}

/// Whether either object is an instance of the other's class.
pub fn related_by_type(a: &dyn RuntimeObject, b: &dyn RuntimeObject) -> bool {
    a.is_kind_of(b.class_name()) || b.is_kind_of(a.class_name())
}

impl fmt::Display for dyn RuntimeObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.class_name())
    }
}

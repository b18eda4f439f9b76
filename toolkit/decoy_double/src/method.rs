//! Method and target identities.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Name of an intercepted method (a selector such as `setValue:forKey:`).
///
/// Cheap to clone; equal names are equal ids.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodId(Arc<str>);

impl MethodId {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        MethodId(name.into())
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MethodId {
    fn from(name: &str) -> Self {
        MethodId::new(name)
    }
}

impl From<String> for MethodId {
    fn from(name: String) -> Self {
        MethodId::new(name)
    }
}

impl fmt::Display for MethodId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque identity of the object a call was sent to.
///
/// Ids are unique per process. Matching never compares them.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct TargetId(u64);

static NEXT_TARGET: AtomicU64 = AtomicU64::new(1);

impl TargetId {
    /// A fresh id, distinct from every id handed out before.
    pub fn fresh() -> Self {
        TargetId(NEXT_TARGET.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    #[test]
    fn equal_names_are_equal_ids() {
        let a = MethodId::from("count");
        let b = MethodId::new(String::from("count"));
        assert_eq!(a, b);
        assert_ne!(a, MethodId::from("length"));
    }

    #[test]
    fn method_id_as_map_key() {
        let mut map: FxHashMap<MethodId, u32> = FxHashMap::default();
        map.insert("setValue:".into(), 1);
        map.insert("value".into(), 2);
        assert_eq!(map.get(&MethodId::from("setValue:")), Some(&1));
        assert_eq!(map.get(&MethodId::from("missing")), None);
    }

    #[test]
    fn fresh_targets_differ() {
        let a = TargetId::fresh();
        let b = TargetId::fresh();
        assert_ne!(a, b);
        assert!(b.raw() > a.raw());
    }
}

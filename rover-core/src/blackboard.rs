use std::any::Any;
use std::borrow::Cow;
use std::collections::BTreeMap;

/// Shared, keyed mutable store decoupling producer and consumer nodes.
///
/// Keys are strings; values are dynamically typed. A key's absence is
/// distinguishable from a stored falsy value: `get` returns `None` only
/// when the key has never been set (or was removed). Configuration-style
/// readers should use [`Blackboard::get_or`] with an explicit fallback
/// rather than treating a missing key as an error.
///
/// One blackboard is owned by one tree instance and outlives any single
/// tick. All access happens from the single tick thread; external writers
/// must serialize their writes between ticks.
#[derive(Default)]
pub struct Blackboard {
    values: BTreeMap<Cow<'static, str>, Box<dyn Any>>,
}

impl Blackboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn set<T: 'static>(&mut self, key: impl Into<Cow<'static, str>>, value: T) {
        self.values.insert(key.into(), Box::new(value));
    }

    /// Returns the value under `key`, or `None` when the key is unset.
    ///
    /// Panics if the key is present but holds a different type; that is a
    /// programming error between a producer and a consumer, not a runtime
    /// condition.
    pub fn get<T: 'static>(&self, key: &str) -> Option<&T> {
        let value = self.values.get(key)?;
        value.downcast_ref::<T>().or_else(|| {
            panic!(
                "blackboard type mismatch for key {key:?} (stored type differs from requested)"
            )
        })
    }

    pub fn get_mut<T: 'static>(&mut self, key: &str) -> Option<&mut T> {
        let value = self.values.get_mut(key)?;
        value.downcast_mut::<T>().or_else(|| {
            panic!(
                "blackboard type mismatch for key {key:?} (stored type differs from requested)"
            )
        })
    }

    /// Copy-out read with a caller-supplied default for missing keys.
    ///
    /// This is the documented behavior for numeric/boolean configuration
    /// keys: an unset `"target_limit"` yields the caller's constant, not an
    /// error.
    pub fn get_or<T: Copy + 'static>(&self, key: &str, default: T) -> T {
        self.get(key).copied().unwrap_or(default)
    }

    pub fn remove<T: 'static>(&mut self, key: &str) -> Option<T> {
        let value = self.values.remove(key)?;
        value.downcast::<T>().map(|b| *b).ok().or_else(|| {
            panic!(
                "blackboard type mismatch for key {key:?} (stored type differs from requested)"
            )
        })
    }
}

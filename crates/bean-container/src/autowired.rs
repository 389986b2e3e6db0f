//! # Injection Points
//!
//! An [`Autowired`] field is a slot the resolver fills during `start_up`.
//! Beans are shared behind `Arc`, so the slot uses interior mutability; the
//! owning component reads it with [`Autowired::get`].
//!
//! ```rust
//! use bean_container::Autowired;
//! use std::sync::Arc;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct Billing {
//!     clock: Autowired<dyn Clock>,
//! }
//!
//! let billing = Billing { clock: Autowired::interface() };
//! assert!(billing.clock.get().is_none());
//! ```

use crate::descriptor::TypeDescriptor;
use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Object-safe view of an injection slot, used by the resolver.
pub trait InjectionPoint: Send + Sync {
    /// Type the slot expects.
    fn target(&self) -> TypeDescriptor;

    /// `false` once the owner froze the slot.
    fn is_settable(&self) -> bool;

    /// Stores the value behind `handle` if it is an `Arc` of the target type.
    ///
    /// Returns `false` and leaves the slot untouched otherwise.
    fn assign(&self, handle: &(dyn Any + Send + Sync)) -> bool;

    fn is_set(&self) -> bool;
}

/// A field wired by the container.
///
/// `Autowired::concrete()` (or `Default`) targets a concrete component type;
/// `Autowired::interface()` targets a `dyn Trait`.
pub struct Autowired<T: ?Sized + Send + Sync + 'static> {
    target: TypeDescriptor,
    slot: RwLock<Option<Arc<T>>>,
    frozen: AtomicBool,
}

impl<T: Send + Sync + 'static> Autowired<T> {
    pub fn concrete() -> Self {
        Self::with_target(TypeDescriptor::concrete::<T>())
    }
}

impl<T: ?Sized + Send + Sync + 'static> Autowired<T> {
    pub fn interface() -> Self {
        Self::with_target(TypeDescriptor::interface::<T>())
    }

    fn with_target(target: TypeDescriptor) -> Self {
        Self {
            target,
            slot: RwLock::new(None),
            frozen: AtomicBool::new(false),
        }
    }

    /// Current value, `None` until wired.
    pub fn get(&self) -> Option<Arc<T>> {
        self.slot.read().clone()
    }

    /// Sets the value by hand. Ignored once the slot is frozen.
    pub fn set(&self, value: Arc<T>) -> bool {
        if self.is_frozen() {
            return false;
        }
        *self.slot.write() = Some(value);
        true
    }

    /// Empties the slot and hands back what it held.
    ///
    /// Beans that reference each other through `Autowired` slots keep each
    /// other alive; taking one side breaks the cycle.
    pub fn take(&self) -> Option<Arc<T>> {
        self.slot.write().take()
    }

    /// Marks the slot read-only. The resolver reports frozen tagged fields
    /// as errors and never writes to them.
    pub fn freeze(&self) {
        self.frozen.store(true, Ordering::Release);
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen.load(Ordering::Acquire)
    }
}

impl<T: Send + Sync + 'static> Default for Autowired<T> {
    fn default() -> Self {
        Self::concrete()
    }
}

impl<T: ?Sized + Send + Sync + 'static> InjectionPoint for Autowired<T> {
    fn target(&self) -> TypeDescriptor {
        self.target
    }

    fn is_settable(&self) -> bool {
        !self.is_frozen()
    }

    fn assign(&self, handle: &(dyn Any + Send + Sync)) -> bool {
        match handle.downcast_ref::<Arc<T>>() {
            Some(value) => self.set(value.clone()),
            None => false,
        }
    }

    fn is_set(&self) -> bool {
        self.slot.read().is_some()
    }
}

impl<T: ?Sized + Send + Sync + 'static> fmt::Debug for Autowired<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autowired")
            .field("target", &self.target.name())
            .field("set", &self.is_set())
            .field("frozen", &self.is_frozen())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    trait Greeter: Send + Sync {
        fn greet(&self) -> &'static str;
    }

    struct English;
    impl Greeter for English {
        fn greet(&self) -> &'static str {
            "hello"
        }
    }

    #[test]
    fn test_assign_interface_handle() {
        let slot: Autowired<dyn Greeter> = Autowired::interface();
        let handle: Arc<dyn Greeter> = Arc::new(English);
        assert!(slot.assign(&handle));
        assert_eq!(slot.get().unwrap().greet(), "hello");
    }

    #[test]
    fn test_assign_rejects_wrong_type() {
        let slot: Autowired<dyn Greeter> = Autowired::interface();
        let handle: Arc<English> = Arc::new(English);
        assert!(!slot.assign(&handle));
        assert!(!slot.is_set());
    }

    #[test]
    fn test_frozen_slot_is_not_settable() {
        let slot: Autowired<English> = Autowired::default();
        slot.freeze();
        assert!(!slot.is_settable());
        assert!(!slot.assign(&Arc::new(English)));
        assert!(slot.get().is_none());
    }

    #[test]
    fn test_take_releases_the_reference() {
        let slot: Autowired<English> = Autowired::default();
        let english = Arc::new(English);
        assert!(slot.set(english.clone()));
        assert_eq!(Arc::strong_count(&english), 2);

        let taken = slot.take().unwrap();
        assert!(Arc::ptr_eq(&taken, &english));
        drop(taken);
        assert_eq!(Arc::strong_count(&english), 1);
        assert!(!slot.is_set());
        assert!(slot.take().is_none());
    }

    #[test]
    fn test_target_kind() {
        assert!(!Autowired::<English>::concrete().target().is_interface());
        assert!(Autowired::<dyn Greeter>::interface().target().is_interface());
    }
}

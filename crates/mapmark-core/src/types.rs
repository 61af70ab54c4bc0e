//! Type aliases for commonly used shared-state and callback types.
//!
//! The editing engine is single-threaded and event-driven: every geometry
//! mutation happens synchronously inside a pointer-event handler. Shared
//! state therefore uses `Rc<RefCell<T>>`, not locks, and callbacks are plain
//! boxed closures without `Send`/`Sync` bounds.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// A reference-counted, interior-mutable wrapper for single-threaded sharing.
///
/// This is the fundamental building block for the per-shape mutable cells
/// the engine hands out to event handlers.
pub type Shared<T> = Rc<RefCell<T>>;

/// A weak counterpart to [`Shared`], for handles that must observe teardown.
///
/// API objects hold these so that accessors return `None` after the owning
/// shape is unmounted instead of keeping it alive.
pub type SharedWeak<T> = Weak<RefCell<T>>;

/// An optional shared reference, for lazily-initialized shared state.
pub type SharedOption<T> = Rc<RefCell<Option<T>>>;

/// A shared vector for single-threaded collection management.
pub type SharedVec<T> = Rc<RefCell<Vec<T>>>;

/// A shared hash map for single-threaded key-value storage.
pub type SharedHashMap<K, V> = Rc<RefCell<HashMap<K, V>>>;

/// A simple callback with no parameters or return value.
pub type Callback = Box<dyn Fn()>;

/// A callback that receives a single parameter.
pub type DataCallback<T> = Box<dyn Fn(T)>;

/// A callback that receives two parameters.
pub type DataCallback2<T, U> = Box<dyn Fn(T, U)>;

/// Create a new `Shared<T>` from a value.
#[inline]
pub fn shared<T>(value: T) -> Shared<T> {
    Rc::new(RefCell::new(value))
}

/// Create a new `SharedOption<T>` initialized to `None`.
#[inline]
pub fn shared_none<T>() -> SharedOption<T> {
    Rc::new(RefCell::new(None))
}

/// Create a new `SharedOption<T>` initialized to `Some(value)`.
#[inline]
pub fn shared_some<T>(value: T) -> SharedOption<T> {
    Rc::new(RefCell::new(Some(value)))
}

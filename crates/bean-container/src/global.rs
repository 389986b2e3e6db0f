//! Process-wide container for hosts that cannot pass a [`Container`] around.
//!
//! Built lazily on first use with default options. Prefer an explicit handle:
//! tests sharing the global instance must [`reset`](Container::reset) it and
//! cannot run in parallel.

use crate::container::Container;
use once_cell::sync::Lazy;
use std::sync::Arc;

static GLOBAL_CONTAINER: Lazy<Container> = Lazy::new(Container::new);

/// The shared process-wide container.
pub fn global() -> &'static Container {
    &GLOBAL_CONTAINER
}

/// Looks up a bean by type in the [`global`] container.
pub fn get_object_by_type<T>() -> Option<Arc<T>>
where
    T: ?Sized + Send + Sync + 'static,
{
    global().get_object_by_type::<T>()
}

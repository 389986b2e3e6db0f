//! # Lifecycle Hooks
//!
//! Four optional callbacks, each its own capability trait. A component opts in
//! by implementing the trait and declaring it in
//! [`Component::bindings`](crate::Component::bindings); the dispatcher only
//! calls hooks that were declared.
//!
//! Order for a single bean:
//!
//! 1. [`ProvideAfter`] during `register`, before `start_up` is ever called.
//! 2. [`InjectBefore`] during the per-bean pass of `start_up`.
//! 3. [`InjectAfter`] right after that bean's fields were resolved.
//! 4. [`InjectComplete`] in a second pass, after *every* bean went through 3.
//!
//! Hooks run while the container holds its write lock, so a hook must not call
//! back into the same container. A panicking hook is not caught.

use crate::registry::Bean;
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// Fired once the bean has been registered.
pub trait ProvideAfter: Send + Sync {
    fn on_provide_after(&self);
}

/// Fired before the bean's fields are resolved.
pub trait InjectBefore: Send + Sync {
    fn on_inject_before(&self);
}

/// Fired after the bean's own fields are resolved. Other beans may not be wired yet.
pub trait InjectAfter: Send + Sync {
    fn on_inject_after(&self);
}

/// Fired after every registered bean has been resolved.
pub trait InjectComplete: Send + Sync {
    fn on_inject_complete(&self);
}

/// Where a bean is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeanState {
    /// Inserted into the indexes, hook 1 not yet fired.
    Registered,
    AwaitingInjection,
    Resolving,
    Resolved,
    /// Hook 3 fired; waiting for the rest of the pass.
    ReadyPendingComplete,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Hook {
    ProvideAfter,
    InjectBefore,
    InjectAfter,
    InjectComplete,
}

impl fmt::Display for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Hook::ProvideAfter => "on_provide_after",
            Hook::InjectBefore => "on_inject_before",
            Hook::InjectAfter => "on_inject_after",
            Hook::InjectComplete => "on_inject_complete",
        })
    }
}

/// Calls `hook` on `bean` if the bean declared it. Returns whether it fired.
pub(crate) fn dispatch(bean: &Bean, hook: Hook) -> bool {
    let fired = match hook {
        Hook::ProvideAfter => fire(bean.handle::<dyn ProvideAfter>(), |h| h.on_provide_after()),
        Hook::InjectBefore => fire(bean.handle::<dyn InjectBefore>(), |h| h.on_inject_before()),
        Hook::InjectAfter => fire(bean.handle::<dyn InjectAfter>(), |h| h.on_inject_after()),
        Hook::InjectComplete => {
            fire(bean.handle::<dyn InjectComplete>(), |h| h.on_inject_complete())
        }
    };
    if fired {
        info!(bean = %bean.name(), bean_type = %bean.descriptor(), %hook, "Lifecycle hook fired");
    }
    fired
}

fn fire<H: ?Sized>(handle: Option<Arc<H>>, call: impl FnOnce(&H)) -> bool {
    match handle {
        Some(h) => {
            call(h.as_ref());
            true
        }
        None => false,
    }
}

/// Casts for the hook traits, used by [`Bindings`](crate::Bindings).
pub(crate) fn provide_after<T: ProvideAfter + 'static>(this: Arc<T>) -> Arc<dyn ProvideAfter> {
    this
}

pub(crate) fn inject_before<T: InjectBefore + 'static>(this: Arc<T>) -> Arc<dyn InjectBefore> {
    this
}

pub(crate) fn inject_after<T: InjectAfter + 'static>(this: Arc<T>) -> Arc<dyn InjectAfter> {
    this
}

pub(crate) fn inject_complete<T: InjectComplete + 'static>(
    this: Arc<T>,
) -> Arc<dyn InjectComplete> {
    this
}

//! # Component Trait
//!
//! The `Component` trait is the contract every bean implements. It replaces
//! runtime reflection with two explicit declarations:
//!
//! - [`Component::describe`] lists the fields the container cares about:
//!   wiring-tagged [`Autowired`](crate::Autowired) slots and
//!   [`Defaulted`](crate::Defaulted) value slots.
//! - [`Component::bindings`] lists the interfaces and lifecycle hooks the type
//!   implements. Each binding is cast once at registration time, so interface
//!   lookups during `start_up` never inspect the value again.
//!
//! Both methods have empty defaults: a plain data bean only needs
//! `impl Component for MyBean {}`.
//!
//! ```rust
//! use bean_container::{Autowired, Bindings, Component, Container, Fields, InjectComplete};
//! use std::sync::Arc;
//!
//! trait Repository: Send + Sync {
//!     fn find(&self, id: u32) -> Option<String>;
//! }
//!
//! struct MemoryRepository;
//! impl Repository for MemoryRepository {
//!     fn find(&self, id: u32) -> Option<String> { Some(format!("user-{id}")) }
//! }
//! impl Component for MemoryRepository {
//!     fn bindings(b: &mut Bindings<Self>) {
//!         b.implement::<dyn Repository>(|this| this);
//!     }
//! }
//!
//! struct UserService {
//!     repository: Autowired<dyn Repository>,
//! }
//! impl Component for UserService {
//!     fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
//!         fields.autowire("repository", "true", &self.repository);
//!     }
//!     fn bindings(b: &mut Bindings<Self>) {
//!         b.on_inject_complete();
//!     }
//! }
//! impl InjectComplete for UserService {
//!     fn on_inject_complete(&self) {
//!         assert!(self.repository.get().is_some());
//!     }
//! }
//!
//! let container = Container::new();
//! let service = Arc::new(UserService { repository: Autowired::interface() });
//! container.register(Arc::new(MemoryRepository));
//! container.register(service.clone());
//! container.start_up().unwrap();
//!
//! assert_eq!(service.repository.get().unwrap().find(7).as_deref(), Some("user-7"));
//! ```

use crate::autowired::InjectionPoint;
use crate::defaults::ValueField;
use crate::descriptor::TypeDescriptor;
use crate::lifecycle::{self, InjectAfter, InjectBefore, InjectComplete, ProvideAfter};
use std::any::Any;
use std::sync::Arc;

/// Trait every bean registered with the container implements.
pub trait Component: Any + Send + Sync {
    /// Declares the fields the container should wire or seed.
    fn describe<'a>(&'a self, _fields: &mut Fields<'a>) {}

    /// Declares the interfaces and lifecycle hooks this type implements.
    fn bindings(_bindings: &mut Bindings<Self>)
    where
        Self: Sized,
    {
    }
}

/// A field as declared through [`Fields`].
pub(crate) enum FieldEntry<'a> {
    Wired {
        name: &'static str,
        tag: &'a str,
        point: &'a dyn InjectionPoint,
    },
    Value {
        name: &'static str,
        field: &'a dyn ValueField,
    },
}

/// Collects the field declarations of one component.
pub struct Fields<'a> {
    entries: Vec<FieldEntry<'a>>,
}

impl<'a> Fields<'a> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Declares a wiring-tagged field.
    ///
    /// `tag` is `"true"` (mandatory by type), `"false"` (optional by type) or
    /// the name of the bean to inject. An empty tag leaves the field unwired.
    pub fn autowire(
        &mut self,
        name: &'static str,
        tag: &'a str,
        point: &'a dyn InjectionPoint,
    ) -> &mut Self {
        self.entries.push(FieldEntry::Wired { name, tag, point });
        self
    }

    /// Same as [`Fields::autowire`].
    pub fn inject(
        &mut self,
        name: &'static str,
        tag: &'a str,
        point: &'a dyn InjectionPoint,
    ) -> &mut Self {
        self.autowire(name, tag, point)
    }

    /// Declares an untagged value field for the default-value provider.
    pub fn value(&mut self, name: &'static str, field: &'a dyn ValueField) -> &mut Self {
        self.entries.push(FieldEntry::Value { name, field });
        self
    }

    pub(crate) fn into_entries(self) -> Vec<FieldEntry<'a>> {
        self.entries
    }
}

/// An interface handle: `Arc<I>` erased behind `Any`, keyed by `I`.
pub(crate) struct Binding {
    pub(crate) target: TypeDescriptor,
    pub(crate) handle: Box<dyn Any + Send + Sync>,
}

/// Builder for the implements-relation of one registered instance.
pub struct Bindings<T: Component> {
    instance: Arc<T>,
    entries: Vec<Binding>,
}

impl<T: Component> Bindings<T> {
    pub(crate) fn new(instance: Arc<T>) -> Self {
        Self {
            instance,
            entries: Vec::new(),
        }
    }

    /// Declares that `T` implements the interface `I`.
    ///
    /// `cast` is normally the identity closure `|this| this`, which lets the
    /// compiler perform the unsizing coercion to `Arc<I>`.
    pub fn implement<I>(&mut self, cast: fn(Arc<T>) -> Arc<I>) -> &mut Self
    where
        I: ?Sized + Send + Sync + 'static,
    {
        let handle: Arc<I> = cast(Arc::clone(&self.instance));
        self.entries.push(Binding {
            target: TypeDescriptor::interface::<I>(),
            handle: Box::new(handle),
        });
        self
    }

    pub fn on_provide_after(&mut self) -> &mut Self
    where
        T: ProvideAfter,
    {
        self.implement::<dyn ProvideAfter>(lifecycle::provide_after::<T>)
    }

    pub fn on_inject_before(&mut self) -> &mut Self
    where
        T: InjectBefore,
    {
        self.implement::<dyn InjectBefore>(lifecycle::inject_before::<T>)
    }

    pub fn on_inject_after(&mut self) -> &mut Self
    where
        T: InjectAfter,
    {
        self.implement::<dyn InjectAfter>(lifecycle::inject_after::<T>)
    }

    pub fn on_inject_complete(&mut self) -> &mut Self
    where
        T: InjectComplete,
    {
        self.implement::<dyn InjectComplete>(lifecycle::inject_complete::<T>)
    }

    /// Declares all four lifecycle hooks at once.
    pub fn on_all_lifecycle(&mut self) -> &mut Self
    where
        T: ProvideAfter + InjectBefore + InjectAfter + InjectComplete,
    {
        self.on_provide_after()
            .on_inject_before()
            .on_inject_after()
            .on_inject_complete()
    }

    /// Finishes the table, prepending the concrete self-binding.
    pub(crate) fn finish(self) -> Vec<Binding> {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(Binding {
            target: TypeDescriptor::concrete::<T>(),
            handle: Box::new(self.instance),
        });
        entries.extend(self.entries);
        entries
    }
}

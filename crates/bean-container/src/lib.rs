//! # Bean Container
//!
//! An in-process inversion-of-control container. Applications register
//! long-lived service objects ("beans"), call [`Container::start_up`] once,
//! and every bean comes out with its declared dependencies filled in and its
//! lifecycle hooks fired in a predictable order.
//!
//! ## Why a Container?
//!
//! Services in a larger application depend on each other, sometimes in both
//! directions. Wiring them by hand means ordering constructors carefully and
//! threading handles through every layer. The container inverts that:
//!
//! - **Declare, don't construct**: a bean lists which fields it needs and how
//!   to find them (by type, optionally by type, or by bean name).
//! - **Late binding**: nothing is resolved until every bean is registered, so
//!   two beans can reference each other without any special cycle handling.
//! - **Interfaces**: a field typed `dyn Trait` is filled with whichever bean
//!   declared that trait, without the consumer naming the implementation.
//!
//! ## Architecture Overview
//!
//! 1. **Declaration Layer** ([`Component`], [`Autowired`], [`Defaulted`]) -
//!    what a bean needs and what it provides
//! 2. **Registry Layer** ([`Container`]) - the type, name and interface indexes
//!    behind one lock
//! 3. **Resolution Layer** ([`WiringMode`]) - how each tagged field finds its
//!    dependency during `start_up`
//!
//! ## Core Abstractions
//!
//! ```rust
//! use bean_container::{Autowired, Bindings, Component, Container, Defaulted, Fields};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! trait Clock: Send + Sync {
//!     fn now(&self) -> u64;
//! }
//!
//! struct FixedClock;
//! impl Clock for FixedClock {
//!     fn now(&self) -> u64 { 42 }
//! }
//! impl Component for FixedClock {
//!     fn bindings(b: &mut Bindings<Self>) {
//!         b.implement::<dyn Clock>(|this| this);
//!     }
//! }
//!
//! struct Scheduler {
//!     clock: Autowired<dyn Clock>,
//!     jobs: Defaulted<HashMap<String, u64>>,
//! }
//! impl Component for Scheduler {
//!     fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
//!         fields
//!             .autowire("clock", "true", &self.clock)
//!             .value("jobs", &self.jobs);
//!     }
//! }
//!
//! let container = Container::new();
//! let scheduler = Arc::new(Scheduler {
//!     clock: Autowired::interface(),
//!     jobs: Defaulted::unset(),
//! });
//! container.register(scheduler.clone());
//! container.register(Arc::new(FixedClock));
//!
//! // Value fields are usable right after registration.
//! scheduler.jobs.with_mut(|jobs| jobs.insert("backup".into(), 1));
//!
//! container.start_up().unwrap();
//! assert_eq!(scheduler.clock.get().unwrap().now(), 42);
//! ```
//!
//! ## Wiring Tags
//!
//! | Tag | Meaning |
//! |---|---|
//! | `"true"` | mandatory, by type; a miss is logged as an error |
//! | `"false"` | optional, by type; a miss is logged as info |
//! | any other non-empty string | the name of the bean to inject |
//!
//! [`Fields::autowire`] and [`Fields::inject`] are interchangeable.
//!
//! ## Error Model
//!
//! Only two things are reported as [`ContainerError`]: invalid arguments to
//! [`Container::register_named`], and fatal registration conflicts, which make
//! every later `start_up` return [`ContainerError::StartUpBlocked`]. Anything
//! that goes wrong while resolving fields is logged and leaves the field
//! empty; start-up carries on.
//!
//! ## Concurrency Model
//!
//! - One `RwLock` guards all tables; registration and start-up are exclusive
//! - Lookups share the lock and may run from any thread
//! - Beans are handed out as `Arc<T>`; their fields use interior mutability
//!
//! ## Testing
//!
//! The [`testing`] module provides a capturing `tracing` layer and an ordered
//! call log so tests can assert on diagnostics and hook order directly.

pub mod autowired;
pub mod component;
pub mod container;
pub mod defaults;
pub mod descriptor;
pub mod error;
pub mod global;
pub mod lifecycle;
mod registry;
pub mod resolver;
pub mod testing;
pub mod tracing;

// Re-export core types for convenience
pub use autowired::{Autowired, InjectionPoint};
pub use component::{Bindings, Component, Fields};
pub use container::{Container, ContainerOptions};
pub use defaults::{
    apply_default_providers, DefaultValue, Defaulted, SeedSource, ValueCategory, ValueField,
};
pub use descriptor::{TypeDescriptor, TypeKind};
pub use error::ContainerError;
pub use global::{get_object_by_type, global};
pub use lifecycle::{BeanState, InjectAfter, InjectBefore, InjectComplete, ProvideAfter};
pub use resolver::WiringMode;

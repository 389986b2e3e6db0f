//! # Container
//!
//! The public face of the crate: registration, the two-phase `start_up`, and
//! lookups. A [`Container`] is a cheap, cloneable handle; construct one at
//! application start and pass it to whatever needs to register or look up
//! beans. [`global`](crate::global) offers a lazily built process-wide instance
//! for hosts that cannot pass a handle around.
//!
//! ## Concurrency
//!
//! All tables sit behind one `parking_lot::RwLock`. `register`,
//! `register_named`, `start_up` and `reset` take it exclusively for their whole
//! duration; lookups take it shared. Nothing is asynchronous, and every call
//! runs to completion on the caller's thread.
//!
//! `start_up` wires every bean while holding the write lock, so a concurrent
//! `register` waits until the pass has finished. Lifecycle hooks run under the
//! same lock and must not call back into the container.
//!
//! ## Start-up sequence
//!
//! 1. Abort with [`ContainerError::StartUpBlocked`] if any fatal registration
//!    conflict was recorded. No hook fires.
//! 2. For every bean in registration order: `on_inject_before`, field
//!    resolution, `on_inject_after`.
//! 3. Once all beans went through step 2: `on_inject_complete` for each.
//!
//! Because resolution only starts after every bean is registered, beans that
//! reference each other by name are wired without any cycle handling.

use crate::component::{Component, FieldEntry, Fields};
use crate::defaults::{apply_default_providers, SeedSource};
use crate::descriptor::TypeDescriptor;
use crate::error::ContainerError;
use crate::lifecycle::{self, BeanState, Hook};
use crate::registry::{Bean, Inserted, Registry};
use crate::resolver;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Runtime options for a [`Container`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContainerOptions {
    /// Base seed for random sources created by the default-value provider.
    /// `None` seeds them from OS entropy.
    pub rng_seed: Option<u64>,
}

struct Inner {
    registry: RwLock<Registry>,
    seeds: SeedSource,
}

/// Handle to a bean container. Clones share the same tables.
#[derive(Clone)]
pub struct Container {
    inner: Arc<Inner>,
}

impl Container {
    pub fn new() -> Self {
        Self::with_options(ContainerOptions::default())
    }

    pub fn with_options(options: ContainerOptions) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry: RwLock::new(Registry::default()),
                seeds: SeedSource::new(options.rng_seed),
            }),
        }
    }

    // --- Registration ---

    /// Registers `instance` under its type's simple name.
    ///
    /// `None` is ignored. A second instance of an already registered type is
    /// dropped with a warning; the first one stays. If another bean already
    /// holds the default name, the instance is still registered but only
    /// reachable by type.
    pub fn register<T: Component>(&self, instance: impl Into<Option<Arc<T>>>) {
        let Some(instance) = instance.into() else {
            return;
        };
        let mut registry = self.inner.registry.write();

        let descriptor = TypeDescriptor::concrete::<T>();
        let bean = Bean::new(instance, descriptor.simple_name());
        self.seed_defaults(&bean);

        match registry.insert(bean) {
            Inserted::DuplicateType => {
                warn!(bean_type = %descriptor, "Type already registered, ignoring new instance");
            }
            Inserted::Accepted { index, named } => {
                let bean = registry.bean(index);
                if !named {
                    warn!(
                        bean = bean.name(),
                        bean_type = %descriptor,
                        "Default bean name already taken, registered by type only"
                    );
                }
                info!(bean = bean.name(), bean_type = %descriptor, "Registered bean");
                Self::provided(&mut registry, index);
            }
        }
    }

    /// Registers an owned value.
    ///
    /// The caller keeps no handle on the instance, so it can only observe the
    /// wired result through a lookup.
    pub fn register_value<T: Component>(&self, value: T) {
        debug!(
            bean_type = std::any::type_name::<T>(),
            "Registering by value, caller holds no reference to the wired instance"
        );
        self.register(Arc::new(value));
    }

    /// Registers `instance` under an explicit `name`.
    ///
    /// Unlike [`register`](Self::register), a second instance of an already
    /// registered type is accepted and replaces the earlier one in the type
    /// index; the earlier bean stays reachable by its own name.
    ///
    /// A name already in use is a fatal conflict: it is returned here *and*
    /// recorded so that every later [`start_up`](Self::start_up) fails.
    pub fn register_named<T: Component>(
        &self,
        name: &str,
        instance: impl Into<Option<Arc<T>>>,
    ) -> Result<(), ContainerError> {
        let instance = instance.into();
        let Some(instance) = instance.filter(|_| !name.trim().is_empty()) else {
            return Err(ContainerError::InvalidArgument(format!(
                "register_named requires a non-blank name and an instance (name = {name:?})"
            )));
        };
        let mut registry = self.inner.registry.write();

        if registry.contains_name(name) {
            let err = ContainerError::DuplicateName(name.to_string());
            error!(bean = name, error = %err, "Duplicate bean name, start-up is now blocked");
            registry.record_fatal(err.clone());
            return Err(err);
        }

        let descriptor = TypeDescriptor::concrete::<T>();
        let bean = Bean::new(instance, name.to_string());
        self.seed_defaults(&bean);

        if registry.contains_type(descriptor.id()) {
            warn!(
                bean = name,
                bean_type = %descriptor,
                "Type already registered, named instance now answers by-type lookups"
            );
        }
        let index = registry.insert_named(bean);
        info!(bean = name, bean_type = %descriptor, "Registered named bean");
        Self::provided(&mut registry, index);
        Ok(())
    }

    /// Adds an entry to the bulk list returned by [`controllers_any`](Self::controllers_any).
    pub fn track_controller(&self, controller: Arc<dyn Any + Send + Sync>) {
        self.inner.registry.write().track_controller(controller);
    }

    fn seed_defaults(&self, bean: &Bean) {
        let mut fields = Fields::new();
        bean.component().describe(&mut fields);
        for entry in fields.into_entries() {
            if let FieldEntry::Value { name, field } = entry {
                if apply_default_providers(field, &self.inner.seeds) {
                    debug!(
                        bean = bean.name(),
                        field = name,
                        value_type = field.type_name(),
                        category = ?field.category(),
                        "Applied default value"
                    );
                }
            }
        }
    }

    fn provided(registry: &mut Registry, index: usize) {
        lifecycle::dispatch(registry.bean(index), Hook::ProvideAfter);
        registry.bean_mut(index).state = BeanState::AwaitingInjection;
    }

    // --- Start-up ---

    /// Wires every registered bean and drives the lifecycle hooks.
    ///
    /// Only fatal registration conflicts make this fail. Resolution problems
    /// are logged and leave the affected fields empty.
    pub fn start_up(&self) -> Result<(), ContainerError> {
        let mut registry = self.inner.registry.write();
        info!(beans = registry.len(), "Starting container");

        if !registry.fatal_errors().is_empty() {
            for err in registry.fatal_errors() {
                error!(error = %err, "Fatal registration error");
            }
            return Err(ContainerError::StartUpBlocked {
                errors: registry.fatal_errors().to_vec(),
            });
        }

        let registry = &mut *registry;
        for index in 0..registry.len() {
            let bean = registry.bean(index);
            info!(bean = bean.name(), bean_type = %bean.descriptor(), "Injecting bean");

            lifecycle::dispatch(bean, Hook::InjectBefore);
            registry.bean_mut(index).state = BeanState::Resolving;

            resolver::resolve_bean(registry, index);
            registry.bean_mut(index).state = BeanState::Resolved;

            lifecycle::dispatch(registry.bean(index), Hook::InjectAfter);
            registry.bean_mut(index).state = BeanState::ReadyPendingComplete;
        }

        for index in 0..registry.len() {
            lifecycle::dispatch(registry.bean(index), Hook::InjectComplete);
            registry.bean_mut(index).state = BeanState::Complete;
        }

        info!(beans = registry.len(), "Container started");
        Ok(())
    }

    // --- Lookup ---

    /// Looks up a bean by type.
    ///
    /// A concrete `T` is found through the type index; an interface
    /// (`dyn Trait`) resolves to its earliest registered implementor.
    /// Logs an error and returns `None` when nothing matches.
    pub fn get_object_by_type<T>(&self) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let registry = self.inner.registry.read();
        let id = TypeId::of::<T>();
        let found = match registry.by_type(id) {
            Some(bean) => bean.handle::<T>(),
            None => registry
                .implementors(id)
                .find_map(|bean| bean.handle::<T>()),
        };
        if found.is_none() {
            error!(bean_type = std::any::type_name::<T>(), "No bean found for type");
        }
        found
    }

    /// Looks up a bean by name, checking it is or implements `T`.
    pub fn get_object_by_name<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let registry = self.inner.registry.read();
        let Some(bean) = registry.by_name(name) else {
            error!(bean = name, "No bean found for name");
            return None;
        };
        let found = bean.handle::<T>();
        if found.is_none() {
            error!(
                bean = name,
                expected = std::any::type_name::<T>(),
                found = %bean.descriptor(),
                "Bean found for name has an incompatible type"
            );
        }
        found
    }

    /// Legacy bulk accessor: everything passed to [`track_controller`](Self::track_controller).
    pub fn controllers_any(&self) -> Vec<Arc<dyn Any + Send + Sync>> {
        self.inner.registry.read().controllers().to_vec()
    }

    // --- Introspection ---

    /// Number of registered beans (type duplicates are not counted).
    pub fn len(&self) -> usize {
        self.inner.registry.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Names in the name index, in registration order.
    pub fn bean_names(&self) -> Vec<String> {
        self.inner.registry.read().names()
    }

    pub fn fatal_errors(&self) -> Vec<ContainerError> {
        self.inner.registry.read().fatal_errors().to_vec()
    }

    /// Lifecycle state of the bean registered under `name`.
    pub fn bean_state(&self, name: &str) -> Option<BeanState> {
        self.inner.registry.read().by_name(name).map(|bean| bean.state)
    }

    /// Clears all tables and the fatal error log. Meant for tests.
    ///
    /// Only the container's own references are dropped. Beans wired to each
    /// other form `Arc` cycles that outlive the reset unless one side empties
    /// its slot with [`Autowired::take`](crate::Autowired::take).
    pub fn reset(&self) {
        self.inner.registry.write().clear();
        debug!("Container reset");
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.inner.registry.read();
        f.debug_struct("Container")
            .field("beans", &registry.len())
            .field("names", &registry.names())
            .field("fatal_errors", &registry.fatal_errors().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Autowired, Bindings, Defaulted};
    use std::collections::HashMap;

    trait Store: Send + Sync {
        fn label(&self) -> String;
    }

    #[derive(Default)]
    struct MemoryStore {
        id: u32,
    }
    impl Store for MemoryStore {
        fn label(&self) -> String {
            format!("memory-{}", self.id)
        }
    }
    impl Component for MemoryStore {
        fn bindings(b: &mut Bindings<Self>) {
            b.implement::<dyn Store>(|this| this);
        }
    }

    struct Consumer {
        store: Autowired<dyn Store>,
        cache: Defaulted<HashMap<String, u32>>,
    }
    impl Component for Consumer {
        fn describe<'a>(&'a self, fields: &mut Fields<'a>) {
            fields
                .autowire("store", "true", &self.store)
                .value("cache", &self.cache);
        }
    }

    fn consumer() -> Arc<Consumer> {
        Arc::new(Consumer {
            store: Autowired::interface(),
            cache: Defaulted::unset(),
        })
    }

    #[test]
    fn test_register_and_lookup_by_type() {
        let container = Container::new();
        let store = Arc::new(MemoryStore { id: 1 });
        container.register(store.clone());

        let found = container.get_object_by_type::<MemoryStore>().unwrap();
        assert!(Arc::ptr_eq(&found, &store));
        let as_iface = container.get_object_by_type::<dyn Store>().unwrap();
        assert_eq!(as_iface.label(), "memory-1");
    }

    #[test]
    fn test_register_none_is_noop() {
        let container = Container::new();
        container.register(None::<Arc<MemoryStore>>);
        assert!(container.is_empty());
    }

    #[test]
    fn test_register_named_rejects_blank_name() {
        let container = Container::new();
        let err = container
            .register_named("  ", Arc::new(MemoryStore::default()))
            .unwrap_err();
        assert!(matches!(err, ContainerError::InvalidArgument(_)));
        assert!(container.fatal_errors().is_empty());
    }

    #[test]
    fn test_register_named_rejects_missing_instance() {
        let container = Container::new();
        let err = container
            .register_named("store", None::<Arc<MemoryStore>>)
            .unwrap_err();
        assert!(matches!(err, ContainerError::InvalidArgument(_)));
    }

    #[test]
    fn test_defaults_seeded_at_registration() {
        let container = Container::new();
        let consumer = consumer();
        container.register(consumer.clone());
        assert_eq!(consumer.cache.with(|c| c.len()), Some(0));
        assert!(consumer.store.get().is_none());
    }

    #[test]
    fn test_start_up_wires_interface() {
        let container = Container::new();
        let consumer = consumer();
        container.register(consumer.clone());
        container.register(Arc::new(MemoryStore { id: 9 }));
        container.start_up().unwrap();
        assert_eq!(consumer.store.get().unwrap().label(), "memory-9");
        assert_eq!(container.bean_state("Consumer"), Some(BeanState::Complete));
    }

    #[test]
    fn test_get_object_by_name_checks_type() {
        let container = Container::new();
        container
            .register_named("primary", Arc::new(MemoryStore { id: 3 }))
            .unwrap();
        assert!(container.get_object_by_name::<dyn Store>("primary").is_some());
        assert!(container.get_object_by_name::<Consumer>("primary").is_none());
        assert!(container.get_object_by_name::<MemoryStore>("missing").is_none());
    }

    #[test]
    fn test_clones_share_state() {
        let container = Container::new();
        let other = container.clone();
        other.register(Arc::new(MemoryStore::default()));
        assert_eq!(container.len(), 1);
    }

    #[test]
    fn test_reset_clears_fatal_errors() {
        let container = Container::new();
        container
            .register_named("dup", Arc::new(MemoryStore::default()))
            .unwrap();
        assert!(container.register_named("dup", consumer()).is_err());
        assert!(container.start_up().is_err());

        container.reset();
        assert!(container.is_empty());
        assert!(container.fatal_errors().is_empty());
        assert!(container.start_up().is_ok());
    }
}
